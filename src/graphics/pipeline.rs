//! Abstraction for rendering batches of textured quads with a shader.

use std::{borrow::Cow, ops::Range};

use glam::Vec2;

use super::{
    data::Vertex,
    uniform::ScreenUniform,
};
use crate::{backend::TextureId, rectangle::Rectangle};

/// Minimum amount of quads the vertex buffer can hold.
const INITIAL_QUAD_CAPACITY: u64 = 256;

/// Which texture a batch of quads samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextureSlot {
    /// Single white pixel for solid colors.
    White,
    /// Glyph atlas of the built-in font.
    Font,
    /// Texture loaded by the user.
    Loaded(TextureId),
}

/// Consecutive quads sharing the same texture.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Batch {
    /// Texture bound for all quads.
    texture: TextureSlot,
    /// Vertices in the vertex buffer.
    vertices: Range<u32>,
}

/// All quads of a single frame, grouped by texture.
#[derive(Debug, Default)]
pub(crate) struct Quads {
    /// Vertices that still need to be uploaded.
    vertices: Vec<Vertex>,
    /// Ranges of the vertices that share a texture, in drawing order.
    batches: Vec<Batch>,
}

impl Quads {
    /// Remove all quads pushed this frame.
    pub(crate) fn clear(&mut self) {
        self.vertices.clear();
        self.batches.clear();
    }

    /// Push a quad to the current frame.
    ///
    /// # Arguments
    ///
    /// * `texture` - Texture the quad samples.
    /// * `dest` - Where to draw in logical pixels.
    /// * `uv` - Normalized area of the texture to sample.
    /// * `color` - Linear color the texture is multiplied with.
    pub(crate) fn push_quad(
        &mut self,
        texture: TextureSlot,
        dest: Rectangle,
        uv: Rectangle,
        color: [f32; 4],
    ) {
        if dest.is_empty() {
            return;
        }

        let (start, end) = (dest.position(), dest.end());
        let (uv_start, uv_end) = (uv.position(), uv.end());

        let top_left = Vertex::new(start, uv_start, color);
        let top_right = Vertex::new(
            Vec2::new(end.x, start.y),
            Vec2::new(uv_end.x, uv_start.y),
            color,
        );
        let bottom_left = Vertex::new(
            Vec2::new(start.x, end.y),
            Vec2::new(uv_start.x, uv_end.y),
            color,
        );
        let bottom_right = Vertex::new(end, uv_end, color);

        let first = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&[
            top_left,
            top_right,
            bottom_left,
            bottom_left,
            top_right,
            bottom_right,
        ]);
        let last = self.vertices.len() as u32;

        // Extend the previous batch when it uses the same texture
        match self.batches.last_mut() {
            Some(batch) if batch.texture == texture => batch.vertices.end = last,
            _ => self.batches.push(Batch {
                texture,
                vertices: first..last,
            }),
        }
    }

    /// Whether nothing will be drawn.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// The flow for rendering quads with a shader.
pub(crate) struct QuadPipeline {
    /// Pipeline of the rendering itself.
    render: wgpu::RenderPipeline,
    /// GPU buffer reference to all vertices of this frame.
    vertex_buffer: wgpu::Buffer,
}

impl QuadPipeline {
    /// Create and upload a pipeline from a shader.
    pub(crate) fn new(
        shader_source: &str,
        target_format: wgpu::TextureFormat,
        screen_info: &ScreenUniform,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
        device: &wgpu::Device,
    ) -> Self {
        // Create a new render pipeline first
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Quad Render Pipeline Layout"),
                bind_group_layouts: &[&screen_info.bind_group_layout, texture_bind_group_layout],
                push_constant_ranges: &[],
            });

        // Upload the shader to the GPU
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(shader_source)),
        });

        // Create the pipeline for rendering textures
        let render = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::descriptor()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Cw,
                // Irrelevant since we disable culling
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                // How many samples the pipeline will use
                count: 1,
                // Use all masks
                mask: !0,
                // Disable anti-aliasing
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = Self::create_vertex_buffer(
            INITIAL_QUAD_CAPACITY * 6 * std::mem::size_of::<Vertex>() as u64,
            device,
        );

        Self {
            render,
            vertex_buffer,
        }
    }

    /// Upload the vertices of this frame, growing the buffer when needed.
    pub(crate) fn upload(&mut self, quads: &Quads, device: &wgpu::Device, queue: &wgpu::Queue) {
        profiling::scope!("Upload vertices");

        let bytes: &[u8] = bytemuck::cast_slice(&quads.vertices);
        if bytes.is_empty() {
            return;
        }

        // We have more vertices than the buffer size, recreate the buffer
        if bytes.len() as u64 > self.vertex_buffer.size() {
            self.vertex_buffer.destroy();
            self.vertex_buffer =
                Self::create_vertex_buffer((bytes.len() as u64).next_power_of_two(), device);
        }

        queue.write_buffer(&self.vertex_buffer, 0, bytes);
    }

    /// Draw all batches of this frame.
    ///
    /// Batches of which the texture can't be found are skipped.
    pub(crate) fn render<'pass>(
        &'pass self,
        render_pass: &mut wgpu::RenderPass<'pass>,
        quads: &Quads,
        screen_info: &'pass ScreenUniform,
        bind_group: impl Fn(TextureSlot) -> Option<&'pass wgpu::BindGroup>,
    ) {
        if quads.is_empty() {
            // Nothing to render when there's no quads
            return;
        }

        // Set our pipeline
        render_pass.set_pipeline(&self.render);

        // Bind the screen size
        render_pass.set_bind_group(0, &screen_info.bind_group, &[]);

        // Set the target vertices
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

        for batch in &quads.batches {
            let Some(texture_bind_group) = bind_group(batch.texture) else {
                log::warn!("Skipping quads of unknown texture {:?}", batch.texture);
                continue;
            };

            // Bind the texture
            render_pass.set_bind_group(1, texture_bind_group, &[]);

            render_pass.draw(batch.vertices.clone(), 0..1);
        }
    }

    /// Create an empty vertex buffer that can be written to.
    fn create_vertex_buffer(size: u64, device: &wgpu::Device) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Quad Vertex Buffer"),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];
    const FULL: Rectangle = Rectangle::new(0.0, 0.0, 1.0, 1.0);

    #[test]
    fn consecutive_quads_share_a_batch() {
        let mut quads = Quads::default();
        quads.push_quad(TextureSlot::White, Rectangle::new(0.0, 0.0, 10.0, 10.0), FULL, WHITE);
        quads.push_quad(TextureSlot::White, Rectangle::new(5.0, 5.0, 10.0, 10.0), FULL, WHITE);
        quads.push_quad(TextureSlot::Font, Rectangle::new(5.0, 5.0, 10.0, 10.0), FULL, WHITE);
        quads.push_quad(TextureSlot::White, Rectangle::new(5.0, 5.0, 10.0, 10.0), FULL, WHITE);

        assert_eq!(quads.vertices.len(), 4 * 6);
        assert_eq!(
            quads.batches,
            [
                Batch {
                    texture: TextureSlot::White,
                    vertices: 0..12
                },
                Batch {
                    texture: TextureSlot::Font,
                    vertices: 12..18
                },
                Batch {
                    texture: TextureSlot::White,
                    vertices: 18..24
                },
            ]
        );
    }

    #[test]
    fn quad_corners_match_rectangle() {
        let mut quads = Quads::default();
        quads.push_quad(
            TextureSlot::White,
            Rectangle::new(10.0, 20.0, 30.0, 40.0),
            Rectangle::new(0.0, 0.0, 0.5, 1.0),
            WHITE,
        );

        assert_eq!(
            quads.vertices[0],
            Vertex::new(Vec2::new(10.0, 20.0), Vec2::ZERO, WHITE)
        );
        assert_eq!(
            quads.vertices[5],
            Vertex::new(Vec2::new(40.0, 60.0), Vec2::new(0.5, 1.0), WHITE)
        );
    }

    #[test]
    fn empty_quads_are_skipped_and_cleared() {
        let mut quads = Quads::default();
        quads.push_quad(TextureSlot::White, Rectangle::new(0.0, 0.0, 0.0, 10.0), FULL, WHITE);
        assert!(quads.is_empty());

        quads.push_quad(TextureSlot::White, Rectangle::new(0.0, 0.0, 1.0, 1.0), FULL, WHITE);
        assert!(!quads.is_empty());

        quads.clear();
        assert!(quads.is_empty());
        assert!(quads.batches.is_empty());
    }
}
