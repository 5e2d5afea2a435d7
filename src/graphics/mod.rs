//! Rendering textured quads with wgpu.

pub(crate) mod data;
pub(crate) mod gpu;
pub(crate) mod pipeline;
pub(crate) mod texture;
pub(crate) mod uniform;

use std::sync::Arc;

use hashbrown::HashMap;
use miette::Result;
use winit::window::Window;

use self::{
    data::ScreenInfo,
    gpu::Gpu,
    pipeline::{QuadPipeline, Quads, TextureSlot},
    texture::GpuTexture,
    uniform::ScreenUniform,
};
use crate::{
    backend::{DrawCommand, TextureId},
    color::{self, Color, WHITE},
    font,
    image::Image,
    rectangle::Rectangle,
    Config,
};

/// Minified quad shader generated by the build script.
const SHADER_SOURCE: &str = include_str!(concat!(env!("OUT_DIR"), "/quad.wgsl"));

/// Normalized UV area of a whole texture.
const FULL_UV: Rectangle = Rectangle::new(0.0, 0.0, 1.0, 1.0);

/// Everything needed to draw frames on a window surface.
pub(crate) struct Graphics {
    /// Quads of the frame being built.
    quads: Quads,
    /// Render pipeline drawing the quads.
    pipeline: QuadPipeline,
    /// Logical screen size uniform.
    screen_info: ScreenUniform,
    /// All textures loaded by the user.
    textures: HashMap<TextureId, GpuTexture>,
    /// Single white pixel for drawing solid shapes.
    white: GpuTexture,
    /// Glyphs of the built-in font.
    font: GpuTexture,
    /// Layout of every texture bind group.
    texture_bind_group_layout: wgpu::BindGroupLayout,
    /// Sampler used by every texture.
    sampler: wgpu::Sampler,
    /// Format of all uploaded textures.
    texture_format: wgpu::TextureFormat,
    /// Whether colors must be converted to linear space.
    srgb: bool,
    /// Color the frame starts with.
    clear_color: wgpu::Color,
    /// GPU device and surface.
    gpu: Gpu,
}

impl Graphics {
    /// Create the GPU surface on the window and setup the pipeline.
    ///
    /// # Errors
    ///
    /// - When the GPU surface could not be created.
    pub(crate) async fn new(window: Arc<Window>, config: &Config) -> Result<Self> {
        let gpu = Gpu::new(window, config.vsync).await?;

        // Match the texture color space with the surface
        let srgb = gpu.format().is_srgb();
        let texture_format = if srgb {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };

        // All coordinates are in logical pixels, whatever the size of the surface is
        let screen_info =
            ScreenUniform::new(&gpu.device, &ScreenInfo::new(config.width, config.height));

        let texture_bind_group_layout = texture::bind_group_layout(&gpu.device);
        let sampler = texture::sampler(&gpu.device);

        let pipeline = QuadPipeline::new(
            SHADER_SOURCE,
            gpu.format(),
            &screen_info,
            &texture_bind_group_layout,
            &gpu.device,
        );

        // Upload the built-in textures
        let upload = |label, image: &Image| {
            GpuTexture::upload(
                label,
                image,
                texture_format,
                &texture_bind_group_layout,
                &sampler,
                &gpu.device,
                &gpu.queue,
            )
        };
        let white = upload("White Pixel Texture", &Image::new(1, 1, WHITE));
        let font = upload("Font Atlas Texture", &font::atlas());

        let clear_color = Self::wgpu_color(config.background_color, srgb);

        Ok(Self {
            quads: Quads::default(),
            pipeline,
            screen_info,
            textures: HashMap::new(),
            white,
            font,
            texture_bind_group_layout,
            sampler,
            texture_format,
            srgb,
            clear_color,
            gpu,
        })
    }

    /// Resize the surface after the window changed size.
    ///
    /// The logical coordinate space stays the same.
    #[inline]
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    /// Upload a texture.
    ///
    /// # Errors
    ///
    /// - When a texture with the same ID already exists.
    pub(crate) fn create_texture(&mut self, id: TextureId, image: &Image) -> Result<()> {
        if self.textures.contains_key(&id) {
            miette::bail!("Texture {id} already exists");
        }

        let texture = GpuTexture::upload(
            &format!("Texture {id}"),
            image,
            self.texture_format,
            &self.texture_bind_group_layout,
            &self.sampler,
            &self.gpu.device,
            &self.gpu.queue,
        );
        self.textures.insert(id, texture);

        log::debug!(
            "Uploaded texture {id} of {}x{}",
            image.width(),
            image.height()
        );

        Ok(())
    }

    /// Free a texture.
    pub(crate) fn destroy_texture(&mut self, id: TextureId) {
        match self.textures.remove(&id) {
            Some(texture) => {
                texture.destroy();

                log::debug!("Destroyed texture {id}");
            }
            None => log::warn!("Can't destroy unknown texture {id}"),
        }
    }

    /// Start a new frame, removing everything of the previous one.
    pub(crate) fn begin_frame(&mut self) {
        self.quads.clear();
    }

    /// Fill the frame with a color.
    ///
    /// Everything already drawn this frame is overwritten.
    pub(crate) fn clear(&mut self, color: Color) {
        self.clear_color = Self::wgpu_color(color, self.srgb);
        self.quads.clear();
    }

    /// Convert a draw command to quads.
    pub(crate) fn draw(&mut self, command: &DrawCommand) {
        match command {
            DrawCommand::Rectangle { rect, color } => {
                let color = color::to_linear(*color, self.srgb);

                self.quads
                    .push_quad(TextureSlot::White, *rect, FULL_UV, color);
            }
            DrawCommand::RectangleLines { rect, color } => {
                let color = color::to_linear(*color, self.srgb);

                for side in rect.outline() {
                    self.quads
                        .push_quad(TextureSlot::White, side, FULL_UV, color);
                }
            }
            DrawCommand::Texture { id, position, tint } => {
                let Some(texture) = self.textures.get(id) else {
                    log::warn!("Can't draw unknown texture {id}");
                    return;
                };

                let dest = Rectangle::new(
                    position.x,
                    position.y,
                    texture.width as f32,
                    texture.height as f32,
                );

                self.quads.push_quad(
                    TextureSlot::Loaded(*id),
                    dest,
                    FULL_UV,
                    color::to_linear(*tint, self.srgb),
                );
            }
            DrawCommand::Text {
                text,
                position,
                font_size,
                color,
            } => {
                let color = color::to_linear(*color, self.srgb);
                let atlas_width = self.font.width as f32;
                let atlas_height = self.font.height as f32;

                for glyph in font::layout(text, position.x, position.y, *font_size) {
                    let uv = Rectangle::new(
                        glyph.source.x / atlas_width,
                        glyph.source.y / atlas_height,
                        glyph.source.width / atlas_width,
                        glyph.source.height / atlas_height,
                    );

                    self.quads
                        .push_quad(TextureSlot::Font, glyph.dest, uv, color);
                }
            }
        }
    }

    /// Render all quads of this frame and show them on the surface.
    ///
    /// # Errors
    ///
    /// - When the surface texture could not be acquired for a reason other than the surface being lost.
    pub(crate) fn end_frame(&mut self) -> Result<()> {
        profiling::scope!("Render frame");

        // Get the main render texture, skip this frame when it's not available
        let Some(surface_texture) = self.gpu.surface_texture()? else {
            return Ok(());
        };

        self.pipeline
            .upload(&self.quads, &self.gpu.device, &self.gpu.queue);

        // Create a texture view from the main render texture
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Command Encoder"),
            });

        {
            profiling::scope!("Render pass");

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Quad Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Clearing is done by the load operation
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let white = &self.white;
            let font = &self.font;
            let textures = &self.textures;
            self.pipeline
                .render(&mut render_pass, &self.quads, &self.screen_info, |slot| {
                    match slot {
                        TextureSlot::White => Some(&white.bind_group),
                        TextureSlot::Font => Some(&font.bind_group),
                        TextureSlot::Loaded(id) => {
                            textures.get(&id).map(|texture| &texture.bind_group)
                        }
                    }
                });
        }

        // Draw to the texture
        {
            profiling::scope!("Submit queue");

            self.gpu.queue.submit(Some(encoder.finish()));
        }

        // Show the texture in the window
        {
            profiling::scope!("Present surface texture");

            surface_texture.present();
        }

        Ok(())
    }

    /// Convert a color to the GPU clear color.
    fn wgpu_color(color: Color, srgb: bool) -> wgpu::Color {
        let [r, g, b, a] = color::to_linear(color, srgb);

        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: f64::from(a),
        }
    }
}
