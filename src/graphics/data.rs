//! Data types that can be send to the GPU.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::{VertexAttribute, VertexBufferLayout, VertexStepMode};

/// Corner of a quad with a UV coordinate and a tint.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    /// XY position in logical pixels.
    position: [f32; 2],
    /// UV coordinate on the bound texture.
    uv: [f32; 2],
    /// Linear RGBA color the texture is multiplied with.
    color: [f32; 4],
}

impl Vertex {
    /// Construct a new vertex.
    #[inline]
    pub(crate) const fn new(position: Vec2, uv: Vec2, color: [f32; 4]) -> Self {
        Self {
            position: [position.x, position.y],
            uv: [uv.x, uv.y],
            color,
        }
    }

    /// Shader locations of the fields.
    const ATTRIBUTES: [VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2, 2 => Float32x4];

    /// WGPU descriptor.
    pub(crate) const fn descriptor() -> VertexBufferLayout<'static> {
        VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Logical screen size passed to the shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub(crate) struct ScreenInfo {
    /// Size of the drawable area in logical pixels.
    pub(crate) size: [f32; 2],
    /// WASM needs uniforms to be aligned to 16 bytes.
    pub(crate) _padding: [f32; 2],
}

impl ScreenInfo {
    /// Construct from a logical size.
    #[inline]
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            size: [width as f32, height as f32],
            _padding: [0.0; 2],
        }
    }
}
