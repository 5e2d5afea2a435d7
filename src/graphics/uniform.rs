//! Logical screen size bound for the quad vertex shader.

use wgpu::{
    util::{BufferInitDescriptor, DeviceExt},
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, BufferBindingType, BufferUsages, Device, ShaderStages,
};

use super::data::ScreenInfo;

// WebGL2 rejects uniform buffers that aren't a multiple of 16 bytes
const _: () = assert!(std::mem::size_of::<ScreenInfo>() % 16 == 0);

/// Bind group 0 of the quad shader.
///
/// The logical size never changes after the window opened, so the buffer is written once.
pub(crate) struct ScreenUniform {
    pub(crate) bind_group_layout: BindGroupLayout,
    pub(crate) bind_group: BindGroup,
}

impl ScreenUniform {
    /// Upload the logical screen size.
    pub(crate) fn new(device: &Device, screen: &ScreenInfo) -> Self {
        let buffer = device.create_buffer_init(&BufferInitDescriptor {
            label: Some("Screen Size Buffer"),
            contents: bytemuck::bytes_of(screen),
            usage: BufferUsages::UNIFORM,
        });

        let bind_group_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Screen Size Bind Group Layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                // Only used to map pixel positions to clip space
                visibility: ShaderStages::VERTEX,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Screen Size Bind Group"),
            layout: &bind_group_layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            bind_group_layout,
            bind_group,
        }
    }
}
