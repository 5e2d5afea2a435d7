//! Handle to a texture on the GPU.

use crate::backend::TextureId;

/// Texture uploaded to the backend.
///
/// Can't be cloned: giving it back with [`crate::Context::unload_texture`] releases it exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct Texture {
    /// Identifier on the backend.
    id: TextureId,
    /// Horizontal pixels.
    width: u32,
    /// Vertical pixels.
    height: u32,
}

impl Texture {
    /// Wrap an uploaded texture.
    pub(crate) const fn new(id: TextureId, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Identifier on the backend.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> TextureId {
        self.id
    }

    /// Horizontal pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Vertical pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}
