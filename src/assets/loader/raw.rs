//! Headerless pixel data loading.

use miette::Result;

use super::Loader;
use crate::image::{Image, PixelFormat};

/// Raw pixel data loader.
///
/// Raw files carry no metadata, so the dimensions and layout must be known up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLoader {
    /// Horizontal size in pixels.
    pub width: u32,
    /// Vertical size in pixels.
    pub height: u32,
    /// Memory layout of every pixel.
    pub format: PixelFormat,
    /// Amount of bytes before the pixel data starts.
    pub header_size: usize,
}

impl Loader<Image> for RawLoader {
    #[inline]
    fn load(&self, bytes: &[u8]) -> Result<Image> {
        Image::from_raw(bytes, self.width, self.height, self.format, self.header_size)
    }
}
