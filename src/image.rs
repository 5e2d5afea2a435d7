//! Images in CPU memory, the source of every texture.
//!
//! Images live in RAM, textures live in VRAM: an [`Image`] only exists until it has been uploaded with [`crate::Context::load_texture_from_image`].

use imgref::ImgVec;
use miette::Result;

use crate::color::Color;

/// RGBA pixels in CPU memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Row-major pixel buffer.
    pixels: ImgVec<Color>,
}

impl Image {
    /// Create an image filled with a single color.
    ///
    /// # Arguments
    ///
    /// * `width` - Horizontal size in pixels.
    /// * `height` - Vertical size in pixels.
    /// * `fill` - Color of every pixel.
    #[inline]
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        let pixels = vec![fill; width as usize * height as usize];

        Self {
            pixels: ImgVec::new(pixels, width as usize, height as usize),
        }
    }

    /// Create an image from an existing row-major pixel array.
    ///
    /// # Errors
    ///
    /// - When the amount of pixels doesn't match `width * height`.
    #[inline]
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            miette::bail!(
                "Image of {width}x{height} needs {expected} pixels but {} were supplied",
                pixels.len()
            );
        }

        Ok(Self {
            pixels: ImgVec::new(pixels, width as usize, height as usize),
        })
    }

    /// Generate a checked pattern of square blocks.
    ///
    /// The block at the top-left corner gets color `a`, its neighbors color `b`, alternating from there.
    ///
    /// # Arguments
    ///
    /// * `width` - Horizontal size in pixels.
    /// * `height` - Vertical size in pixels.
    /// * `block_size` - Size of a single square in pixels, a size of `0` is treated as `1`.
    /// * `a` - Color of the even blocks.
    /// * `b` - Color of the odd blocks.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32, block_size: u32, a: Color, b: Color) -> Self {
        profiling::scope!("Generate checkerboard");

        let block_size = block_size.max(1);

        Self::from_fn(width, height, |x, y| {
            if (x / block_size + y / block_size) % 2 == 0 {
                a
            } else {
                b
            }
        })
    }

    /// Create an image by calling a function for every pixel.
    ///
    /// The function is called row by row with the `x` and `y` coordinate of the pixel.
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut color_at: impl FnMut(u32, u32) -> Color) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(color_at(x, y));
            }
        }

        Self {
            pixels: ImgVec::new(pixels, width as usize, height as usize),
        }
    }

    /// Decode headerless pixel data.
    ///
    /// # Arguments
    ///
    /// * `bytes` - Raw file contents.
    /// * `width` - Horizontal size in pixels.
    /// * `height` - Vertical size in pixels.
    /// * `format` - How every pixel is laid out in memory.
    /// * `header_size` - Amount of bytes to skip before the pixel data starts.
    ///
    /// # Errors
    ///
    /// - When there are not enough bytes for all pixels, trailing bytes are ignored.
    /// - When the size of the pixel data doesn't fit in memory.
    pub fn from_raw(
        bytes: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        header_size: usize,
    ) -> Result<Self> {
        profiling::scope!("Decode raw image");

        let Some(needed) = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixel_count| pixel_count.checked_mul(format.bytes_per_pixel()))
            .and_then(|pixel_bytes| pixel_bytes.checked_add(header_size))
        else {
            miette::bail!(
                "Raw {format:?} image of {width}x{height} with a header of {header_size} bytes is too big to address"
            );
        };
        if bytes.len() < needed {
            miette::bail!(
                "Raw {format:?} image of {width}x{height} with a header of {header_size} bytes needs {needed} bytes but only {} are available",
                bytes.len()
            );
        }

        let pixels = bytes[header_size..needed]
            .chunks_exact(format.bytes_per_pixel())
            .map(|pixel| format.decode(pixel))
            .collect();

        Ok(Self {
            pixels: ImgVec::new(pixels, width as usize, height as usize),
        })
    }

    /// Horizontal size in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width() as u32
    }

    /// Vertical size in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height() as u32
    }

    /// Color of a single pixel.
    ///
    /// # Returns
    ///
    /// - `None` when the coordinate is outside of the image.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }

        self.pixels
            .buf()
            .get(y as usize * self.pixels.stride() + x as usize)
            .copied()
    }

    /// All pixels, row by row.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        self.pixels.buf()
    }

    /// All pixels as raw RGBA bytes, ready to upload.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.pixels.buf())
    }
}

/// Memory layout of a single pixel in raw image data.
///
/// Multi-byte formats are read little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PixelFormat {
    /// 8 bit luminance.
    Grayscale,
    /// 8 bit luminance followed by 8 bit alpha.
    GrayAlpha,
    /// 16 bit: 5 bits red, 6 bits green, 5 bits blue.
    R5G6B5,
    /// 24 bit: 8 bits per color.
    R8G8B8,
    /// 16 bit: 5 bits per color and a single alpha bit.
    R5G5B5A1,
    /// 16 bit: 4 bits per channel.
    R4G4B4A4,
    /// 32 bit: 8 bits per channel.
    R8G8B8A8,
}

impl PixelFormat {
    /// Amount of bytes a single pixel occupies.
    #[inline]
    #[must_use]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::GrayAlpha | Self::R5G6B5 | Self::R5G5B5A1 | Self::R4G4B4A4 => 2,
            Self::R8G8B8 => 3,
            Self::R8G8B8A8 => 4,
        }
    }

    /// Convert the bytes of a single pixel to a color.
    ///
    /// `bytes` must be exactly [`Self::bytes_per_pixel`] long.
    pub(crate) fn decode(self, bytes: &[u8]) -> Color {
        /// Scale a value with `bits` amount of bits to the full 8 bit range.
        fn expand(value: u16, bits: u32) -> u8 {
            let max = (1_u16 << bits) - 1;

            ((u32::from(value) * 255 + u32::from(max) / 2) / u32::from(max)) as u8
        }

        match (self, bytes) {
            (Self::Grayscale, &[l]) => Color::new(l, l, l, 255),
            (Self::GrayAlpha, &[l, a]) => Color::new(l, l, l, a),
            (Self::R5G6B5, &[low, high]) => {
                let value = u16::from_le_bytes([low, high]);

                Color::new(
                    expand(value >> 11, 5),
                    expand((value >> 5) & 0b11_1111, 6),
                    expand(value & 0b1_1111, 5),
                    255,
                )
            }
            (Self::R8G8B8, &[r, g, b]) => Color::new(r, g, b, 255),
            (Self::R5G5B5A1, &[low, high]) => {
                let value = u16::from_le_bytes([low, high]);

                Color::new(
                    expand(value >> 11, 5),
                    expand((value >> 6) & 0b1_1111, 5),
                    expand((value >> 1) & 0b1_1111, 5),
                    if value & 1 == 1 { 255 } else { 0 },
                )
            }
            (Self::R4G4B4A4, &[low, high]) => {
                let value = u16::from_le_bytes([low, high]);

                Color::new(
                    expand(value >> 12, 4),
                    expand((value >> 8) & 0b1111, 4),
                    expand((value >> 4) & 0b1111, 4),
                    expand(value & 0b1111, 4),
                )
            }
            (Self::R8G8B8A8, &[r, g, b, a]) => Color::new(r, g, b, a),
            _ => unreachable!("Pixel bytes don't match the format size"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{GOLD, ORANGE, RED};

    #[test]
    fn checkerboard_alternates_every_block() {
        let image = Image::checkerboard(1024, 1024, 32, ORANGE, GOLD);

        assert_eq!(image.pixel(0, 0), Some(ORANGE));
        assert_eq!(image.pixel(31, 31), Some(ORANGE));
        assert_eq!(image.pixel(32, 0), Some(GOLD));
        assert_eq!(image.pixel(0, 32), Some(GOLD));
        assert_eq!(image.pixel(32, 32), Some(ORANGE));
        assert_eq!(image.pixel(1023, 1023), Some(ORANGE));
        assert_eq!(image.pixel(1024, 0), None);

        // Every pixel follows the block parity rule
        for y in (0..1024).step_by(7) {
            for x in (0..1024).step_by(13) {
                let expected = if (x / 32 + y / 32) % 2 == 0 { ORANGE } else { GOLD };
                assert_eq!(image.pixel(x, y), Some(expected), "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn checkerboard_square_matches_height_stride() {
        // For square images indexing rows by the height is the same as by the width
        let size = 96;
        let image = Image::checkerboard(size, size, 32, ORANGE, GOLD);

        for y in 0..size {
            for x in 0..size {
                let expected = if (x / 32 + y / 32) % 2 == 0 { ORANGE } else { GOLD };
                assert_eq!(image.pixels()[(y * size + x) as usize], expected);
            }
        }
    }

    #[test]
    fn checkerboard_non_square_is_row_major() {
        let image = Image::checkerboard(64, 32, 16, ORANGE, GOLD);

        assert_eq!(image.pixels().len(), 64 * 32);
        // Second row of blocks, first column
        assert_eq!(image.pixels()[16 * 64], GOLD);
        // Last block of the first row
        assert_eq!(image.pixels()[63], GOLD);
        assert_eq!(image.pixel(48, 16), Some(ORANGE));
    }

    #[test]
    fn from_pixels_checks_size() {
        assert!(Image::from_pixels(2, 2, vec![RED; 4]).is_ok());
        assert!(Image::from_pixels(2, 2, vec![RED; 3]).is_err());
    }

    #[test]
    fn bytes_are_rgba() {
        let image = Image::new(1, 1, Color::new(1, 2, 3, 4));

        assert_eq!(image.as_bytes(), &[1, 2, 3, 4]);
    }

    #[test]
    fn raw_skips_header_and_ignores_trailing() {
        let bytes = [0xFF, 0xFF, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        let image = Image::from_raw(&bytes, 2, 1, PixelFormat::R8G8B8A8, 2).unwrap();

        assert_eq!(image.pixel(0, 0), Some(Color::new(1, 2, 3, 4)));
        assert_eq!(image.pixel(1, 0), Some(Color::new(5, 6, 7, 8)));
    }

    #[test]
    fn raw_too_short_fails() {
        assert!(Image::from_raw(&[0; 5], 2, 1, PixelFormat::R8G8B8, 0).is_err());
        assert!(Image::from_raw(&[0; 6], 2, 1, PixelFormat::R8G8B8, 1).is_err());
        assert!(Image::from_raw(&[0; 6], 2, 1, PixelFormat::R8G8B8, 0).is_ok());
    }

    #[test]
    fn raw_overflowing_size_fails() {
        assert!(Image::from_raw(&[0; 16], u32::MAX, u32::MAX, PixelFormat::R8G8B8A8, 0).is_err());
        assert!(Image::from_raw(&[0; 16], 1, 1, PixelFormat::R8G8B8A8, usize::MAX).is_err());
        assert!(Image::from_raw(&[0; 16], u32::MAX, 1, PixelFormat::R8G8B8A8, usize::MAX).is_err());
    }

    #[test]
    fn decode_packed_formats() {
        // Pure red in 5-6-5
        assert_eq!(
            PixelFormat::R5G6B5.decode(&0b11111_000000_00000_u16.to_le_bytes()),
            Color::new(255, 0, 0, 255)
        );
        // Pure green with alpha set in 5-5-5-1
        assert_eq!(
            PixelFormat::R5G5B5A1.decode(&0b00000_11111_00000_1_u16.to_le_bytes()),
            Color::new(0, 255, 0, 255)
        );
        // Half blue with no alpha in 4-4-4-4
        assert_eq!(
            PixelFormat::R4G4B4A4.decode(&0x0080_u16.to_le_bytes()),
            Color::new(0, 0, 136, 0)
        );
        assert_eq!(
            PixelFormat::GrayAlpha.decode(&[10, 20]),
            Color::new(10, 10, 10, 20)
        );
    }
}
