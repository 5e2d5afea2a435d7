//! PNG asset loading.

use std::io::Cursor;

use miette::{IntoDiagnostic, Result, WrapErr};
use png::{BitDepth, ColorType, Decoder, Transformations};

use super::Loader;
use crate::{color::Color, image::Image};

/// PNG asset loader.
///
/// Indexed, grayscale and low bit depth images are all expanded to 8 bit RGBA.
#[derive(Debug, Default, Clone, Copy)]
#[non_exhaustive]
pub struct PngLoader;

impl Loader<Image> for PngLoader {
    fn load(&self, bytes: &[u8]) -> Result<Image> {
        profiling::scope!("Decode PNG");

        // Decode the PNG
        let mut decoder = Decoder::new(Cursor::new(bytes));

        // Discard text chunks
        decoder.set_ignore_text_chunk(true);
        // Make it faster by not checking if it's correct
        decoder.ignore_checksums(true);

        // Convert indexed images to RGBA
        decoder
            .set_transformations(Transformations::normalize_to_color8() | Transformations::ALPHA);

        // Start parsing the PNG
        let mut reader = decoder
            .read_info()
            .into_diagnostic()
            .wrap_err("Error reading PNG header")?;

        // Ensure we can use the PNG colors
        let (color_type, bits) = reader.output_color_type();
        if bits != BitDepth::Eight {
            miette::bail!("PNG is not 8 bit after normalization but {bits:?}");
        }

        // Read the PNG
        let mut buffer = vec![0; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buffer)
            .into_diagnostic()
            .wrap_err("Error reading PNG frame")?;
        let bytes = &buffer[..info.buffer_size()];

        // Convert every color type to RGBA
        let pixels = match color_type {
            ColorType::Rgba => bytemuck::cast_slice::<_, Color>(bytes).to_vec(),
            ColorType::Rgb => bytes
                .chunks_exact(3)
                .map(|rgb| Color::new(rgb[0], rgb[1], rgb[2], 255))
                .collect(),
            ColorType::GrayscaleAlpha => bytes
                .chunks_exact(2)
                .map(|la| Color::new(la[0], la[0], la[0], la[1]))
                .collect(),
            ColorType::Grayscale => bytes
                .iter()
                .map(|&l| Color::new(l, l, l, 255))
                .collect(),
            ColorType::Indexed => miette::bail!("PNG palette has not been expanded"),
        };

        Image::from_pixels(info.width, info.height, pixels)
    }
}

#[cfg(test)]
mod tests {
    use png::Encoder;

    use super::*;

    /// Encode pixels into a PNG in memory.
    fn encode(width: u32, height: u32, color_type: ColorType, data: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(BitDepth::Eight);

            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }

        bytes
    }

    #[test]
    fn decodes_rgba() {
        let png = encode(2, 1, ColorType::Rgba, &[255, 0, 0, 255, 0, 0, 255, 128]);
        let image = PngLoader.load(&png).unwrap();

        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.pixel(0, 0), Some(Color::new(255, 0, 0, 255)));
        assert_eq!(image.pixel(1, 0), Some(Color::new(0, 0, 255, 128)));
    }

    #[test]
    fn expands_rgb_to_opaque() {
        let png = encode(1, 2, ColorType::Rgb, &[1, 2, 3, 4, 5, 6]);
        let image = PngLoader.load(&png).unwrap();

        assert_eq!(image.pixel(0, 1), Some(Color::new(4, 5, 6, 255)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(PngLoader.load(&[0, 1, 2, 3]).is_err());
    }
}
