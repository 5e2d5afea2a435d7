//! Built-in monospaced bitmap font.
//!
//! Every printable ASCII character is a 5 by 8 pixel glyph, scaled by whole pixels depending on the font size.

use crate::{
    color::{BLANK, WHITE},
    image::Image,
    rectangle::Rectangle,
};

/// Horizontal pixels of a single unscaled glyph.
pub const GLYPH_WIDTH: u32 = 5;
/// Vertical pixels of a single unscaled glyph.
pub const GLYPH_HEIGHT: u32 = 8;
/// Font size at which glyphs are drawn unscaled.
pub const BASE_SIZE: u32 = 10;
/// Horizontal cursor movement after every glyph in unscaled pixels.
const ADVANCE: u32 = GLYPH_WIDTH + 1;
/// Amount of glyphs a tab moves the cursor.
const TAB_GLYPHS: u32 = 4;
/// First character in the font.
const FIRST_CHAR: char = ' ';
/// Last character in the font.
const LAST_CHAR: char = '~';

/// Column bitmaps of every glyph, least significant bit is the top row.
#[rustfmt::skip]
const GLYPHS: [[u8; GLYPH_WIDTH as usize]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x56, 0x20, 0x50], // '&'
    [0x00, 0x08, 0x07, 0x03, 0x00], // '''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x2A, 0x1C, 0x7F, 0x1C, 0x2A], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x80, 0x70, 0x30, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x00, 0x60, 0x60, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x72, 0x49, 0x49, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x49, 0x4D, 0x33], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x31], // '6'
    [0x41, 0x21, 0x11, 0x09, 0x07], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x46, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x00, 0x14, 0x00, 0x00], // ':'
    [0x00, 0x40, 0x34, 0x00, 0x00], // ';'
    [0x00, 0x08, 0x14, 0x22, 0x41], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08], // '>'
    [0x02, 0x01, 0x59, 0x09, 0x06], // '?'
    [0x3E, 0x41, 0x5D, 0x59, 0x4E], // '@'
    [0x7C, 0x12, 0x11, 0x12, 0x7C], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x41, 0x3E], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x09, 0x01], // 'F'
    [0x3E, 0x41, 0x41, 0x51, 0x73], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x1C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x26, 0x49, 0x49, 0x49, 0x32], // 'S'
    [0x03, 0x01, 0x7F, 0x01, 0x03], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x03, 0x04, 0x78, 0x04, 0x03], // 'Y'
    [0x61, 0x59, 0x49, 0x4D, 0x43], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x41], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\'
    [0x00, 0x41, 0x41, 0x41, 0x7F], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x03, 0x07, 0x08, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x78, 0x40], // 'a'
    [0x7F, 0x28, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x28], // 'c'
    [0x38, 0x44, 0x44, 0x28, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x00, 0x08, 0x7E, 0x09, 0x02], // 'f'
    [0x18, 0xA4, 0xA4, 0x9C, 0x78], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x40, 0x3D, 0x00], // 'j'
    [0x7F, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x78, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0xFC, 0x18, 0x24, 0x24, 0x18], // 'p'
    [0x18, 0x24, 0x24, 0x18, 0xFC], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x24], // 's'
    [0x04, 0x04, 0x3F, 0x44, 0x24], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x4C, 0x90, 0x90, 0x90, 0x7C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x77, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x02, 0x01, 0x02, 0x04, 0x02], // '~'
];

/// Single glyph positioned on the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    /// Where the glyph is drawn in screen pixels.
    pub dest: Rectangle,
    /// Where the glyph is on the [`atlas`] image in pixels.
    pub source: Rectangle,
}

/// Integer factor glyphs are scaled with for a font size.
#[inline]
#[must_use]
pub const fn scale(font_size: u32) -> u32 {
    let scale = font_size / BASE_SIZE;
    if scale == 0 {
        1
    } else {
        scale
    }
}

/// Index of a character on the atlas.
fn glyph_index(ch: char) -> Option<usize> {
    (FIRST_CHAR..=LAST_CHAR)
        .contains(&ch)
        .then(|| ch as usize - FIRST_CHAR as usize)
}

/// Position every glyph of a text.
///
/// # Arguments
///
/// * `text` - Characters to draw, `'\n'` starts a new line and `'\t'` moves four glyphs.
/// * `x` - Horizontal position of the left side of the first glyph.
/// * `y` - Vertical position of the top of the first line.
/// * `font_size` - Height of a line in pixels.
///
/// # Returns
///
/// - Only glyphs that have visible pixels, so spaces and unknown characters only move the cursor.
#[must_use]
pub fn layout(text: &str, x: f32, y: f32, font_size: u32) -> Vec<PlacedGlyph> {
    let scale = scale(font_size) as f32;
    let advance = ADVANCE as f32 * scale;

    let mut glyphs = Vec::with_capacity(text.len());
    let mut cursor_x = x;
    let mut cursor_y = y;

    for ch in text.chars() {
        match ch {
            '\n' => {
                cursor_x = x;
                cursor_y += font_size as f32;
                continue;
            }
            '\t' => {
                cursor_x += advance * TAB_GLYPHS as f32;
                continue;
            }
            ' ' => (),
            _ => {
                if let Some(index) = glyph_index(ch) {
                    glyphs.push(PlacedGlyph {
                        dest: Rectangle::new(
                            cursor_x,
                            cursor_y,
                            GLYPH_WIDTH as f32 * scale,
                            GLYPH_HEIGHT as f32 * scale,
                        ),
                        source: Rectangle::new(
                            (index as u32 * GLYPH_WIDTH) as f32,
                            0.0,
                            GLYPH_WIDTH as f32,
                            GLYPH_HEIGHT as f32,
                        ),
                    });
                }
            }
        }

        cursor_x += advance;
    }

    glyphs
}

/// Width in pixels of the widest line of a text.
#[must_use]
pub fn measure_text(text: &str, font_size: u32) -> u32 {
    let scale = scale(font_size);

    text.split('\n')
        .map(|line| {
            let glyphs: u32 = line
                .chars()
                .map(|ch| if ch == '\t' { TAB_GLYPHS } else { 1 })
                .sum();

            // The spacing after the last glyph doesn't count
            (glyphs * ADVANCE).saturating_sub(ADVANCE - GLYPH_WIDTH) * scale
        })
        .max()
        .unwrap_or_default()
}

/// Render all glyphs next to each other into a single image.
///
/// Glyph pixels are white so they can be tinted with any color, the rest is transparent.
#[must_use]
pub fn atlas() -> Image {
    let width = GLYPHS.len() as u32 * GLYPH_WIDTH;

    Image::from_fn(width, GLYPH_HEIGHT, |x, y| {
        let column = GLYPHS[(x / GLYPH_WIDTH) as usize][(x % GLYPH_WIDTH) as usize];

        if column & (1 << y) == 0 {
            BLANK
        } else {
            WHITE
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_at_least_one() {
        assert_eq!(scale(0), 1);
        assert_eq!(scale(10), 1);
        assert_eq!(scale(19), 1);
        assert_eq!(scale(30), 3);
        assert_eq!(scale(50), 5);
    }

    #[test]
    fn layout_skips_spaces_and_wraps_lines() {
        let glyphs = layout("a b\nc", 10.0, 20.0, 20);

        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs[0].dest, Rectangle::new(10.0, 20.0, 10.0, 16.0));
        // Space still moves the cursor
        assert_eq!(glyphs[1].dest.x, 10.0 + 2.0 * 12.0);
        // New line starts at the original position
        assert_eq!(glyphs[2].dest.x, 10.0);
        assert_eq!(glyphs[2].dest.y, 40.0);
    }

    #[test]
    fn layout_sources_point_into_atlas() {
        let glyphs = layout("!~", 0.0, 0.0, 10);

        assert_eq!(glyphs[0].source, Rectangle::new(5.0, 0.0, 5.0, 8.0));
        assert_eq!(glyphs[1].source.x, 94.0 * 5.0);
    }

    #[test]
    fn tab_and_unknown_characters_move_cursor() {
        let glyphs = layout("\tx\u{e9}y", 0.0, 0.0, 10);

        assert_eq!(glyphs.len(), 2);
        assert_eq!(glyphs[0].dest.x, 24.0);
        assert_eq!(glyphs[1].dest.x, 36.0);
    }

    #[test]
    fn measure_widest_line() {
        assert_eq!(measure_text("", 10), 0);
        assert_eq!(measure_text("a", 10), 5);
        assert_eq!(measure_text("raylib", 50), (6 * 6 - 1) * 5);
        assert_eq!(measure_text("ab\nabcd\nabc", 10), 4 * 6 - 1);
    }

    #[test]
    fn atlas_has_every_glyph() {
        let atlas = atlas();

        assert_eq!(atlas.width(), 95 * 5);
        assert_eq!(atlas.height(), 8);
        // Space is fully transparent
        assert!((0..5).all(|x| (0..8).all(|y| atlas.pixel(x, y) == Some(BLANK))));
        // Middle column of '!' is drawn from the top, index 1 column 2
        assert_eq!(atlas.pixel(5 + 2, 0), Some(WHITE));
        assert_eq!(atlas.pixel(5 + 2, 5), Some(BLANK));
    }
}
