//! Color palette and helpers.
//!
//! All colors are 8-bit sRGB with a straight alpha channel.

pub use rgb::RGBA8 as Color;

/// Light gray.
pub const LIGHTGRAY: Color = rgba(200, 200, 200, 255);
/// Gray.
pub const GRAY: Color = rgba(130, 130, 130, 255);
/// Dark gray.
pub const DARKGRAY: Color = rgba(80, 80, 80, 255);
/// Yellow.
pub const YELLOW: Color = rgba(253, 249, 0, 255);
/// Gold.
pub const GOLD: Color = rgba(255, 203, 0, 255);
/// Orange.
pub const ORANGE: Color = rgba(255, 161, 0, 255);
/// Pink.
pub const PINK: Color = rgba(255, 109, 194, 255);
/// Red.
pub const RED: Color = rgba(230, 41, 55, 255);
/// Maroon.
pub const MAROON: Color = rgba(190, 33, 55, 255);
/// Green.
pub const GREEN: Color = rgba(0, 228, 48, 255);
/// Lime.
pub const LIME: Color = rgba(0, 158, 47, 255);
/// Dark green.
pub const DARKGREEN: Color = rgba(0, 117, 44, 255);
/// Sky blue.
pub const SKYBLUE: Color = rgba(102, 191, 255, 255);
/// Blue.
pub const BLUE: Color = rgba(0, 121, 241, 255);
/// Dark blue.
pub const DARKBLUE: Color = rgba(0, 82, 172, 255);
/// Purple.
pub const PURPLE: Color = rgba(200, 122, 255, 255);
/// Violet.
pub const VIOLET: Color = rgba(135, 60, 190, 255);
/// Dark purple.
pub const DARKPURPLE: Color = rgba(112, 31, 126, 255);
/// Beige.
pub const BEIGE: Color = rgba(211, 176, 131, 255);
/// Brown.
pub const BROWN: Color = rgba(127, 106, 79, 255);
/// Dark brown.
pub const DARKBROWN: Color = rgba(76, 63, 47, 255);
/// White.
pub const WHITE: Color = rgba(255, 255, 255, 255);
/// Black.
pub const BLACK: Color = rgba(0, 0, 0, 255);
/// Fully transparent.
pub const BLANK: Color = rgba(0, 0, 0, 0);
/// Magenta.
pub const MAGENTA: Color = rgba(255, 0, 255, 255);
/// Off-white used as the background in all demos.
pub const RAYWHITE: Color = rgba(245, 245, 245, 255);

/// Construct a color in a const context.
const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
    Color { r, g, b, a }
}

/// Get the color with its alpha multiplied by a factor.
///
/// # Arguments
///
/// * `color` - Color to fade.
/// * `alpha` - Factor applied to the alpha channel, clamped between `0.0` and `1.0`.
///
/// # Returns
///
/// - The same color with the new alpha value, truncated to the nearest lower integer.
#[inline]
#[must_use]
pub fn fade(color: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);

    Color {
        a: (f32::from(color.a) * alpha) as u8,
        ..color
    }
}

/// Convert a color to normalized floats the GPU can blend with.
///
/// When the target is sRGB the color channels are converted to linear space, the alpha channel never is.
#[inline]
pub(crate) fn to_linear(color: Color, srgb: bool) -> [f32; 4] {
    let channel = |value: u8| {
        let value = f32::from(value) / 255.0;

        if srgb {
            value.powf(2.2)
        } else {
            value
        }
    };

    [
        channel(color.r),
        channel(color.g),
        channel(color.b),
        f32::from(color.a) / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_halves_alpha() {
        assert_eq!(fade(WHITE, 0.5), Color::new(255, 255, 255, 127));
        assert_eq!(fade(ORANGE, 2.0), ORANGE);
        assert_eq!(fade(ORANGE, -1.0).a, 0);
    }

    #[test]
    fn linear_conversion_keeps_alpha() {
        let [r, g, b, a] = to_linear(Color::new(255, 0, 128, 51), true);

        assert!((r - 1.0).abs() < f32::EPSILON);
        assert!(g.abs() < f32::EPSILON);
        // 0.5^2.2 is much darker than the sRGB value
        assert!(b < 0.25);
        assert!((a - 0.2).abs() < 0.001);

        let [_, _, b, _] = to_linear(Color::new(0, 0, 255, 255), false);
        assert!((b - 1.0).abs() < f32::EPSILON);
    }
}
