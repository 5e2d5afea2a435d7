//! Axis-aligned rectangles in pixel space.

use glam::Vec2;

/// Axis-aligned rectangle with the origin at the top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rectangle {
    /// Horizontal position of the left edge.
    pub x: f32,
    /// Vertical position of the top edge.
    pub y: f32,
    /// Horizontal size.
    pub width: f32,
    /// Vertical size.
    pub height: f32,
}

impl Rectangle {
    /// Construct a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Bottom-right corner.
    #[inline]
    #[must_use]
    pub fn end(&self) -> Vec2 {
        self.position() + self.size()
    }

    /// Whether the rectangle covers no area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Four rectangles of a single pixel wide tracing the inside of the edges.
    ///
    /// Ordered top, bottom, left and right, the vertical sides don't overlap the horizontal ones.
    #[must_use]
    pub fn outline(&self) -> [Self; 4] {
        let inner_height = (self.height - 2.0).max(0.0);

        [
            Self::new(self.x, self.y, self.width, self.height.min(1.0)),
            Self::new(self.x, self.y + self.height - 1.0, self.width, 1.0),
            Self::new(self.x, self.y + 1.0, self.width.min(1.0), inner_height),
            Self::new(self.x + self.width - 1.0, self.y + 1.0, 1.0, inner_height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_traces_edges() {
        let [top, bottom, left, right] = Rectangle::new(10.0, 20.0, 100.0, 50.0).outline();

        assert_eq!(top, Rectangle::new(10.0, 20.0, 100.0, 1.0));
        assert_eq!(bottom, Rectangle::new(10.0, 69.0, 100.0, 1.0));
        assert_eq!(left, Rectangle::new(10.0, 21.0, 1.0, 48.0));
        assert_eq!(right, Rectangle::new(109.0, 21.0, 1.0, 48.0));
    }

    #[test]
    fn corners() {
        let rect = Rectangle::new(1.0, 2.0, 3.0, 4.0);

        assert_eq!(rect.position(), Vec2::new(1.0, 2.0));
        assert_eq!(rect.end(), Vec2::new(4.0, 6.0));
        assert!(!rect.is_empty());
        assert!(Rectangle::new(1.0, 2.0, 0.0, 4.0).is_empty());
    }
}
