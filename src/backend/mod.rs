//! Platform and graphics handling.

pub mod wgpu;

use std::fmt::{Display, Formatter};

use glam::Vec2;
use miette::Result;
use smol_str::SmolStr;

use crate::{color::Color, image::Image, rectangle::Rectangle};

/// Identifier of a texture shared between the context and the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub(crate) u32);

impl Display for TextureId {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Single drawing operation inside a frame.
///
/// All positions and sizes are in logical pixels with the origin at the top-left of the screen.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DrawCommand {
    /// Solid filled rectangle.
    Rectangle {
        /// Area to fill.
        rect: Rectangle,
        /// Fill color.
        color: Color,
    },
    /// Outline of a rectangle, a single pixel thick.
    RectangleLines {
        /// Area to trace.
        rect: Rectangle,
        /// Line color.
        color: Color,
    },
    /// Texture at its original size.
    Texture {
        /// Texture to draw.
        id: TextureId,
        /// Top-left corner.
        position: Vec2,
        /// Color the texture is multiplied with, white keeps the original colors.
        tint: Color,
    },
    /// Text in the built-in font.
    Text {
        /// Characters to draw.
        text: SmolStr,
        /// Top-left corner of the first line.
        position: Vec2,
        /// Height of a line.
        font_size: u32,
        /// Glyph color.
        color: Color,
    },
}

/// How the frame driver interfaces with the platform it runs on.
///
/// Every frame is a `begin_frame`, `clear`, any amount of `draw` and `end_frame` call in that order.
pub trait Backend {
    /// Process pending window events.
    ///
    /// Only called by the blocking loop, on the web the host handles the events.
    ///
    /// # Returns
    ///
    /// - `true` when closing was requested with the close button or the exit key.
    fn poll_events(&mut self) -> bool;

    /// Resize the drawable surface after the host reported a new size.
    ///
    /// Backends that handle their own window events in [`Self::poll_events`] don't need this.
    ///
    /// # Arguments
    ///
    /// * `width` - Horizontal size in physical pixels.
    /// * `height` - Vertical size in physical pixels.
    #[inline]
    #[allow(unused_variables)]
    fn resize(&mut self, width: u32, height: u32) {}

    /// Upload an image as a new texture.
    ///
    /// # Errors
    ///
    /// - When the texture could not be created.
    fn create_texture(&mut self, id: TextureId, image: &Image) -> Result<()>;

    /// Free the memory of a texture.
    fn destroy_texture(&mut self, id: TextureId);

    /// Start a new frame.
    fn begin_frame(&mut self);

    /// Fill the whole frame with a color.
    fn clear(&mut self, color: Color);

    /// Draw something on the frame.
    fn draw(&mut self, command: &DrawCommand);

    /// Finish the frame and show it on the screen.
    ///
    /// # Errors
    ///
    /// - When the frame could not be presented and there's no way to recover.
    fn end_frame(&mut self) -> Result<()>;

    /// Release the window and everything attached to it.
    fn close(self)
    where
        Self: Sized;
}
