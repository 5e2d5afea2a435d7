//! Bracket around the drawing calls of a single frame.

use glam::Vec2;
use miette::Result;
use smol_str::SmolStr;

use super::{Context, Texture};
use crate::{
    backend::{Backend, DrawCommand},
    color::{Color, LIME},
    font,
    rectangle::Rectangle,
};

/// Font size of [`Drawing::draw_fps`].
const FPS_FONT_SIZE: u32 = 20;

/// Frame being drawn.
///
/// All calls are buffered and sent to the backend as a single frame when [`Self::end`] is called or the drawing is dropped.
///
/// Nothing can be loaded while drawing.
pub struct Drawing<'ctx, B: Backend> {
    /// Session the frame belongs to.
    context: &'ctx mut Context<B>,
    /// Background color, the configured one when not set.
    clear: Option<Color>,
    /// Buffered calls in drawing order.
    commands: Vec<DrawCommand>,
    /// Whether the frame has already been sent.
    submitted: bool,
}

impl<'ctx, B: Backend> Drawing<'ctx, B> {
    /// Start a frame, reusing the command buffer of the context.
    pub(crate) fn new(context: &'ctx mut Context<B>) -> Self {
        let commands = std::mem::take(&mut context.commands);

        Self {
            context,
            clear: None,
            commands,
            submitted: false,
        }
    }

    /// Fill the whole frame with a color.
    ///
    /// Everything drawn before in this frame is overwritten.
    #[inline]
    pub fn clear_background(&mut self, color: Color) {
        self.clear = Some(color);
        self.commands.clear();
    }

    /// Draw a filled rectangle.
    ///
    /// # Arguments
    ///
    /// * `x` - Horizontal position of the left edge.
    /// * `y` - Vertical position of the top edge.
    /// * `width` - Horizontal size.
    /// * `height` - Vertical size.
    /// * `color` - Fill color.
    #[inline]
    pub fn draw_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.commands.push(DrawCommand::Rectangle {
            rect: Self::rect(x, y, width, height),
            color,
        });
    }

    /// Draw the single pixel outline of a rectangle.
    #[inline]
    pub fn draw_rectangle_lines(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        self.commands.push(DrawCommand::RectangleLines {
            rect: Self::rect(x, y, width, height),
            color,
        });
    }

    /// Draw a texture at its original size.
    ///
    /// # Arguments
    ///
    /// * `texture` - Loaded texture.
    /// * `x` - Horizontal position of the left edge.
    /// * `y` - Vertical position of the top edge.
    /// * `tint` - Color multiplied with every pixel, [`crate::color::WHITE`] keeps the texture as is.
    #[inline]
    pub fn draw_texture(&mut self, texture: &Texture, x: i32, y: i32, tint: Color) {
        self.commands.push(DrawCommand::Texture {
            id: texture.id(),
            position: Vec2::new(x as f32, y as f32),
            tint,
        });
    }

    /// Draw text with the built-in font.
    ///
    /// # Arguments
    ///
    /// * `text` - Characters to draw, `'\n'` starts a new line.
    /// * `x` - Horizontal position of the left edge.
    /// * `y` - Vertical position of the top edge.
    /// * `font_size` - Height of a line in pixels, glyphs are scaled by whole factors of the base size.
    /// * `color` - Glyph color.
    #[inline]
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: u32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: SmolStr::new(text),
            position: Vec2::new(x as f32, y as f32),
            font_size,
            color,
        });
    }

    /// Draw the current frames per second.
    #[inline]
    pub fn draw_fps(&mut self, x: i32, y: i32) {
        let fps = self.context.frames_per_second().round() as u32;

        self.draw_text(&format!("{fps} FPS"), x, y, FPS_FONT_SIZE, LIME);
    }

    /// Width in pixels of text drawn with the built-in font.
    #[inline]
    #[must_use]
    pub fn measure_text(&self, text: &str, font_size: u32) -> u32 {
        font::measure_text(text, font_size)
    }

    /// Logical width of the drawable part of the window in pixels.
    #[inline]
    #[must_use]
    pub fn screen_width(&self) -> u32 {
        self.context.screen_width()
    }

    /// Logical height of the drawable part of the window in pixels.
    #[inline]
    #[must_use]
    pub fn screen_height(&self) -> u32 {
        self.context.screen_height()
    }

    /// Show the frame.
    ///
    /// # Errors
    ///
    /// - When the backend could not present the frame.
    #[inline]
    pub fn end(mut self) -> Result<()> {
        self.submit()
    }

    /// Send the buffered frame to the backend.
    fn submit(&mut self) -> Result<()> {
        if self.submitted {
            return Ok(());
        }
        self.submitted = true;

        let background = self.clear.unwrap_or(self.context.config.background_color);

        let backend = &mut self.context.backend;
        backend.begin_frame();
        backend.clear(background);
        for command in &self.commands {
            backend.draw(command);
        }
        let result = backend.end_frame();

        // Give the buffer back so the next frame doesn't allocate
        self.commands.clear();
        self.context.commands = std::mem::take(&mut self.commands);

        result
    }

    /// Convert integer coordinates to a rectangle.
    fn rect(x: i32, y: i32, width: i32, height: i32) -> Rectangle {
        Rectangle::new(x as f32, y as f32, width as f32, height as f32)
    }
}

impl<B: Backend> Drop for Drawing<'_, B> {
    fn drop(&mut self) {
        if let Err(err) = self.submit() {
            log::error!("Error showing frame: {err:?}");
        }
    }
}
