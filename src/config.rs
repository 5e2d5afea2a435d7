//! Window and frame driver configuration.

use winit::keyboard::KeyCode;

use crate::color::{Color, BLACK};

/// Initial configuration passed to [`crate::Game::run`].
///
/// There's two ways to initialize the config:
///
/// # Example
///
/// ```rust
/// # use framedrive::Config;
/// Config {
///   title: "My Demo".to_owned(),
///   ..Default::default()
/// };
/// ```
///
/// # Example
///
/// ```rust
/// # use framedrive::Config;
/// Config::default().with_title("My Demo");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Horizontal amount of logical pixels of the drawable area.
    ///
    /// Defaults to `800`.
    pub width: u32,
    /// Vertical amount of logical pixels of the drawable area.
    ///
    /// Defaults to `450`.
    pub height: u32,
    /// Name in the title bar.
    ///
    /// Defaults to `"framedrive"`.
    pub title: String,
    /// Frames per second the blocking loop is capped at.
    ///
    /// `None` draws as fast as possible. The browser always decides the cadence itself.
    ///
    /// Defaults to `Some(60)`.
    pub target_fps: Option<u32>,
    /// Whether to synchronize presenting frames with the display refresh rate.
    ///
    /// Defaults to `false`.
    pub vsync: bool,
    /// Key that requests closing the window, like the close button does.
    ///
    /// Defaults to `Some(KeyCode::Escape)`.
    pub exit_key: Option<KeyCode>,
    /// Color of frames that never clear the background.
    ///
    /// Defaults to [`BLACK`].
    pub background_color: Color,
    /// ID of the HTML canvas element to render into.
    ///
    /// Only applicable on the web, a canvas is created when no element with this ID exists.
    ///
    /// Defaults to `"canvas"`.
    pub canvas_id: String,
}

impl Config {
    /// Set the horizontal and vertical amount of logical pixels of the drawable area.
    #[inline]
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;

        self
    }

    /// Set the name in the title bar.
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();

        self
    }

    /// Set the frames per second the blocking loop is capped at.
    #[inline]
    #[must_use]
    pub fn with_target_fps(mut self, target_fps: Option<u32>) -> Self {
        self.target_fps = target_fps;

        self
    }

    /// Set whether to synchronize presenting frames with the display refresh rate.
    #[inline]
    #[must_use]
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;

        self
    }

    /// Set the key that requests closing the window.
    #[inline]
    #[must_use]
    pub fn with_exit_key(mut self, exit_key: Option<KeyCode>) -> Self {
        self.exit_key = exit_key;

        self
    }

    /// Set the color of frames that never clear the background.
    #[inline]
    #[must_use]
    pub fn with_background_color(mut self, background_color: Color) -> Self {
        self.background_color = background_color;

        self
    }

    /// Set the ID of the HTML canvas element to render into.
    #[inline]
    #[must_use]
    pub fn with_canvas_id(mut self, canvas_id: impl Into<String>) -> Self {
        self.canvas_id = canvas_id.into();

        self
    }
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            width: 800,
            height: 450,
            title: "framedrive".to_owned(),
            target_fps: Some(60),
            vsync: false,
            exit_key: Some(KeyCode::Escape),
            background_color: BLACK,
            canvas_id: "canvas".to_owned(),
        }
    }
}
