//! Spawn a winit window for the configured screen.

#[cfg(not(target_arch = "wasm32"))]
pub(crate) mod desktop;
#[cfg(target_arch = "wasm32")]
pub(crate) mod web;

use winit::{
    dpi::LogicalSize,
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use crate::Config;

/// Window attributes shared by all platforms.
pub(crate) fn window_builder(config: &Config) -> WindowBuilder {
    WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        // Everything is drawn in a fixed logical space
        .with_resizable(false)
}

/// Whether the keyboard event is a press of the configured exit key.
pub(crate) fn is_exit_key(event: &KeyEvent, exit_key: Option<KeyCode>) -> bool {
    exit_key.is_some_and(|key| {
        event.state == ElementState::Pressed && event.physical_key == PhysicalKey::Code(key)
    })
}

/// Setup the logger for the platform.
///
/// Calling it more than once is harmless.
pub(crate) fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        // Enable environment logger for winit
        if env_logger::try_init().is_err() {
            log::debug!("Logger was already set up");
        }
    }

    #[cfg(target_arch = "wasm32")]
    {
        // Show panics in the browser console log
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        // Show logs
        if console_log::init_with_level(log::Level::Debug).is_err() {
            log::debug!("Logger was already set up");
        }
    }
}
