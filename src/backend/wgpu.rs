//! Backend drawing with wgpu on a winit window.

#[cfg(target_arch = "wasm32")]
use std::sync::Arc;

use miette::{Result, WrapErr};
#[cfg(target_arch = "wasm32")]
use winit::window::Window;

#[cfg(not(target_arch = "wasm32"))]
use crate::window::desktop::DesktopWindow;
use crate::{color::Color, graphics::Graphics, image::Image, Config};

use super::{Backend, DrawCommand, TextureId};

/// Winit window with a wgpu renderer.
///
/// On desktop it owns the event loop, on the web the event loop is owned by the browser host.
pub struct WinitBackend {
    /// Dropped before the window so the surface never outlives it.
    graphics: Graphics,
    /// Window with the event loop to pump.
    #[cfg(not(target_arch = "wasm32"))]
    window: DesktopWindow,
}

impl WinitBackend {
    /// Open a window and setup the GPU surface on it.
    ///
    /// # Errors
    ///
    /// - When the window could not be created.
    /// - When no GPU adapter or device could be found.
    #[cfg(not(target_arch = "wasm32"))]
    #[inline]
    pub async fn open(config: &Config) -> Result<Self> {
        let window = DesktopWindow::open(config)?;
        let graphics = Graphics::new(window.handle(), config)
            .await
            .wrap_err("Error setting up the rendering pipeline")?;

        Ok(Self { graphics, window })
    }

    /// Setup the GPU surface on a window opened by the web host.
    ///
    /// # Errors
    ///
    /// - When no GPU adapter or device could be found.
    #[cfg(target_arch = "wasm32")]
    pub(crate) async fn open(config: &Config, window: Arc<Window>) -> Result<Self> {
        let graphics = Graphics::new(window, config)
            .await
            .wrap_err("Error setting up the rendering pipeline")?;

        Ok(Self { graphics })
    }
}

impl Backend for WinitBackend {
    #[cfg(not(target_arch = "wasm32"))]
    #[inline]
    fn poll_events(&mut self) -> bool {
        let pumped = self.window.pump();
        if let Some(size) = pumped.resized {
            self.resize(size.width, size.height);
        }

        pumped.close_requested
    }

    #[cfg(target_arch = "wasm32")]
    #[inline]
    fn poll_events(&mut self) -> bool {
        // The browser host delivers the events
        false
    }

    #[inline]
    fn resize(&mut self, width: u32, height: u32) {
        self.graphics.resize(width, height);
    }

    #[inline]
    fn create_texture(&mut self, id: TextureId, image: &Image) -> Result<()> {
        self.graphics.create_texture(id, image)
    }

    #[inline]
    fn destroy_texture(&mut self, id: TextureId) {
        self.graphics.destroy_texture(id);
    }

    #[inline]
    fn begin_frame(&mut self) {
        self.graphics.begin_frame();
    }

    #[inline]
    fn clear(&mut self, color: Color) {
        self.graphics.clear(color);
    }

    #[inline]
    fn draw(&mut self, command: &DrawCommand) {
        self.graphics.draw(command);
    }

    #[inline]
    fn end_frame(&mut self) -> Result<()> {
        self.graphics.end_frame()
    }

    #[inline]
    fn close(self) {
        log::debug!("Closing window");

        // Fields drop in declaration order, surface first
        drop(self);
    }
}
