//! Window with a manually pumped event loop for desktop platforms.

use std::{sync::Arc, time::Duration};

use miette::{IntoDiagnostic, Result, WrapErr};
use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::KeyCode,
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::Window,
};

use crate::Config;

/// What happened since the previous pump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pumped {
    /// Close button or exit key, stays set once observed.
    pub(crate) close_requested: bool,
    /// Latest physical size when the window changed size.
    pub(crate) resized: Option<PhysicalSize<u32>>,
}

/// Desktop window owning its event loop.
pub(crate) struct DesktopWindow {
    /// Dropped before the event loop.
    window: Arc<Window>,
    /// Event loop the window is bound to.
    event_loop: EventLoop<()>,
    /// Key closing the window.
    exit_key: Option<KeyCode>,
    /// Whether closing was requested.
    close_requested: bool,
}

impl DesktopWindow {
    /// Open the window.
    ///
    /// # Errors
    ///
    /// - When the event loop or the window could not be created.
    pub(crate) fn open(config: &Config) -> Result<Self> {
        let event_loop = EventLoop::new()
            .into_diagnostic()
            .wrap_err("Error setting up event loop for window")?;
        let window = super::window_builder(config)
            .build(&event_loop)
            .into_diagnostic()
            .wrap_err("Error setting up window")?;

        log::debug!(
            "Opened window '{}' of {}x{}",
            config.title,
            config.width,
            config.height
        );

        Ok(Self {
            window: Arc::new(window),
            event_loop,
            exit_key: config.exit_key,
            close_requested: false,
        })
    }

    /// Shared reference to the window for creating a surface.
    pub(crate) fn handle(&self) -> Arc<Window> {
        Arc::clone(&self.window)
    }

    /// Process all pending events without blocking.
    pub(crate) fn pump(&mut self) -> Pumped {
        profiling::scope!("Pump window events");

        let exit_key = self.exit_key;
        let mut close_requested = false;
        let mut resized = None;

        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _| {
                let Event::WindowEvent { event, .. } = event else {
                    return;
                };

                match event {
                    WindowEvent::CloseRequested => close_requested = true,
                    WindowEvent::KeyboardInput { event, .. }
                        if super::is_exit_key(&event, exit_key) =>
                    {
                        close_requested = true;
                    }
                    WindowEvent::Resized(size) => resized = Some(size),
                    _ => (),
                }
            });

        if let PumpStatus::Exit(code) = status {
            log::debug!("Event loop exited with code {code}");

            close_requested = true;
        }

        if close_requested && !self.close_requested {
            log::debug!("Closing the window was requested");

            self.close_requested = true;
        }

        Pumped {
            close_requested: self.close_requested,
            resized,
        }
    }
}
