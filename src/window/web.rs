//! Attach the window to a HTML canvas and let the browser drive the frames.

use std::sync::Arc;

use miette::{IntoDiagnostic, Result, WrapErr};
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::KeyCode,
    platform::web::{EventLoopExtWebSys, WindowBuilderExtWebSys, WindowExtWebSys},
    window::Window,
};

use crate::{
    driver::{Host, HostSignal},
    Config,
};

/// Browser animation loop driving the frames.
pub(crate) struct WebHost {
    /// Event loop that will be handed to the browser.
    event_loop: EventLoop<()>,
    /// Window on the canvas.
    window: Arc<Window>,
    /// Key stopping the loop.
    exit_key: Option<KeyCode>,
}

impl WebHost {
    /// Open a window on the configured canvas.
    ///
    /// # Errors
    ///
    /// - When the browser document can't be accessed.
    /// - When the element with the canvas ID is not a canvas.
    /// - When the event loop or the window could not be created.
    pub(crate) fn open(config: &Config) -> Result<Self> {
        let canvas = find_canvas(&config.canvas_id)?;
        let append = canvas.is_none();

        let event_loop = EventLoop::new()
            .into_diagnostic()
            .wrap_err("Error setting up event loop for window")?;
        let window = super::window_builder(config)
            .with_canvas(canvas)
            // Create a new canvas in the body when none is found
            .with_append(append)
            // Don't let the browser scroll when pressing keys
            .with_prevent_default(true)
            .build(&event_loop)
            .into_diagnostic()
            .wrap_err("Error setting up window")?;

        let canvas = window
            .canvas()
            .ok_or_else(|| miette::miette!("Error getting canvas of window"))?;
        if append {
            canvas.set_id(&config.canvas_id);
        }

        // Ensure the pixels are not rendered with wrong filtering and that the size is correct
        canvas.style().set_css_text(&format!(
            "image-rendering: pixelated; outline: none; border: none; width: {}px; height: {}px",
            config.width, config.height
        ));
        canvas.set_width(config.width);
        canvas.set_height(config.height);

        log::debug!("Bound window to canvas '{}'", config.canvas_id);

        Ok(Self {
            event_loop,
            window: Arc::new(window),
            exit_key: config.exit_key,
        })
    }

    /// Shared reference to the window for creating a surface.
    pub(crate) fn window(&self) -> Arc<Window> {
        Arc::clone(&self.window)
    }
}

impl Host for WebHost {
    fn register<F>(self, mut callback: F)
    where
        F: FnMut(HostSignal) + 'static,
    {
        let Self {
            event_loop,
            window,
            exit_key,
        } = self;

        // Kick off the first animation frame
        window.request_redraw();

        event_loop.spawn(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::RedrawRequested => {
                    callback(HostSignal::Frame);

                    // Keep the animation loop going
                    window.request_redraw();
                }
                WindowEvent::Resized(size) => callback(HostSignal::Resize {
                    width: size.width,
                    height: size.height,
                }),
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput { event, .. }
                    if super::is_exit_key(&event, exit_key) =>
                {
                    log::debug!("Exit key pressed, stopping the animation loop");

                    elwt.exit();
                }
                _ => (),
            },
            Event::LoopExiting => callback(HostSignal::Shutdown),
            _ => (),
        });
    }
}

/// Find an existing canvas element by ID.
fn find_canvas(id: &str) -> Result<Option<HtmlCanvasElement>> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| miette::miette!("Error finding web document"))?;

    document
        .get_element_by_id(id)
        .map(|element| {
            element
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|element| miette::miette!("Element '{id}' is not a canvas: {element:?}"))
        })
        .transpose()
}
