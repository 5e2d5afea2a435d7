#![forbid(unsafe_code)]

//! Small frame driver for 2D example programs on desktop and the web.
//!
//! # Features
//!
//! - Window creation with a fixed logical screen size.
//! - Textures from PNG files, headerless raw pixel files and generated images.
//! - Immediate-mode drawing of rectangles, textures and text in a built-in bitmap font.
//! - The same program runs in a blocking loop on desktop and inside the animation loop of the browser.
//!
//! # Usage
//!
//! Implement the [`Game`] trait, load resources in [`Game::load`], draw in [`Game::draw`] and release them in [`Game::unload`].
//!
//! ```no_run
//! use framedrive::{color, AssetSource, Backend, Config, Context, Drawing, Game};
//!
//! struct Hello;
//!
//! impl Game for Hello {
//!     fn load<B: Backend>(_ctx: &mut Context<B>) -> miette::Result<Self> {
//!         Ok(Self)
//!     }
//!
//!     fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>) {
//!         d.clear_background(color::RAYWHITE);
//!         d.draw_text("Congrats! You created your first window!", 190, 200, 20, color::LIGHTGRAY);
//!     }
//! }
//!
//! # fn try_main() -> miette::Result<()> {
//! // In main
//! Hello::run(AssetSource::new(), Config::default().with_title("hello"))
//! # }
//! ```
//!
//! # Scheduling
//!
//! On desktop [`Game::run`] blocks until the window is closed or the exit key is pressed, capped at the configured frame rate.
//! On the web it returns immediately after handing the frames to the browser.
//! Both regimes are a [`driver::Scheduler`], custom backends can drive a [`Session`] with them directly.
//!
//! # Cargo features
//!
//! ## `x11`
//!
//! Support X11 on Linux desktops, Wayland is always supported.

pub mod assets;
pub mod backend;
pub mod color;
mod config;
mod context;
pub mod driver;
pub mod font;
mod graphics;
pub mod image;
mod rectangle;
mod window;

pub use assets::{AssetSource, EmbeddedRawAsset, PngLoader, RawLoader};
pub use backend::{wgpu::WinitBackend, Backend, DrawCommand, TextureId};
pub use color::Color;
pub use config::Config;
pub use context::{Context, Drawing, Texture};
pub use driver::{BlockingLoop, FrameLimiter, HostDriven, Session};
pub use image::{Image, PixelFormat};
use miette::Result;
pub use rectangle::Rectangle;
/// Keys for [`Config::with_exit_key`].
pub use winit::keyboard::KeyCode;

/// Main entrypoint containing the game state.
///
/// A session loads the game once, then updates and draws it every frame, and finally unloads it before closing the window.
pub trait Game: Sized {
    /// Load the resources, called once after the window opened.
    ///
    /// # Errors
    ///
    /// - When a resource could not be loaded, the window is closed and [`Self::run`] fails with it.
    fn load<B: Backend>(ctx: &mut Context<B>) -> Result<Self>;

    /// Advance the state, called every frame before drawing.
    ///
    /// # Arguments
    ///
    /// * `delta_time` - Seconds since the previous frame.
    #[inline(always)]
    #[allow(unused_variables)]
    fn update(&mut self, delta_time: f32) {}

    /// Draw a frame.
    fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>);

    /// Release the resources, called once after the last frame.
    ///
    /// Textures that are not unloaded here are released when the context closes.
    #[inline(always)]
    #[allow(unused_variables)]
    fn unload<B: Backend>(self, ctx: &mut Context<B>) {}

    /// Open a window and run the game in it.
    ///
    /// On desktop this blocks until the window is closed, on the web this returns immediately.
    ///
    /// # Arguments
    ///
    /// * `asset_source` - Where texture paths are resolved, on the web the assets must be embedded.
    /// * `config` - Window settings.
    ///
    /// # Errors
    ///
    /// - When the window could not be opened.
    /// - When [`Self::load`] failed.
    /// - When a frame could not be shown.
    #[inline]
    fn run(asset_source: AssetSource, config: Config) -> Result<()>
    where
        Self: 'static,
    {
        window::init_logging();

        #[cfg(not(target_arch = "wasm32"))]
        {
            use driver::Scheduler as _;
            use miette::WrapErr as _;

            let backend = pollster::block_on(WinitBackend::open(&config))
                .wrap_err("Error opening window")?;
            let scheduler = BlockingLoop::new(config.target_fps);
            let session = Session::<Self, _>::new(Context::new(backend, config, asset_source))?;

            scheduler.run(session)
        }

        #[cfg(target_arch = "wasm32")]
        {
            // Creating the GPU surface is async, so we need to spawn it into a local async runtime
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = run_web::<Self>(asset_source, config).await {
                    log::error!("Error running in the browser: {err:?}");
                }
            });

            Ok(())
        }
    }
}

/// Open the window on the canvas and register the session with the animation loop.
#[cfg(target_arch = "wasm32")]
async fn run_web<G: Game + 'static>(asset_source: AssetSource, config: Config) -> Result<()> {
    use driver::Scheduler as _;

    let host = window::web::WebHost::open(&config)?;
    let backend = WinitBackend::open(&config, host.window()).await?;
    let session = Session::<G, _>::new(Context::new(backend, config, asset_source))?;

    HostDriven::new(host).run(session)
}
