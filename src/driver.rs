//! Running frames until the window is closed.
//!
//! A [`Session`] bundles the [`Context`] with the [`Game`], a [`Scheduler`] decides when its frames run:
//!
//! - [`BlockingLoop`] loops on the calling thread and tears the session down when closing is requested.
//! - [`HostDriven`] hands the session to a [`Host`] calling it back, the run returns immediately.

use std::time::Duration;

use miette::Result;
use web_time::Instant;

use crate::{backend::Backend, Context, Game};

/// Game with the context it runs in.
pub struct Session<G: Game, B: Backend> {
    /// User state.
    game: G,
    /// Window and loaded resources.
    context: Context<B>,
    /// When the previous frame started.
    last_frame: Instant,
}

impl<G: Game, B: Backend> Session<G, B> {
    /// Load the game in the context.
    ///
    /// # Errors
    ///
    /// - When loading the game failed, the context is closed before returning.
    #[inline]
    pub fn new(mut context: Context<B>) -> Result<Self> {
        let game = match G::load(&mut context) {
            Ok(game) => game,
            Err(err) => {
                context.close();

                return Err(err.wrap_err("Error loading game"));
            }
        };

        log::info!("Session for '{}' started", context.config().title);

        Ok(Self {
            game,
            context,
            last_frame: Instant::now(),
        })
    }

    /// Whether no close signal has been observed yet.
    #[inline]
    pub fn should_continue(&mut self) -> bool {
        !self.context.poll_events()
    }

    /// Update and draw a single frame.
    ///
    /// # Errors
    ///
    /// - When the frame could not be shown.
    #[inline]
    pub fn frame(&mut self) -> Result<()> {
        profiling::scope!("Frame");

        let now = Instant::now();
        let delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.context.register_frame_time(delta_time);

        {
            profiling::scope!("Update");

            self.game.update(delta_time);
        }

        {
            profiling::scope!("Draw");

            let mut drawing = self.context.begin_drawing();
            self.game.draw(&mut drawing);
            drawing.end()?;
        }

        profiling::finish_frame!();

        Ok(())
    }

    /// Resize the drawable surface of the window.
    ///
    /// # Arguments
    ///
    /// * `width` - Horizontal size in physical pixels.
    /// * `height` - Vertical size in physical pixels.
    #[inline]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    /// Game state.
    #[inline]
    #[must_use]
    pub const fn game(&self) -> &G {
        &self.game
    }

    /// Session state.
    #[inline]
    #[must_use]
    pub const fn context(&self) -> &Context<B> {
        &self.context
    }

    /// Unload the game, then release the remaining textures and the window.
    #[inline]
    pub fn teardown(self) {
        let Self {
            game, mut context, ..
        } = self;

        game.unload(&mut context);

        let title = context.config().title.clone();
        context.close();

        log::info!("Session for '{title}' ended");
    }
}

/// Run a session until it's cancelled.
pub trait Scheduler {
    /// Drive the frames of the session.
    ///
    /// # Errors
    ///
    /// - When a frame failed in a regime where the error can be returned.
    fn run<G, B>(self, session: Session<G, B>) -> Result<()>
    where
        G: Game + 'static,
        B: Backend + 'static;
}

/// Loop on the calling thread until closing is requested.
#[derive(Debug)]
pub struct BlockingLoop {
    /// Frame rate cap.
    limiter: FrameLimiter,
}

impl BlockingLoop {
    /// Setup the loop.
    ///
    /// # Arguments
    ///
    /// * `target_fps` - Maximum frames per second, `None` runs as fast as possible.
    #[inline]
    #[must_use]
    pub fn new(target_fps: Option<u32>) -> Self {
        Self {
            limiter: FrameLimiter::new(target_fps),
        }
    }
}

impl Scheduler for BlockingLoop {
    #[inline]
    fn run<G, B>(mut self, mut session: Session<G, B>) -> Result<()>
    where
        G: Game + 'static,
        B: Backend + 'static,
    {
        log::debug!("Starting blocking frame loop");

        let result = loop {
            // Cancellation only happens between frames
            if !session.should_continue() {
                break Ok(());
            }

            if let Err(err) = session.frame() {
                break Err(err);
            }

            self.limiter.wait();
        };

        session.teardown();

        result
    }
}

/// Signal from the host to the registered callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// Time to draw a frame.
    Frame,
    /// The surface changed size, in physical pixels.
    Resize {
        /// Horizontal size.
        width: u32,
        /// Vertical size.
        height: u32,
    },
    /// The host stops calling, release everything.
    Shutdown,
}

/// Outer scheduler calling the frames at its own cadence, like the animation loop of a browser.
pub trait Host {
    /// Start calling the callback.
    ///
    /// Returns after registering, the callback might be called afterwards.
    fn register<F>(self, callback: F)
    where
        F: FnMut(HostSignal) + 'static;
}

/// Let a host decide when frames run.
#[derive(Debug)]
pub struct HostDriven<H: Host> {
    /// Scheduler the session is registered with.
    host: H,
}

impl<H: Host> HostDriven<H> {
    /// Setup the scheduler for a host.
    #[inline]
    #[must_use]
    pub const fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: Host> Scheduler for HostDriven<H> {
    #[inline]
    fn run<G, B>(self, session: Session<G, B>) -> Result<()>
    where
        G: Game + 'static,
        B: Backend + 'static,
    {
        log::debug!("Registering session with host");

        // Taken out when shutting down so it can only be torn down once
        let mut session = Some(session);

        self.host.register(move |signal| match signal {
            HostSignal::Frame => {
                if let Some(session) = &mut session {
                    if let Err(err) = session.frame() {
                        // There's no caller left to return the error to
                        log::error!("Error running frame: {err:?}");
                    }
                }
            }
            HostSignal::Resize { width, height } => {
                if let Some(session) = &mut session {
                    session.resize(width, height);
                }
            }
            HostSignal::Shutdown => {
                if let Some(session) = session.take() {
                    session.teardown();
                }
            }
        });

        Ok(())
    }
}

/// Cap the frame rate by sleeping the remainder of each frame.
#[derive(Debug)]
pub struct FrameLimiter {
    /// Time a frame should take, `None` when the cap is disabled.
    interval: Option<Duration>,
    /// When the current frame started.
    frame_start: Instant,
}

impl FrameLimiter {
    /// Create a limiter for a frame rate.
    ///
    /// # Arguments
    ///
    /// * `target_fps` - Maximum frames per second, `None` or zero disables it.
    #[inline]
    #[must_use]
    pub fn new(target_fps: Option<u32>) -> Self {
        Self {
            interval: target_fps
                .filter(|fps| *fps > 0)
                .map(|fps| Duration::from_secs(1) / fps),
            frame_start: Instant::now(),
        }
    }

    /// Time a frame should take.
    #[inline]
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Sleep until the current frame interval has passed.
    ///
    /// When the frame took longer than the interval the next frame starts now instead of catching up.
    ///
    /// # Returns
    ///
    /// - How long was slept.
    #[inline]
    pub fn wait(&mut self) -> Duration {
        let Some(interval) = self.interval else {
            return Duration::ZERO;
        };

        let deadline = self.frame_start + interval;
        let now = Instant::now();
        if now >= deadline {
            // Overran, don't try to catch up
            self.frame_start = now;

            return Duration::ZERO;
        }

        let remaining = deadline.duration_since(now);
        std::thread::sleep(remaining);
        self.frame_start = deadline;

        remaining
    }
}
