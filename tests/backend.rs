//! Back-end for running the frame driver in tests, records every call instead of interfacing with any OS functionality.

use std::{cell::RefCell, rc::Rc};

use framedrive::{
    color::{BLACK, BLUE, GOLD, LIME, ORANGE, RAYWHITE, RED, WHITE},
    driver::{Host, HostSignal, Scheduler},
    embed_assets, AssetSource, Backend, BlockingLoop, Color, Config, Context, DrawCommand,
    Drawing, Game, HostDriven, Image, PixelFormat, Rectangle, Session, Texture, TextureId,
};
use glam::Vec2;
use miette::Result;

/// Call on the backend.
#[derive(Debug, Clone, PartialEq)]
enum Call {
    Poll,
    Resize(u32, u32),
    Create(TextureId, Image),
    Destroy(TextureId),
    Begin,
    Clear(Color),
    Draw(DrawCommand),
    End,
    Close,
}

/// Shared list of calls, readable after the backend has been consumed.
#[derive(Debug, Clone, Default)]
struct Calls(Rc<RefCell<Vec<Call>>>);

impl Calls {
    fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    fn get(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    fn count(&self, call: &Call) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }

    fn position(&self, call: &Call) -> Option<usize> {
        self.0.borrow().iter().position(|c| c == call)
    }

    fn last_position(&self, call: &Call) -> Option<usize> {
        self.0.borrow().iter().rposition(|c| c == call)
    }
}

/// Test back-end.
struct TestBackend {
    /// Everything that happened.
    calls: Calls,
    /// Polls that return "keep going" before closing is requested.
    frames: usize,
}

impl TestBackend {
    fn new(frames: usize) -> (Self, Calls) {
        let calls = Calls::default();

        (
            Self {
                calls: calls.clone(),
                frames,
            },
            calls,
        )
    }
}

impl Backend for TestBackend {
    fn poll_events(&mut self) -> bool {
        self.calls.push(Call::Poll);

        if self.frames == 0 {
            true
        } else {
            self.frames -= 1;

            false
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Resize(width, height));
    }

    fn create_texture(&mut self, id: TextureId, image: &Image) -> Result<()> {
        self.calls.push(Call::Create(id, image.clone()));

        Ok(())
    }

    fn destroy_texture(&mut self, id: TextureId) {
        self.calls.push(Call::Destroy(id));
    }

    fn begin_frame(&mut self) {
        self.calls.push(Call::Begin);
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(Call::Clear(color));
    }

    fn draw(&mut self, command: &DrawCommand) {
        self.calls.push(Call::Draw(command.clone()));
    }

    fn end_frame(&mut self) -> Result<()> {
        self.calls.push(Call::End);

        Ok(())
    }

    fn close(self) {
        self.calls.push(Call::Close);
    }
}

/// Host calling back only when the test says so.
#[derive(Default, Clone)]
struct ManualHost {
    /// Registered callback.
    callback: Rc<RefCell<Option<Box<dyn FnMut(HostSignal)>>>>,
}

impl ManualHost {
    fn signal(&self, signal: HostSignal) {
        let mut callback = self.callback.borrow_mut();
        let callback = callback.as_mut().expect("nothing registered");

        callback(signal);
    }
}

impl Host for ManualHost {
    fn register<F>(self, callback: F)
    where
        F: FnMut(HostSignal) + 'static,
    {
        *self.callback.borrow_mut() = Some(Box::new(callback));
    }
}

/// Start a session on the test back-end.
fn session<G: Game>(frames: usize, config: Config) -> (Result<Session<G, TestBackend>>, Calls) {
    let (backend, calls) = TestBackend::new(frames);
    let context = Context::new(backend, config, AssetSource::new());

    (Session::new(context), calls)
}

/// Checkerboard drawn in the middle of the screen.
struct Checked {
    checked: Texture,
}

impl Game for Checked {
    fn load<B: Backend>(ctx: &mut Context<B>) -> Result<Self> {
        let checked =
            ctx.load_texture_from_image(Image::checkerboard(1024, 1024, 32, ORANGE, GOLD))?;

        Ok(Self { checked })
    }

    fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>) {
        let x = d.screen_width() as i32 / 2 - self.checked.width() as i32 / 2;
        let y = d.screen_height() as i32 / 2 - self.checked.height() as i32 / 2;

        d.clear_background(RAYWHITE);
        d.draw_texture(&self.checked, x, y, WHITE);
    }

    fn unload<B: Backend>(self, ctx: &mut Context<B>) {
        ctx.unload_texture(self.checked);
    }
}

/// Loads two textures but only unloads one.
struct Forgetful {
    kept: Texture,
    forgotten: Texture,
}

impl Game for Forgetful {
    fn load<B: Backend>(ctx: &mut Context<B>) -> Result<Self> {
        let kept = ctx.load_texture_from_image(Image::new(2, 2, RED))?;
        let forgotten = ctx.load_texture_from_image(Image::new(4, 4, BLUE))?;

        Ok(Self { kept, forgotten })
    }

    fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>) {
        d.draw_texture(&self.kept, 0, 0, WHITE);
        d.draw_texture(&self.forgotten, 10, 10, WHITE);
    }

    fn unload<B: Backend>(self, ctx: &mut Context<B>) {
        ctx.unload_texture(self.kept);
    }
}

/// Draws before clearing, and never clears in the second frame.
#[derive(Default)]
struct Overdraw {
    frame: usize,
}

impl Game for Overdraw {
    fn load<B: Backend>(_ctx: &mut Context<B>) -> Result<Self> {
        Ok(Self::default())
    }

    fn update(&mut self, _delta_time: f32) {
        self.frame += 1;
    }

    fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>) {
        if self.frame == 1 {
            d.draw_rectangle(0, 0, 10, 10, RED);
            d.clear_background(RAYWHITE);
        }

        d.draw_text("hi", 1, 2, 10, BLACK);
    }
}

/// Outlines a box and shows the frame rate, counting its frames.
#[derive(Default)]
struct Outlined {
    frames: usize,
}

impl Game for Outlined {
    fn load<B: Backend>(_ctx: &mut Context<B>) -> Result<Self> {
        Ok(Self::default())
    }

    fn update(&mut self, _delta_time: f32) {
        self.frames += 1;
    }

    fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>) {
        d.clear_background(RAYWHITE);
        d.draw_rectangle_lines(20, 30, 40, 50, RED);
        d.draw_fps(10, 10);
    }
}

/// Fails after loading a texture.
struct Broken;

impl Game for Broken {
    fn load<B: Backend>(ctx: &mut Context<B>) -> Result<Self> {
        let _texture = ctx.load_texture_from_image(Image::new(1, 1, RED))?;

        miette::bail!("broken on purpose")
    }

    fn draw<B: Backend>(&self, _d: &mut Drawing<'_, B>) {}
}

#[test]
fn textures_are_released_once_before_closing() -> Result<()> {
    let (session, calls) = session::<Forgetful>(3, Config::default());
    BlockingLoop::new(None).run(session?)?;

    let all = calls.get();
    let destroyed = all
        .iter()
        .filter_map(|call| match call {
            Call::Destroy(id) => Some(*id),
            _ => None,
        })
        .collect::<Vec<_>>();
    let created = all
        .iter()
        .filter_map(|call| match call {
            Call::Create(id, _) => Some(*id),
            _ => None,
        })
        .collect::<Vec<_>>();

    // Both are released exactly once, the unloaded one first
    assert_eq!(created.len(), 2);
    assert_eq!(destroyed, created);

    // After the last frame, before the window is closed
    let last_end = calls.last_position(&Call::End).expect("no frames");
    let close = calls.position(&Call::Close).expect("never closed");
    assert_eq!(close, all.len() - 1);
    for (index, call) in all.iter().enumerate() {
        if matches!(call, Call::Destroy(_)) {
            assert!(index > last_end && index < close, "{all:?}");
        }
    }

    Ok(())
}

#[test]
fn loop_stops_when_close_is_requested() -> Result<()> {
    let (session, calls) = session::<Checked>(2, Config::default());
    BlockingLoop::new(None).run(session?)?;

    assert_eq!(calls.count(&Call::End), 2);
    assert_eq!(calls.count(&Call::Poll), 3);

    // Nothing is drawn after the poll that requested closing
    let all = calls.get();
    let last_poll = calls.last_position(&Call::Poll).expect("never polled");
    assert!(all[last_poll..]
        .iter()
        .all(|call| !matches!(call, Call::Begin | Call::Draw(_) | Call::End)));

    Ok(())
}

#[test]
fn frames_are_bracketed_and_cleared_first() -> Result<()> {
    let (session, calls) = session::<Overdraw>(2, Config::default());
    BlockingLoop::new(Some(1000)).run(session?)?;

    let text = Call::Draw(DrawCommand::Text {
        text: "hi".into(),
        position: Vec2::new(1.0, 2.0),
        font_size: 10,
        color: BLACK,
    });

    let frames = calls
        .get()
        .into_iter()
        .filter(|call| !matches!(call, Call::Poll | Call::Close))
        .collect::<Vec<_>>();
    assert_eq!(
        frames,
        [
            // The rectangle is overwritten by the clear
            Call::Begin,
            Call::Clear(RAYWHITE),
            text.clone(),
            Call::End,
            // Without clearing the configured background is used
            Call::Begin,
            Call::Clear(Config::default().background_color),
            text,
            Call::End,
        ]
    );

    Ok(())
}

#[test]
fn checkerboard_is_uploaded_and_drawn_centered() -> Result<()> {
    let (session, calls) = session::<Checked>(1, Config::default().with_size(800, 450));
    let session = session?;
    assert_eq!(session.context().loaded_textures(), 1);
    BlockingLoop::new(None).run(session)?;

    let all = calls.get();
    let Some((id, image)) = all.iter().find_map(|call| match call {
        Call::Create(id, image) => Some((*id, image)),
        _ => None,
    }) else {
        panic!("texture never created: {all:?}");
    };

    assert_eq!((image.width(), image.height()), (1024, 1024));
    assert_eq!(image.pixel(0, 0), Some(ORANGE));
    assert_eq!(image.pixel(32, 0), Some(GOLD));
    assert_eq!(image.pixel(32, 32), Some(ORANGE));

    assert!(all.contains(&Call::Draw(DrawCommand::Texture {
        id,
        position: Vec2::new(400.0 - 512.0, 225.0 - 512.0),
        tint: WHITE,
    })));

    Ok(())
}

#[test]
fn host_drives_frames_and_tears_down_on_shutdown() -> Result<()> {
    let host = ManualHost::default();
    let (session, calls) = session::<Checked>(0, Config::default());

    // Returns right after registering
    HostDriven::new(host.clone()).run(session?)?;
    assert!(!calls.get().iter().any(|call| matches!(call, Call::Begin)));

    host.signal(HostSignal::Frame);
    host.signal(HostSignal::Frame);
    assert_eq!(calls.count(&Call::End), 2);
    assert_eq!(calls.count(&Call::Close), 0);

    // The host delivers the events, the backend is never polled
    assert_eq!(calls.count(&Call::Poll), 0);

    host.signal(HostSignal::Shutdown);
    assert_eq!(calls.count(&Call::Close), 1);

    // Calls after shutting down don't touch the released session
    host.signal(HostSignal::Frame);
    host.signal(HostSignal::Shutdown);
    assert_eq!(calls.count(&Call::End), 2);
    assert_eq!(calls.count(&Call::Close), 1);
    assert_eq!(
        calls
            .get()
            .iter()
            .filter(|call| matches!(call, Call::Destroy(_)))
            .count(),
        1
    );

    Ok(())
}

#[test]
fn failed_load_closes_the_window() {
    let (session, calls) = session::<Broken>(5, Config::default());

    assert!(session.is_err());

    let all = calls.get();
    let Call::Create(id, _) = all[0] else {
        panic!("texture never created: {all:?}");
    };
    assert_eq!(all[1..], [Call::Destroy(id), Call::Close]);
}

#[test]
fn raw_texture_from_embedded_asset() -> Result<()> {
    let (backend, calls) = TestBackend::new(0);
    let assets =
        AssetSource::new().with_embedded_assets(embed_assets!["resources/fudesumi.raw"]);
    let mut ctx = Context::new(backend, Config::default(), assets);

    let texture =
        ctx.load_texture_raw("resources/fudesumi.raw", 384, 512, PixelFormat::R8G8B8A8, 0)?;
    assert_eq!((texture.width(), texture.height()), (384, 512));

    // Missing files are reported without creating a texture
    assert!(ctx.load_texture("resources/missing.png").is_err());
    assert_eq!(ctx.loaded_textures(), 1);

    ctx.unload_texture(texture);
    assert_eq!(ctx.loaded_textures(), 0);
    ctx.close();

    assert_eq!(calls.count(&Call::Close), 1);

    Ok(())
}

#[test]
fn outlines_and_frame_rate_are_recorded() -> Result<()> {
    let (session, calls) = session::<Outlined>(3, Config::default());
    let mut session = session?;

    // Drive the frames by hand
    while session.should_continue() {
        session.frame()?;
    }
    assert_eq!(session.game().frames, 3);

    let fps = session.context().frames_per_second();
    assert!(fps.is_finite(), "{fps}");

    let all = calls.get();
    let outlines = all
        .iter()
        .filter(|call| {
            **call
                == Call::Draw(DrawCommand::RectangleLines {
                    rect: Rectangle::new(20.0, 30.0, 40.0, 50.0),
                    color: RED,
                })
        })
        .count();
    assert_eq!(outlines, 3);

    let texts = all
        .iter()
        .filter_map(|call| match call {
            Call::Draw(DrawCommand::Text {
                text,
                position,
                font_size,
                color,
            }) => {
                assert_eq!(*position, Vec2::new(10.0, 10.0));
                assert_eq!(*font_size, 20);
                assert_eq!(*color, LIME);

                Some(text.to_string())
            }
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(texts.len(), 3);
    for text in &texts {
        let number = text.strip_suffix(" FPS").expect("no FPS suffix");
        assert!(number.parse::<u32>().is_ok(), "{text}");
    }

    // The last frame shows the rate the context ended up with
    assert_eq!(
        texts.last().map(String::as_str),
        Some(format!("{} FPS", fps.round() as u32).as_str())
    );

    session.teardown();
    assert_eq!(calls.count(&Call::Close), 1);

    Ok(())
}

#[test]
fn host_resizes_are_forwarded_to_the_backend() -> Result<()> {
    let host = ManualHost::default();
    let (session, calls) = session::<Outlined>(0, Config::default());
    HostDriven::new(host.clone()).run(session?)?;

    host.signal(HostSignal::Resize {
        width: 1600,
        height: 900,
    });
    host.signal(HostSignal::Frame);
    assert_eq!(calls.count(&Call::Resize(1600, 900)), 1);
    assert!(calls.position(&Call::Resize(1600, 900)) < calls.position(&Call::Begin));

    // Ignored once the session is released
    host.signal(HostSignal::Shutdown);
    host.signal(HostSignal::Resize {
        width: 10,
        height: 10,
    });
    assert_eq!(calls.count(&Call::Resize(10, 10)), 0);

    Ok(())
}
