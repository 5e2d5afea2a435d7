//! Session state shared between loading, drawing and unloading.

mod drawing;
mod texture;

pub use drawing::Drawing;
use hashbrown::HashSet;
use miette::{Result, WrapErr};
pub use texture::Texture;

use crate::{
    assets::{AssetSource, PngLoader, RawLoader},
    backend::{Backend, DrawCommand, TextureId},
    image::{Image, PixelFormat},
    Config,
};

/// Weight of the previous average when smoothing the frame rate.
const FPS_SMOOTHED_AVERAGE_ALPHA: f32 = 0.8;

/// State of a single window session.
///
/// Exposed in [`crate::Game::load`] and [`crate::Game::unload`], drawing happens through the [`Drawing`] bracket from [`Self::begin_drawing`].
///
/// Every texture loaded through the context is tracked, when the context is closed the left-over textures are released before the window.
pub struct Context<B: Backend> {
    /// Window and renderer.
    backend: B,
    /// Settings the window was opened with.
    config: Config,
    /// Where paths are resolved.
    assets: AssetSource,
    /// Textures that are still alive on the backend.
    textures: HashSet<TextureId>,
    /// Identifier the next texture will get.
    next_texture_id: u32,
    /// Smoothed average of the frames per second.
    frames_per_second: f32,
    /// Command buffer reused between frames.
    commands: Vec<DrawCommand>,
}

impl<B: Backend> Context<B> {
    /// Start a session on an opened backend.
    ///
    /// # Arguments
    ///
    /// * `backend` - Window the session draws to, must be opened with the same `config`.
    /// * `config` - Settings of the window.
    /// * `assets` - Where texture paths are resolved.
    #[inline]
    #[must_use]
    pub fn new(backend: B, config: Config, assets: AssetSource) -> Self {
        log::debug!("Starting context for '{}'", config.title);

        Self {
            backend,
            config,
            assets,
            textures: HashSet::new(),
            next_texture_id: 0,
            frames_per_second: 0.0,
            commands: Vec::new(),
        }
    }

    /// Logical width of the drawable part of the window in pixels.
    #[inline]
    #[must_use]
    pub const fn screen_width(&self) -> u32 {
        self.config.width
    }

    /// Logical height of the drawable part of the window in pixels.
    #[inline]
    #[must_use]
    pub const fn screen_height(&self) -> u32 {
        self.config.height
    }

    /// Smoothed average of the frames per second.
    #[inline]
    #[must_use]
    pub const fn frames_per_second(&self) -> f32 {
        self.frames_per_second
    }

    /// Settings the window was opened with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Amount of textures that still need to be unloaded.
    #[inline]
    #[must_use]
    pub fn loaded_textures(&self) -> usize {
        self.textures.len()
    }

    /// Load a PNG image file as a texture.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the image relative to the asset source, for example `"resources/raylib_logo.png"`.
    ///
    /// # Errors
    ///
    /// - When the file could not be found.
    /// - When the file is not a valid PNG image.
    /// - When the texture could not be uploaded.
    #[inline]
    pub fn load_texture(&mut self, path: &str) -> Result<Texture> {
        let image = self
            .assets
            .load(path, &PngLoader)
            .wrap_err_with(|| format!("Error loading texture '{path}'"))?;

        self.load_texture_from_image(image)
    }

    /// Load a file of headerless pixels as a texture.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the file relative to the asset source.
    /// * `width` - Horizontal pixels in the file.
    /// * `height` - Vertical pixels in the file.
    /// * `format` - How each pixel is encoded.
    /// * `header_size` - Bytes to skip before the first pixel.
    ///
    /// # Errors
    ///
    /// - When the file could not be found.
    /// - When the file contains less pixels than requested.
    /// - When the texture could not be uploaded.
    #[inline]
    pub fn load_texture_raw(
        &mut self,
        path: &str,
        width: u32,
        height: u32,
        format: PixelFormat,
        header_size: usize,
    ) -> Result<Texture> {
        let loader = RawLoader {
            width,
            height,
            format,
            header_size,
        };
        let image = self
            .assets
            .load(path, &loader)
            .wrap_err_with(|| format!("Error loading raw texture '{path}'"))?;

        self.load_texture_from_image(image)
    }

    /// Upload an image as a texture.
    ///
    /// The image is consumed: its pixels are freed after uploading, also when uploading fails.
    ///
    /// # Errors
    ///
    /// - When the texture could not be uploaded.
    #[inline]
    pub fn load_texture_from_image(&mut self, image: Image) -> Result<Texture> {
        let id = TextureId(self.next_texture_id);
        self.next_texture_id += 1;

        self.backend
            .create_texture(id, &image)
            .wrap_err_with(|| format!("Error uploading texture {id}"))?;
        self.textures.insert(id);

        Ok(Texture::new(id, image.width(), image.height()))
    }

    /// Release a texture.
    ///
    /// Takes the handle so it can't be used or released again.
    #[inline]
    pub fn unload_texture(&mut self, texture: Texture) {
        let id = texture.id();

        if self.textures.remove(&id) {
            self.backend.destroy_texture(id);
        } else {
            log::warn!("Texture {id} doesn't belong to this context");
        }
    }

    /// Start drawing a frame.
    ///
    /// The frame is shown when the returned bracket is ended or dropped.
    #[inline]
    pub fn begin_drawing(&mut self) -> Drawing<'_, B> {
        Drawing::new(self)
    }

    /// Release all textures that are still loaded and close the window.
    #[inline]
    pub fn close(mut self) {
        // Release in creation order for predictable behavior
        let mut leftover = self.textures.drain().collect::<Vec<_>>();
        leftover.sort_unstable();

        for id in leftover {
            log::warn!("Texture {id} was never unloaded, releasing it before closing");

            self.backend.destroy_texture(id);
        }

        self.backend.close();
    }

    /// Process window events.
    ///
    /// # Returns
    ///
    /// - `true` when closing was requested.
    pub(crate) fn poll_events(&mut self) -> bool {
        self.backend.poll_events()
    }

    /// Resize the drawable surface, the logical screen size stays the same.
    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.backend.resize(width, height);
    }

    /// Add the duration of a frame to the frame rate average.
    pub(crate) fn register_frame_time(&mut self, frame_time: f32) {
        if frame_time <= 0.0 {
            return;
        }

        self.frames_per_second = FPS_SMOOTHED_AVERAGE_ALPHA
            .mul_add(self.frames_per_second, (1.0 - FPS_SMOOTHED_AVERAGE_ALPHA) * frame_time.recip());
    }
}
