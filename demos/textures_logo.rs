//! Load a PNG image from the resources and draw it as a texture.

use framedrive::{
    color::{GRAY, RAYWHITE, WHITE},
    AssetSource, Backend, Config, Context, Drawing, Game, Texture,
};

/// Path of the logo image.
const LOGO: &str = "resources/raylib_logo.png";

/// Logo texture loaded from disk.
struct TexturesLogo {
    /// Uploaded image.
    texture: Texture,
}

impl Game for TexturesLogo {
    /// Textures can only be loaded after the window is opened.
    fn load<B: Backend>(ctx: &mut Context<B>) -> miette::Result<Self> {
        let texture = ctx.load_texture(LOGO)?;

        Ok(Self { texture })
    }

    fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>) {
        let x = d.screen_width() as i32 / 2 - self.texture.width() as i32 / 2;
        let y = d.screen_height() as i32 / 2 - self.texture.height() as i32 / 2;

        d.clear_background(RAYWHITE);

        d.draw_texture(&self.texture, x, y, WHITE);

        d.draw_text("this IS a texture!", 360, 370, 10, GRAY);
    }

    /// Release the texture before the window closes.
    fn unload<B: Backend>(self, ctx: &mut Context<B>) {
        ctx.unload_texture(self.texture);
    }
}

/// Resolve the resources from the package directory, or from the binary on the web.
fn asset_source() -> AssetSource {
    #[cfg(not(target_arch = "wasm32"))]
    {
        AssetSource::new().with_runtime_dir(env!("CARGO_MANIFEST_DIR"))
    }

    #[cfg(target_arch = "wasm32")]
    {
        AssetSource::new().with_embedded_assets(framedrive::embed_assets![
            "resources/raylib_logo.png"
        ])
    }
}

/// Run the game.
fn main() -> miette::Result<()> {
    TexturesLogo::run(
        asset_source(),
        Config::default()
            .with_size(800, 450)
            .with_title("raylib [textures] example - texture loading and drawing"),
    )
}
