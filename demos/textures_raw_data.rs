//! Load a texture from a file of raw pixels and generate another one in code.

use framedrive::{
    color::{fade, BROWN, GOLD, ORANGE, RAYWHITE, WHITE},
    AssetSource, Backend, Config, Context, Drawing, Game, Image, PixelFormat, Texture,
};

/// Path of the headerless sprite.
const FUDESUMI: &str = "resources/fudesumi.raw";

/// Both textures.
struct TexturesRawData {
    /// Sprite loaded from the raw file.
    fudesumi: Texture,
    /// Checkerboard generated in code.
    checked: Texture,
}

impl Game for TexturesRawData {
    fn load<B: Backend>(ctx: &mut Context<B>) -> miette::Result<Self> {
        let fudesumi = ctx.load_texture_raw(FUDESUMI, 384, 512, PixelFormat::R8G8B8A8, 0)?;

        // The pixels are freed as soon as the texture is uploaded
        let checked =
            ctx.load_texture_from_image(Image::checkerboard(1024, 1024, 32, ORANGE, GOLD))?;

        Ok(Self { fudesumi, checked })
    }

    fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>) {
        let width = d.screen_width() as i32;
        let height = d.screen_height() as i32;

        d.clear_background(RAYWHITE);

        d.draw_texture(
            &self.checked,
            width / 2 - self.checked.width() as i32 / 2,
            height / 2 - self.checked.height() as i32 / 2,
            fade(WHITE, 0.5),
        );
        d.draw_texture(&self.fudesumi, 430, -30, WHITE);

        d.draw_text("CHECKED TEXTURE ", 84, 100, 30, BROWN);
        d.draw_text("GENERATED by CODE", 72, 164, 30, BROWN);
        d.draw_text("and RAW IMAGE LOADING", 46, 226, 30, BROWN);

        d.draw_text(
            "(c) Fudesumi sprite by Eiden Marsal",
            310,
            height - 20,
            10,
            BROWN,
        );
    }

    fn unload<B: Backend>(self, ctx: &mut Context<B>) {
        ctx.unload_texture(self.fudesumi);
        ctx.unload_texture(self.checked);
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
        AssetSource::new().with_embedded_assets(framedrive::embed_assets!["resources/fudesumi.raw"])
    }
}

/// Run the game.
fn main() -> miette::Result<()> {
    TexturesRawData::run(
        asset_source(),
        Config::default()
            .with_size(800, 450)
            .with_title("raylib [textures] example - texture from raw data"),
    )
}
