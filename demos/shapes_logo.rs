//! Draw the raylib logo using only rectangles and text.

use framedrive::{
    color::{BLACK, GRAY, RAYWHITE},
    AssetSource, Backend, Config, Context, Drawing, Game,
};

/// Nothing to load, everything is drawn with shapes.
struct ShapesLogo;

impl Game for ShapesLogo {
    fn load<B: Backend>(_ctx: &mut Context<B>) -> miette::Result<Self> {
        Ok(Self)
    }

    /// Draw the logo in the center of the screen.
    fn draw<B: Backend>(&self, d: &mut Drawing<'_, B>) {
        let width = d.screen_width() as i32;
        let height = d.screen_height() as i32;

        d.clear_background(RAYWHITE);

        d.draw_rectangle(width / 2 - 128, height / 2 - 128, 256, 256, BLACK);
        d.draw_rectangle(width / 2 - 112, height / 2 - 112, 224, 224, RAYWHITE);
        d.draw_text("raylib", width / 2 - 44, height / 2 + 48, 50, BLACK);

        d.draw_text("this is NOT a texture!", 350, 370, 10, GRAY);
    }
}

/// Run the game.
fn main() -> miette::Result<()> {
    ShapesLogo::run(
        AssetSource::new(),
        Config::default()
            .with_size(800, 450)
            .with_title("raylib [shapes] example - raylib logo using shapes"),
    )
}
