//! Resolving and decoding resource files.

pub mod loader;
mod source;

pub use loader::{png::PngLoader, raw::RawLoader, Loader};
pub use source::{AssetSource, EmbeddedRawAsset};

/// Embed resource files into the binary.
///
/// Paths are relative to the root of the package calling the macro, and are also the paths the assets are loaded with.
///
/// Required on the web, where there's no file system to read from.
///
/// # Example
///
/// ```rust
/// # use framedrive::{embed_assets, AssetSource};
/// let source = AssetSource::new().with_embedded_assets(embed_assets!["Cargo.toml"]);
/// ```
#[macro_export]
macro_rules! embed_assets {
    ($($path:literal),* $(,)?) => {{
        static ASSETS: &[$crate::assets::EmbeddedRawAsset] = &[$(
            $crate::assets::EmbeddedRawAsset {
                path: $path,
                bytes: include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/", $path)),
            }
        ),*];

        ASSETS
    }};
}
