//! Where assets are retrieved from.

use std::{borrow::Cow, path::PathBuf};

use miette::{Context, IntoDiagnostic, Result};

use super::loader::Loader;

/// Source of all assets.
#[derive(Debug, Clone)]
pub struct AssetSource {
    /// Path to the directory of all assets.
    ///
    /// Not set on the web, there all assets must be embedded into the binary.
    runtime_asset_dir: Option<PathBuf>,
    /// Assets directly embedded into the binary.
    embedded_assets: &'static [EmbeddedRawAsset],
}

impl AssetSource {
    /// Create a source without any assets.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            runtime_asset_dir: None,
            embedded_assets: &[],
        }
    }

    /// Set a runtime asset directory where assets can be loaded from.
    ///
    /// Asset paths are relative to this directory.
    #[inline]
    #[must_use]
    pub fn with_runtime_dir(mut self, runtime_asset_dir: impl Into<PathBuf>) -> Self {
        self.runtime_asset_dir = Some(runtime_asset_dir.into());

        self
    }

    /// Embed raw assets into the source.
    ///
    /// Use [`crate::embed_assets`] to create them.
    #[inline]
    #[must_use]
    pub fn with_embedded_assets(mut self, embedded_assets: &'static [EmbeddedRawAsset]) -> Self {
        self.embedded_assets = embedded_assets;

        self
    }

    /// Read the raw bytes of an asset.
    ///
    /// Embedded assets are tried first, then the runtime directory.
    ///
    /// # Errors
    ///
    /// - When the asset is not embedded and can't be read from disk.
    pub fn read(&self, path: &str) -> Result<Cow<'static, [u8]>> {
        // First try to read from memory
        if let Some(raw_asset) = self
            .embedded_assets
            .iter()
            .find(|raw_asset| raw_asset.path == path)
        {
            log::debug!("Reading embedded asset '{path}'");

            return Ok(Cow::Borrowed(raw_asset.bytes));
        }

        // If not found load from disk if dir set
        let Some(runtime_asset_dir) = &self.runtime_asset_dir else {
            miette::bail!("Asset '{path}' is not embedded and there's no asset directory to read it from");
        };

        let file_path = runtime_asset_dir.join(path);
        log::debug!("Reading asset '{path}' from '{}'", file_path.display());

        std::fs::read(&file_path)
            .map(Cow::Owned)
            .into_diagnostic()
            .wrap_err_with(|| format!("Error reading asset '{path}' from '{}'", file_path.display()))
    }

    /// Read an asset and decode it with a loader.
    ///
    /// # Errors
    ///
    /// - When the asset can't be read.
    /// - When the loader can't decode the asset.
    #[inline]
    pub fn load<L, T>(&self, path: &str, loader: &L) -> Result<T>
    where
        L: Loader<T>,
    {
        profiling::scope!("Load asset");

        let bytes = self.read(path)?;

        loader
            .load(&bytes)
            .wrap_err_with(|| format!("Error decoding asset '{path}'"))
    }
}

impl Default for AssetSource {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Single embedded asset in the binary.
#[derive(Debug)]
pub struct EmbeddedRawAsset {
    /// Path the asset is loaded with, including the extension.
    pub path: &'static str,
    /// Raw bytes of the asset.
    pub bytes: &'static [u8],
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{embed_assets, image::PixelFormat, RawLoader};

    static EMBEDDED: &[EmbeddedRawAsset] = &[EmbeddedRawAsset {
        path: "Cargo.toml",
        bytes: &[1, 2, 3, 4],
    }];

    #[test]
    fn embedded_wins_over_disk() {
        let source = AssetSource::new()
            .with_runtime_dir(env!("CARGO_MANIFEST_DIR"))
            .with_embedded_assets(EMBEDDED);

        assert_eq!(&*source.read("Cargo.toml").unwrap(), &[1, 2, 3, 4]);
    }

    #[test]
    fn reads_from_runtime_dir() {
        let source = AssetSource::new().with_runtime_dir(env!("CARGO_MANIFEST_DIR"));

        let bytes = source.read("Cargo.toml").unwrap();
        assert!(std::str::from_utf8(&bytes).unwrap().contains("framedrive"));
    }

    #[test]
    fn missing_asset_names_path() {
        let source = AssetSource::new().with_runtime_dir(env!("CARGO_MANIFEST_DIR"));
        let error = source.read("resources/does_not_exist.png").unwrap_err();
        assert!(format!("{error}").contains("resources/does_not_exist.png"));

        let error = AssetSource::new().read("anything.raw").unwrap_err();
        assert!(format!("{error}").contains("anything.raw"));
    }

    #[test]
    fn macro_embeds_files() {
        let source = AssetSource::new().with_embedded_assets(embed_assets!["Cargo.toml"]);

        assert_eq!(
            &*source.read("Cargo.toml").unwrap(),
            include_bytes!("../../Cargo.toml")
        );
    }

    #[test]
    fn load_decodes_with_loader() {
        let source = AssetSource::new().with_embedded_assets(EMBEDDED);

        let image = source
            .load(
                "Cargo.toml",
                &RawLoader {
                    width: 1,
                    height: 1,
                    format: PixelFormat::R8G8B8A8,
                    header_size: 0,
                },
            )
            .unwrap();
        assert_eq!(image.as_bytes(), &[1, 2, 3, 4]);

        // Not enough bytes for a larger image
        assert!(source
            .load(
                "Cargo.toml",
                &RawLoader {
                    width: 2,
                    height: 1,
                    format: PixelFormat::R8G8B8A8,
                    header_size: 0,
                },
            )
            .is_err());
    }
}
