//! Asset loader helper.

pub mod png;
pub mod raw;

use miette::Result;

/// How an asset should be decoded.
pub trait Loader<T> {
    /// Decode an asset from raw bytes.
    ///
    /// # Errors
    ///
    /// - When the bytes are not a valid asset for this loader.
    fn load(&self, bytes: &[u8]) -> Result<T>;
}
