// Asset loading for the animated character
//
// Loading is poll-driven: the world asks the loader for progress once per
// frame and reacts to whatever finished since the last poll.

mod loader;

pub use loader::{CharacterAssetSource, CharacterLoader, LoadEvent, StandardAssets};

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already requested: {0}")]
    AlreadyRequested(String),

    /// Raised by sources that read from disk or the network
    #[allow(dead_code)]
    #[error("Failed to load asset: {0}")]
    LoadError(String),
}
