use std::path::PathBuf;

/// Errors that can occur while importing an asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The file could not be read or is not valid glTF.
    #[error("failed to import {path}: {source}")]
    Import {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    /// The model has no skin to take bone names from.
    #[error("{0} contains no skin")]
    NoSkin(PathBuf),

    /// The file has no animation, or none with readable channels.
    #[error("{0} contains no usable animation")]
    NoAnimation(PathBuf),

    /// The loader thread could not be started.
    #[error("failed to spawn loader thread: {0}")]
    Spawn(#[from] std::io::Error),
}
