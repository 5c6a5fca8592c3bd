//! Background loading of the avatar model and its walk clip.
//!
//! Each request runs on its own thread and reports exactly one [`AssetEvent`]
//! through a channel. The frame loop polls [`AssetLoader::drain`] once per tick
//! and reacts to whatever has arrived; nothing ever blocks on a load.

mod error;
mod gltf_import;
mod loader;

pub use error::AssetError;
pub use gltf_import::{load_skeleton, load_walk_clip};
pub use loader::{AssetEvent, AssetLoader, AssetRequest};
