//! Asset import for character rigs.
//!
//! Two kinds of input: the JSON rig config (which assets to load, where
//! the prop bolts on) and the glTF files it points at. Meshes, materials,
//! and textures are the render side's business; the loaders here pull
//! only what the animation layer needs.

pub mod config;
pub mod loaders;

pub use config::CharacterConfig;
pub use loaders::gltf::{load_clip, load_skeleton};
