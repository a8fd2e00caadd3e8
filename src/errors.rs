//! Error Types
//!
//! The main error type [`HolsterError`] covers the failure modes of the
//! rig driver: asset import, configuration parsing, and IO.
//!
//! Per-frame operations never return errors. Unresolved bone names and
//! out-of-range bone ids degrade to identity transforms, and a clip that
//! failed to load is represented as an empty library slot, which disables
//! the transitions that need it. Only initialization (loading the base
//! model and parsing the rig config) goes through [`Result`].

use thiserror::Error;

/// The main error type for the rig driver.
#[derive(Error, Debug)]
pub enum HolsterError {
    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ========================================================================
    // Asset Import Errors
    // ========================================================================
    /// glTF parsing or import error.
    #[error("glTF error: {0}")]
    Gltf(String),

    /// The model file contains no skin to build a skeleton from.
    #[error("model has no skin: {0}")]
    MissingSkin(String),

    /// The animation file contains no animations.
    #[error("file has no animations: {0}")]
    MissingAnimation(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<gltf::Error> for HolsterError {
    fn from(err: gltf::Error) -> Self {
        HolsterError::Gltf(err.to_string())
    }
}

/// Alias for `Result<T, HolsterError>`.
pub type Result<T> = std::result::Result<T, HolsterError>;
