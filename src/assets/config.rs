//! Rig configuration.
//!
//! A single JSON document describes one character rig: the skinned model
//! (the skeleton source), the optional prop model, per-role clip paths,
//! the two attachment points, and the character's root transform. Vector
//! fields are plain `[f32; 3]` arrays and are converted with
//! `Vec3::from_array` at build time.

use std::fs;
use std::path::Path;

use glam::{Mat4, Vec3};
use serde::Deserialize;

use crate::animation::ClipRole;
use crate::attachment::AttachmentPoint;
use crate::errors::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterConfig {
    /// Path to the skinned character model. Required; failing to load it
    /// is the one fatal initialization error.
    pub model: String,
    /// Path to the prop model. Optional; when absent or missing on disk
    /// the prop is never drawn.
    #[serde(default)]
    pub prop: Option<String>,
    #[serde(default)]
    pub clips: ClipPaths,
    pub hand: AttachmentPointConfig,
    pub holster: AttachmentPointConfig,
    #[serde(default)]
    pub root: RootTransformConfig,
}

impl CharacterConfig {
    /// Reads and parses a rig config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Per-role animation clip paths. Every entry is optional: a missing
/// entry, like an unloadable file, leaves the library slot empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipPaths {
    #[serde(default)]
    pub idle: Option<String>,
    #[serde(default)]
    pub grab: Option<String>,
    #[serde(default)]
    pub armed_idle: Option<String>,
    #[serde(default)]
    pub put_away: Option<String>,
    #[serde(default)]
    pub run: Option<String>,
    #[serde(default)]
    pub run_stop: Option<String>,
}

impl ClipPaths {
    #[must_use]
    pub fn get(&self, role: ClipRole) -> Option<&str> {
        let path = match role {
            ClipRole::Idle => &self.idle,
            ClipRole::Grab => &self.grab,
            ClipRole::ArmedIdle => &self.armed_idle,
            ClipRole::PutAway => &self.put_away,
            ClipRole::Run => &self.run,
            ClipRole::RunStop => &self.run_stop,
        };
        path.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentPointConfig {
    pub bone: String,
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default)]
    pub rotation_degrees: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],
}

impl AttachmentPointConfig {
    #[must_use]
    pub fn to_point(&self) -> AttachmentPoint {
        AttachmentPoint::new(
            &self.bone,
            Vec3::from_array(self.offset),
            Vec3::from_array(self.rotation_degrees),
            Vec3::from_array(self.scale),
        )
    }
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// World placement of the whole character: translate, then uniform scale.
#[derive(Debug, Clone, Deserialize)]
pub struct RootTransformConfig {
    #[serde(default)]
    pub offset: [f32; 3],
    #[serde(default = "default_uniform_scale")]
    pub scale: f32,
}

impl Default for RootTransformConfig {
    fn default() -> Self {
        Self {
            offset: [0.0; 3],
            scale: 1.0,
        }
    }
}

impl RootTransformConfig {
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::from_array(self.offset)) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

fn default_uniform_scale() -> f32 {
    1.0
}
