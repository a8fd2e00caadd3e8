use crate::skeleton::BoneTable;

/// A single named animation with a fixed duration and an optional
/// clip-local bone naming table.
///
/// Clips carry no keyframe data here: sampling the pose belongs to the
/// skinning system that fills the player's pose buffer. What the driver
/// needs from a clip is its duration (for completion detection) and its
/// bone table (clips are frequently authored with different bone
/// spellings than the skeleton they are retargeted onto).
///
/// Immutable once loaded; shared behind `Arc` between the library and the
/// player for the process lifetime.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
    /// Clip-local bone table; may be empty, and may be a subset of the
    /// skeleton's table with divergent spellings for the same bones.
    pub bone_table: BoneTable,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: &str, duration: f32, bone_table: BoneTable) -> Self {
        Self {
            name: name.to_string(),
            duration,
            bone_table,
        }
    }
}
