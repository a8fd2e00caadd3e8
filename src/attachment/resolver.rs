//! Bone-name resolution against the clip and skeleton tables.
//!
//! Clips and skeletons are authored independently and frequently disagree
//! on bone naming ("hand.R" vs "mixamorig:RightHand"-style drift). The
//! resolver reconciles the two tables with an exact-then-substring lookup
//! instead of requiring a manual remap table.

use glam::Mat4;

use crate::animation::clip::AnimationClip;
use crate::skeleton::Skeleton;

/// Result of a bone-name resolution. Always usable: unresolved names and
/// out-of-range ids yield identity matrices, which places the prop at the
/// model's local origin instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBone {
    /// Index into the pose-matrix array, when resolution succeeded.
    pub id: Option<usize>,
    /// The bone's pose matrix for the current frame.
    pub pose: Mat4,
    /// Inverse bind-pose offset from the skeleton's table.
    pub offset: Mat4,
}

impl ResolvedBone {
    pub const IDENTITY: ResolvedBone = ResolvedBone {
        id: None,
        pose: Mat4::IDENTITY,
        offset: Mat4::IDENTITY,
    };

    /// The bone pose converted back to model space by undoing the
    /// bind-pose offset baked into the pose matrix.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        self.pose * self.offset.inverse()
    }
}

/// Resolves semantic bone names to pose and offset matrices.
pub struct BoneResolver;

impl BoneResolver {
    /// Resolves `bone_name`, trying the active clip's table before the
    /// skeleton's. Never fails.
    ///
    /// Lookup order, first hit wins:
    /// 1. exact match in the clip's table (if non-empty),
    /// 2. case-insensitive substring scan over the clip's table,
    /// 3. exact match in the skeleton's table (with the original name),
    /// 4. substring scan over the skeleton's table.
    ///
    /// The offset always comes from the skeleton's table, looked up by the
    /// name that actually matched. When the match came from the clip's
    /// table under a spelling the skeleton does not know, the offset falls
    /// back to identity.
    #[must_use]
    pub fn resolve(
        bone_name: &str,
        active_clip: Option<&AnimationClip>,
        skeleton: &Skeleton,
        pose_matrices: &[Mat4],
    ) -> ResolvedBone {
        let mut id = None;
        let mut used_name = bone_name;

        if let Some(clip) = active_clip {
            if !clip.bone_table.is_empty() {
                if let Some(bone) = clip.bone_table.get(bone_name) {
                    id = Some(bone.id);
                } else if let Some(bone) = clip.bone_table.find_substring(bone_name) {
                    id = Some(bone.id);
                    used_name = &bone.name;
                }
            }
        }

        if id.is_none() {
            let table = skeleton.bone_table();
            if let Some(bone) = table.get(bone_name) {
                id = Some(bone.id);
                used_name = &bone.name;
            } else if let Some(bone) = table.find_substring(bone_name) {
                id = Some(bone.id);
                used_name = &bone.name;
            }
        }

        let Some(id) = id else {
            return ResolvedBone::IDENTITY;
        };
        let Some(&pose) = pose_matrices.get(id) else {
            return ResolvedBone::IDENTITY;
        };

        let offset = skeleton
            .bone_table()
            .get(used_name)
            .map_or(Mat4::IDENTITY, |bone| bone.offset);

        ResolvedBone {
            id: Some(id),
            pose,
            offset,
        }
    }
}
