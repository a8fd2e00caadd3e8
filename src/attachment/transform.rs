use glam::{Mat4, Vec3};

/// Static local placement of a prop relative to a bone: a named
/// attachment location with a fixed offset, rotation, and scale.
/// Immutable configuration; one instance per attachment point.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentPoint {
    /// Name of the bone the prop follows.
    pub bone: String,
    /// Offset in the bone's local frame.
    pub offset: Vec3,
    /// Euler rotation in degrees, applied X then Y then Z. Attachment
    /// configs must be authored against this order.
    pub rotation_degrees: Vec3,
    pub scale: Vec3,
}

impl AttachmentPoint {
    #[must_use]
    pub fn new(bone: &str, offset: Vec3, rotation_degrees: Vec3, scale: Vec3) -> Self {
        Self {
            bone: bone.to_string(),
            offset,
            rotation_degrees,
            scale,
        }
    }
}

/// Composes the world matrix that bolts a prop onto a bone:
///
/// `model_root * bone_pose * T(offset) * Rx * Ry * Rz * S(scale)`
///
/// Translation and rotation apply in the bone's local frame before scale,
/// so a non-uniform scale never skews the offset direction. Invalid
/// (NaN/singular) inputs propagate silently; the matrices originate from
/// bounded upstream state.
#[must_use]
pub fn compute_attachment_matrix(
    model_root: Mat4,
    bone_pose: Mat4,
    point: &AttachmentPoint,
) -> Mat4 {
    model_root
        * bone_pose
        * Mat4::from_translation(point.offset)
        * Mat4::from_rotation_x(point.rotation_degrees.x.to_radians())
        * Mat4::from_rotation_y(point.rotation_degrees.y.to_radians())
        * Mat4::from_rotation_z(point.rotation_degrees.z.to_radians())
        * Mat4::from_scale(point.scale)
}
