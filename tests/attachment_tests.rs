//! Attachment math and playback tests.
//!
//! Tests for:
//! - attachment matrix composition order (translate, X→Y→Z rotate, scale)
//! - non-uniform scale leaving the offset direction untouched
//! - player hard cuts, time wrapping, and the completion window
//! - input edge/level semantics
//! - clip library role lookups by identity

use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat, Vec3, Vec4};

use holster::animation::{AnimationClip, AnimationPlayer, ClipLibrary, ClipRole};
use holster::attachment::{compute_attachment_matrix, AttachmentPoint};
use holster::input::{ButtonState, Command, Input};
use holster::skeleton::BoneTable;

const EPSILON: f32 = 1e-4;

fn mat_approx(a: Mat4, b: Mat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| (x - y).abs() < EPSILON)
}

fn clip(name: &str, duration: f32) -> Arc<AnimationClip> {
    Arc::new(AnimationClip::new(name, duration, BoneTable::new()))
}

fn hand_point() -> AttachmentPoint {
    AttachmentPoint::new(
        "hand.R",
        Vec3::new(0.5, 1.5, 0.0),
        Vec3::new(90.0, 90.0, 180.0),
        Vec3::splat(0.8),
    )
}

// ============================================================================
// Attachment matrix composition
// ============================================================================

#[test]
fn attachment_matrix_matches_reference_composition() {
    let root = Mat4::from_translation(Vec3::new(0.0, -0.4, 0.0)) * Mat4::from_scale(Vec3::splat(0.5));
    let pose = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
        * Mat4::from_quat(Quat::from_rotation_y(0.7));
    let point = hand_point();

    // Independent reference: the X→Y→Z rotation chain collapsed into one
    // euler quaternion.
    let rotation = Mat4::from_quat(Quat::from_euler(
        EulerRot::XYZ,
        point.rotation_degrees.x.to_radians(),
        point.rotation_degrees.y.to_radians(),
        point.rotation_degrees.z.to_radians(),
    ));
    let expected = root
        * pose
        * Mat4::from_translation(point.offset)
        * rotation
        * Mat4::from_scale(point.scale);

    let computed = compute_attachment_matrix(root, pose, &point);
    assert!(
        mat_approx(computed, expected),
        "composition order must be root * pose * T * Rx * Ry * Rz * S"
    );
}

#[test]
fn attachment_matrix_is_deterministic() {
    let root = Mat4::from_scale(Vec3::splat(0.5));
    let pose = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let point = hand_point();

    let first = compute_attachment_matrix(root, pose, &point);
    let second = compute_attachment_matrix(root, pose, &point);
    assert_eq!(first.to_cols_array(), second.to_cols_array());
}

#[test]
fn non_uniform_scale_does_not_skew_the_offset() {
    let point = AttachmentPoint::new(
        "hand.R",
        Vec3::new(0.5, 1.5, 0.0),
        Vec3::new(45.0, -30.0, 10.0),
        Vec3::new(2.0, 0.5, 1.0),
    );

    let computed = compute_attachment_matrix(Mat4::IDENTITY, Mat4::IDENTITY, &point);
    // Translation is applied before rotation and scale, so the prop's
    // origin sits exactly at the configured offset.
    assert!((computed.w_axis - Vec4::new(0.5, 1.5, 0.0, 1.0)).abs().max_element() < EPSILON);
}

#[test]
fn identity_inputs_place_the_prop_at_the_offset() {
    let point = AttachmentPoint::new("hand.R", Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::ONE);

    let computed = compute_attachment_matrix(Mat4::IDENTITY, Mat4::IDENTITY, &point);
    assert!(mat_approx(
        computed,
        Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
    ));
}

// ============================================================================
// Player: hard cuts and the completion window
// ============================================================================

#[test]
fn play_hard_cuts_to_time_zero() {
    let mut player = AnimationPlayer::new(2);
    let first = clip("first", 2.0);
    let second = clip("second", 1.0);

    player.play(&first);
    player.advance(1.5);
    assert!((player.current_time() - 1.5).abs() < EPSILON);

    player.play(&second);
    assert_eq!(player.current_time(), 0.0);
    assert!(Arc::ptr_eq(player.current_clip().unwrap(), &second));
}

#[test]
fn play_blended_ignores_blend_params_today() {
    let mut player = AnimationPlayer::new(2);
    let main = clip("main", 2.0);
    let transition = clip("transition", 0.5);

    player.play_blended(&main, Some(&transition), holster::BlendParams::default());
    assert!(Arc::ptr_eq(player.current_clip().unwrap(), &main));
    assert_eq!(player.current_time(), 0.0);
}

#[test]
fn advance_wraps_within_duration() {
    let mut player = AnimationPlayer::new(2);
    player.play(&clip("loop", 2.0));

    player.advance(2.5);
    assert!((player.current_time() - 0.5).abs() < EPSILON);

    // Negative deltas wrap from the other side and stay in range.
    player.advance(-0.8);
    assert!(player.current_time() >= 0.0);
    assert!(player.current_time() < 2.0);
    assert!((player.current_time() - 1.7).abs() < EPSILON);
}

#[test]
fn finished_uses_the_early_completion_window() {
    let mut player = AnimationPlayer::new(2);
    player.play(&clip("once", 1.0));

    player.advance(0.9);
    assert!(!player.finished(), "0.9 is outside the 0.05 window");

    player.advance(0.06);
    assert!(player.finished(), "0.96 is inside the window");
}

#[test]
fn zero_duration_clip_is_immediately_finished() {
    let mut player = AnimationPlayer::new(2);
    player.play(&clip("degenerate", 0.0));

    player.advance(0.5);
    assert_eq!(player.current_time(), 0.0);
    assert!(player.finished());
}

#[test]
fn empty_player_reports_finished() {
    let player = AnimationPlayer::new(2);
    assert!(player.current_clip().is_none());
    assert!(player.finished());
}

#[test]
fn pose_buffer_starts_identity_and_accepts_writes() {
    let mut player = AnimationPlayer::new(3);
    assert_eq!(player.pose_matrices().len(), 3);
    assert!(player.pose_matrices().iter().all(|m| *m == Mat4::IDENTITY));

    let pose = vec![Mat4::from_translation(Vec3::X); 3];
    player.set_pose_matrices(pose.clone());
    assert_eq!(player.pose_matrices(), pose.as_slice());
}

// ============================================================================
// Input edges
// ============================================================================

#[test]
fn command_edge_fires_once_per_press() {
    let mut input = Input::new();

    input.start_frame();
    input.inject(Command::SprintToggle, ButtonState::Pressed);
    assert!(input.get_down(Command::SprintToggle));
    assert!(input.get(Command::SprintToggle));

    // Still held the next frame: the edge is gone, the level remains.
    input.start_frame();
    assert!(!input.get_down(Command::SprintToggle));
    assert!(input.get(Command::SprintToggle));

    // Repeated press events while held do not re-fire the edge.
    input.inject(Command::SprintToggle, ButtonState::Pressed);
    assert!(!input.get_down(Command::SprintToggle));

    // Release then press fires again.
    input.start_frame();
    input.inject(Command::SprintToggle, ButtonState::Released);
    input.inject(Command::SprintToggle, ButtonState::Pressed);
    assert!(input.get_down(Command::SprintToggle));
}

#[test]
fn commands_are_tracked_independently() {
    let mut input = Input::new();
    input.inject(Command::Interact, ButtonState::Pressed);

    assert!(input.get(Command::Interact));
    assert!(!input.get(Command::Stop));
    assert!(!input.get_down(Command::SprintToggle));
}

// ============================================================================
// Clip library
// ============================================================================

#[test]
fn role_of_distinguishes_same_duration_clips() {
    let mut clips = ClipLibrary::new();
    let grab = clip("grab", 1.2);
    let put_away = clip("put_away", 1.2);
    clips.insert(ClipRole::Grab, Arc::clone(&grab));
    clips.insert(ClipRole::PutAway, Arc::clone(&put_away));

    assert_eq!(clips.role_of(&grab), Some(ClipRole::Grab));
    assert_eq!(clips.role_of(&put_away), Some(ClipRole::PutAway));

    let stranger = clip("grab", 1.2);
    assert_eq!(clips.role_of(&stranger), None, "identity, not equality");
}

#[test]
fn empty_slots_read_as_missing() {
    let clips = ClipLibrary::new();
    for role in ClipRole::ALL {
        assert!(clips.get(role).is_none());
    }
}
