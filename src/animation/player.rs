use std::sync::Arc;

use glam::Mat4;

use crate::animation::clip::AnimationClip;

/// Early-completion tolerance in seconds.
///
/// A clip counts as finished once playback is within this window of its
/// end, so completion transitions fire one frame before the exact end
/// sample and the pose never pops on the final frame. Must stay larger
/// than a frame's delta for the window to be unmissable.
pub const COMPLETION_EPSILON: f32 = 0.05;

/// Blend parameters accepted by [`AnimationPlayer::play_blended`].
///
/// Playback is hard-cut only, so these are currently ignored; the
/// signature reserves room for cross-fade playback.
#[derive(Debug, Clone, Copy)]
pub struct BlendParams {
    pub fade_in: f32,
    pub start_offset: f32,
    pub weight: f32,
}

impl Default for BlendParams {
    fn default() -> Self {
        Self {
            fade_in: 0.0,
            start_offset: 0.0,
            weight: 1.0,
        }
    }
}

/// Hard-cut playback state for a single character.
///
/// The player owns clip selection, the playback clock, and the final
/// pose-matrix buffer. It does not sample keyframes: the skinning system
/// recomputes the pose buffer after every [`AnimationPlayer::advance`]
/// through [`AnimationPlayer::set_pose_matrices`], and the driver only
/// consumes it.
#[derive(Debug, Clone, Default)]
pub struct AnimationPlayer {
    current: Option<Arc<AnimationClip>>,
    time: f32,
    pose_matrices: Vec<Mat4>,
}

impl AnimationPlayer {
    /// Creates a player with an identity pose for `bone_count` bones.
    #[must_use]
    pub fn new(bone_count: usize) -> Self {
        Self {
            current: None,
            time: 0.0,
            pose_matrices: vec![Mat4::IDENTITY; bone_count],
        }
    }

    /// Starts `clip` at time zero, discarding the previous clip's state
    /// (hard cut). The pose buffer is left as-is until the next skinning
    /// write.
    pub fn play(&mut self, clip: &Arc<AnimationClip>) {
        self.current = Some(Arc::clone(clip));
        self.time = 0.0;
    }

    /// [`AnimationPlayer::play`] with a transition clip and blend
    /// parameters, both ignored at hard-cut granularity.
    pub fn play_blended(
        &mut self,
        clip: &Arc<AnimationClip>,
        _transition: Option<&Arc<AnimationClip>>,
        _params: BlendParams,
    ) {
        self.play(clip);
    }

    /// Moves playback forward by `dt` seconds, wrapping on the clip
    /// duration. Time stays in `[0, duration)` for any sign of `dt`;
    /// zero-duration clips pin it to zero.
    pub fn advance(&mut self, dt: f32) {
        let Some(clip) = &self.current else {
            return;
        };
        if clip.duration <= 0.0 {
            self.time = 0.0;
            return;
        }
        self.time = (self.time + dt).rem_euclid(clip.duration);
    }

    #[inline]
    #[must_use]
    pub fn current_clip(&self) -> Option<&Arc<AnimationClip>> {
        self.current.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.time
    }

    /// True once playback has entered the completion window of the
    /// current clip. A player with no clip reports finished.
    #[must_use]
    pub fn finished(&self) -> bool {
        match &self.current {
            Some(clip) => self.time >= clip.duration - COMPLETION_EPSILON,
            None => true,
        }
    }

    /// The final pose matrices for this frame, indexed by bone id.
    /// Read-only snapshot, valid until the next skinning write.
    #[must_use]
    pub fn pose_matrices(&self) -> &[Mat4] {
        &self.pose_matrices
    }

    /// Replaces the pose buffer with the skinning system's output for
    /// this frame.
    pub fn set_pose_matrices(&mut self, matrices: Vec<Mat4>) {
        self.pose_matrices = matrices;
    }
}
