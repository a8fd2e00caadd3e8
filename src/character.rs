//! Top-level frame driver for one rigged character.
//!
//! Owns every long-lived resource the rig needs — skeleton, clip library,
//! player, state machine, attachment points — for the process lifetime;
//! they are released together when the `Character` drops. Per frame the
//! driver consumes one input snapshot and a time delta, resolves all
//! state transitions, and only then advances playback, so draw-time
//! queries always see the pose of the clip active *after* this frame's
//! transition.

use std::path::Path;
use std::sync::Arc;

use glam::Mat4;

use crate::animation::{
    AnimationPlayer, AnimationStateMachine, AttachmentSlot, CharacterState, ClipLibrary, ClipRole,
    StateInput,
};
use crate::assets;
use crate::assets::config::CharacterConfig;
use crate::attachment::{compute_attachment_matrix, AttachmentPoint, BoneResolver, ResolvedBone};
use crate::errors::Result;
use crate::input::{Command, Input};
use crate::skeleton::Skeleton;

pub struct Character {
    skeleton: Skeleton,
    clips: ClipLibrary,
    player: AnimationPlayer,
    state_machine: AnimationStateMachine,
    hand: AttachmentPoint,
    holster: AttachmentPoint,
    root_matrix: Mat4,
    prop_available: bool,
}

impl Character {
    /// Builds a character and starts the idle clip if its slot is filled.
    #[must_use]
    pub fn new(
        skeleton: Skeleton,
        clips: ClipLibrary,
        hand: AttachmentPoint,
        holster: AttachmentPoint,
    ) -> Self {
        let mut player = AnimationPlayer::new(skeleton.bone_count());
        if let Some(idle) = clips.get(ClipRole::Idle) {
            player.play(idle);
        }

        Self {
            skeleton,
            clips,
            player,
            state_machine: AnimationStateMachine::new(),
            hand,
            holster,
            root_matrix: Mat4::IDENTITY,
            prop_available: true,
        }
    }

    /// Loads a character from a rig config: the skeleton (fatal on
    /// failure), every configured clip (missing ones leave their slot
    /// empty), the attachment points, and the root transform.
    pub fn from_config(config: &CharacterConfig) -> Result<Self> {
        let skeleton = assets::load_skeleton(Path::new(&config.model))?;

        let mut clips = ClipLibrary::new();
        for role in ClipRole::ALL {
            if let Some(path) = config.clips.get(role) {
                if let Some(clip) = assets::load_clip(Path::new(path), &skeleton) {
                    clips.insert(role, clip);
                }
            }
        }

        let prop_available = config
            .prop
            .as_deref()
            .is_some_and(|path| Path::new(path).exists());
        if !prop_available {
            log::warn!("prop model unavailable; prop rendering disabled");
        }

        let mut character = Self::new(
            skeleton,
            clips,
            config.hand.to_point(),
            config.holster.to_point(),
        );
        character.prop_available = prop_available;
        character.root_matrix = config.root.to_matrix();
        Ok(character)
    }

    /// Advances one frame: state transitions first (input edges, then the
    /// completion poll), then playback time. The skinning system should
    /// write the new pose through [`Character::player_mut`] afterwards.
    pub fn advance(&mut self, input: &Input, dt: f32) {
        let signals = StateInput {
            sprint_pressed: input.get_down(Command::SprintToggle),
            stop_pressed: input.get_down(Command::Stop),
            interact_held: input.get(Command::Interact),
        };
        self.state_machine
            .update(&signals, &self.clips, &mut self.player);
        self.player.advance(dt);
    }

    #[must_use]
    pub fn state(&self) -> CharacterState {
        self.state_machine.state()
    }

    #[must_use]
    pub fn is_carrying(&self) -> bool {
        self.state_machine.is_carrying()
    }

    #[must_use]
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    #[must_use]
    pub fn clips(&self) -> &ClipLibrary {
        &self.clips
    }

    #[must_use]
    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    /// Mutable player access: the seam through which the external
    /// skinning system writes each frame's final pose matrices.
    pub fn player_mut(&mut self) -> &mut AnimationPlayer {
        &mut self.player
    }

    #[must_use]
    pub fn root_matrix(&self) -> Mat4 {
        self.root_matrix
    }

    pub fn set_root_matrix(&mut self, matrix: Mat4) {
        self.root_matrix = matrix;
    }

    pub fn set_prop_available(&mut self, available: bool) {
        self.prop_available = available;
    }

    /// Skin matrices for this frame, indexed by bone id. Read-only
    /// snapshot valid for exactly one frame.
    #[must_use]
    pub fn pose_matrices(&self) -> &[Mat4] {
        self.player.pose_matrices()
    }

    /// The attachment point the prop follows in the current state.
    #[must_use]
    pub fn active_point(&self) -> &AttachmentPoint {
        match self.state_machine.active_slot() {
            AttachmentSlot::Hand => &self.hand,
            AttachmentSlot::Holster => &self.holster,
        }
    }

    /// World matrix for the prop this frame. Unresolvable bones degrade
    /// to the model's local origin via the resolver's identity fallback.
    #[must_use]
    pub fn attachment_matrix(&self) -> Mat4 {
        let point = self.active_point();
        let resolved = self.resolve_bone(&point.bone);
        compute_attachment_matrix(self.root_matrix, resolved.model_matrix(), point)
    }

    /// [`Character::attachment_matrix`], gated on the prop model being
    /// available: `None` means the render stage skips the prop draw
    /// entirely.
    #[must_use]
    pub fn prop_attachment(&self) -> Option<Mat4> {
        self.prop_available.then(|| self.attachment_matrix())
    }

    /// Resolves a bone name against the active clip and the skeleton.
    #[must_use]
    pub fn resolve_bone(&self, bone_name: &str) -> ResolvedBone {
        BoneResolver::resolve(
            bone_name,
            self.player.current_clip().map(Arc::as_ref),
            &self.skeleton,
            self.player.pose_matrices(),
        )
    }
}
