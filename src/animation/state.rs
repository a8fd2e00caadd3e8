//! Character animation state machine.
//!
//! Five mutually exclusive logical states with completion-driven
//! transitions. Completion is polled once per frame against the player's
//! clock — there are no callbacks — and every transition that starts a
//! clip is guarded on that clip's library slot being filled, so a missing
//! asset skips the transition instead of crashing.
//!
//! The transitional phases (grabbing, stowing, run-stop) are not tracked
//! with separate booleans: grabbing and stowing are states of their own,
//! and "stopping" is `Running` plus the run-stop clip being the one
//! currently playing. The carried flag is the only extra bit, and it only
//! flips on clip completion.

use crate::animation::library::{ClipLibrary, ClipRole};
use crate::animation::player::AnimationPlayer;

/// Logical character state. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterState {
    Idle,
    ArmedIdle,
    Running,
    Grabbing,
    Stowing,
}

/// Which attachment point the prop should follow this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSlot {
    Hand,
    Holster,
}

/// Per-frame command signals, already resolved to edges by the input
/// layer. Sprint and stop are edge-triggered; interact is level-triggered
/// and relies on the state guards for idempotence.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateInput {
    /// Sprint toggle was pressed this frame.
    pub sprint_pressed: bool,
    /// Secondary stop key was pressed this frame.
    pub stop_pressed: bool,
    /// Interact key is held this frame.
    pub interact_held: bool,
}

/// Drives [`CharacterState`] from input edges and clip completion.
#[derive(Debug, Clone)]
pub struct AnimationStateMachine {
    state: CharacterState,
    carrying: bool,
}

impl Default for AnimationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationStateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: CharacterState::Idle,
            carrying: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> CharacterState {
        self.state
    }

    /// Whether the character currently carries the prop. Flips to true
    /// when a grab completes and back to false when a stow completes.
    #[must_use]
    pub fn is_carrying(&self) -> bool {
        self.carrying
    }

    /// The attachment point the prop follows in the current state: the
    /// hand while carried, mid-grab, mid-stow, or running; the holster
    /// otherwise.
    #[must_use]
    pub fn active_slot(&self) -> AttachmentSlot {
        if self.carrying
            || matches!(
                self.state,
                CharacterState::Grabbing | CharacterState::Stowing | CharacterState::Running
            )
        {
            AttachmentSlot::Hand
        } else {
            AttachmentSlot::Holster
        }
    }

    /// Runs one frame of transitions: input-driven first, then the
    /// completion poll, so any clip switch is fully resolved before the
    /// caller advances the player and resolves bones for this frame.
    pub fn update(&mut self, input: &StateInput, clips: &ClipLibrary, player: &mut AnimationPlayer) {
        self.handle_input(input, clips, player);
        self.poll_completion(clips, player);
    }

    /// True while the run-stop clip is the one currently playing.
    #[must_use]
    pub fn is_stopping(&self, clips: &ClipLibrary, player: &AnimationPlayer) -> bool {
        self.state == CharacterState::Running && playing(clips, player, ClipRole::RunStop)
    }

    fn handle_input(
        &mut self,
        input: &StateInput,
        clips: &ClipLibrary,
        player: &mut AnimationPlayer,
    ) {
        if input.sprint_pressed {
            match self.state {
                CharacterState::ArmedIdle => {
                    if let Some(run) = clips.get(ClipRole::Run) {
                        player.play(run);
                        self.set_state(CharacterState::Running);
                    }
                }
                CharacterState::Running if !self.is_stopping(clips, player) => {
                    if let Some(stop) = clips.get(ClipRole::RunStop) {
                        player.play(stop);
                    }
                }
                _ => {}
            }
        }

        if input.stop_pressed
            && self.state == CharacterState::Running
            && !self.is_stopping(clips, player)
        {
            if let Some(stop) = clips.get(ClipRole::RunStop) {
                player.play(stop);
            }
        }

        if input.interact_held {
            match self.state {
                CharacterState::Idle if !self.carrying => {
                    if let Some(grab) = clips.get(ClipRole::Grab) {
                        player.play(grab);
                        self.set_state(CharacterState::Grabbing);
                    }
                }
                CharacterState::ArmedIdle if self.carrying => {
                    if let Some(put_away) = clips.get(ClipRole::PutAway) {
                        player.play(put_away);
                        self.set_state(CharacterState::Stowing);
                    }
                }
                _ => {}
            }
        }
    }

    /// Completion poll. The finishing clip's library role is cross-checked
    /// against the current state so a finishing grab can never be handled
    /// as a finishing stow, even if both clips share a duration.
    fn poll_completion(&mut self, clips: &ClipLibrary, player: &mut AnimationPlayer) {
        if !player.finished() {
            return;
        }

        match self.state {
            CharacterState::Grabbing if playing(clips, player, ClipRole::Grab) => {
                if let Some(armed_idle) = clips.get(ClipRole::ArmedIdle) {
                    self.carrying = true;
                    player.play(armed_idle);
                    self.set_state(CharacterState::ArmedIdle);
                }
            }
            CharacterState::Stowing if playing(clips, player, ClipRole::PutAway) => {
                if let Some(idle) = clips.get(ClipRole::Idle) {
                    self.carrying = false;
                    player.play(idle);
                    self.set_state(CharacterState::Idle);
                }
            }
            CharacterState::Running if playing(clips, player, ClipRole::RunStop) => {
                if let Some(armed_idle) = clips.get(ClipRole::ArmedIdle) {
                    player.play(armed_idle);
                    self.set_state(CharacterState::ArmedIdle);
                }
            }
            CharacterState::Running => {
                // Run loops: restart it from zero inside the completion
                // window.
                if let Some(run) = clips.get(ClipRole::Run) {
                    player.play(run);
                }
            }
            _ => {}
        }
    }

    fn set_state(&mut self, next: CharacterState) {
        if self.state != next {
            log::debug!("character state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

/// Whether the player's current clip is the library's clip for `role`,
/// by pointer identity.
fn playing(clips: &ClipLibrary, player: &AnimationPlayer, role: ClipRole) -> bool {
    match player.current_clip() {
        Some(current) => clips.role_of(current) == Some(role),
        None => false,
    }
}
