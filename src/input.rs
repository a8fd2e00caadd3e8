//! Platform-agnostic input state for the character driver.
//!
//! A windowing adapter translates raw key events into logical [`Command`]s
//! and injects them here; the driver reads one snapshot per frame. Keeping
//! the container free of any GUI-library types lets the state machine run
//! headless in tests.

use std::collections::HashSet;

/// Logical command signals consumed by the state machine.
///
/// Directional movement stays with the camera/input collaborator and never
/// reaches the animation layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Toggles between armed-idle and running.
    SprintToggle,
    /// Secondary key that also stops a run.
    Stop,
    /// Grabs or stows the prop depending on the current state.
    Interact,
}

/// Button state reported by the platform adapter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Per-frame input container.
///
/// `just_pressed` records a command only on the Released→Pressed
/// transition, so [`Input::get_down`] fires once per press no matter how
/// many frames the key stays held.
#[derive(Debug, Clone, Default)]
pub struct Input {
    pressed: HashSet<Command>,
    just_pressed: HashSet<Command>,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears transient edge state at the start of each frame.
    pub fn start_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Injects a command event from the platform adapter.
    pub fn inject(&mut self, command: Command, state: ButtonState) {
        match state {
            ButtonState::Pressed => {
                if self.pressed.insert(command) {
                    self.just_pressed.insert(command);
                }
            }
            ButtonState::Released => {
                self.pressed.remove(&command);
            }
        }
    }

    /// Checks whether a command is currently held down.
    #[must_use]
    pub fn get(&self, command: Command) -> bool {
        self.pressed.contains(&command)
    }

    /// Checks whether a command was pressed this frame.
    #[must_use]
    pub fn get_down(&self, command: Command) -> bool {
        self.just_pressed.contains(&command)
    }
}
