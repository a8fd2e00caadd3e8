use std::sync::Arc;

use crate::animation::clip::AnimationClip;

/// The clip roles the state machine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipRole {
    Idle,
    Grab,
    ArmedIdle,
    PutAway,
    Run,
    RunStop,
}

impl ClipRole {
    pub const COUNT: usize = 6;

    pub const ALL: [ClipRole; Self::COUNT] = [
        ClipRole::Idle,
        ClipRole::Grab,
        ClipRole::ArmedIdle,
        ClipRole::PutAway,
        ClipRole::Run,
        ClipRole::RunStop,
    ];

    #[must_use]
    const fn slot(self) -> usize {
        self as usize
    }
}

/// Arena of named clip slots, owned by the character for the process
/// lifetime and released together when the character is dropped.
///
/// An empty slot represents a clip that failed to load (absent file,
/// unparsable asset). Every transition guard checks the target slot, so a
/// missing clip simply disables the transitions that need it.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    slots: [Option<Arc<AnimationClip>>; ClipRole::COUNT],
}

impl ClipLibrary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: ClipRole, clip: Arc<AnimationClip>) {
        self.slots[role.slot()] = Some(clip);
    }

    #[must_use]
    pub fn get(&self, role: ClipRole) -> Option<&Arc<AnimationClip>> {
        self.slots[role.slot()].as_ref()
    }

    /// Identity lookup: which role holds exactly this clip instance.
    ///
    /// Uses pointer identity rather than name or duration so two clips
    /// that happen to share a duration can never be confused. This is the
    /// check the completion handler uses to tell a finishing grab from a
    /// finishing stow.
    #[must_use]
    pub fn role_of(&self, clip: &Arc<AnimationClip>) -> Option<ClipRole> {
        ClipRole::ALL.into_iter().find(|role| {
            self.slots[role.slot()]
                .as_ref()
                .is_some_and(|slot| Arc::ptr_eq(slot, clip))
        })
    }
}
