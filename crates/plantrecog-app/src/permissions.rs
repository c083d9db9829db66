//! Permission coordinator
//!
//! Stores the last known state per resource and decides whether an
//! acquisition can proceed straight away or needs a platform prompt first.

use plantrecog_core::{PermissionResource, PermissionState};

/// Stored permission state for every resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PermissionSlots {
    camera: PermissionState,
    media_library: PermissionState,
}

impl PermissionSlots {
    pub fn get(&self, resource: PermissionResource) -> PermissionState {
        match resource {
            PermissionResource::Camera => self.camera,
            PermissionResource::MediaLibrary => self.media_library,
        }
    }

    pub fn set(&mut self, resource: PermissionResource, state: PermissionState) {
        match resource {
            PermissionResource::Camera => self.camera = state,
            PermissionResource::MediaLibrary => self.media_library = state,
        }
    }

    /// Decide whether `resource` can be used without prompting
    pub fn ensure(&self, resource: PermissionResource) -> EnsureDecision {
        if self.get(resource).is_granted() {
            EnsureDecision::Granted
        } else {
            EnsureDecision::NeedsPrompt
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureDecision {
    Granted,
    NeedsPrompt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_start_unknown() {
        let slots = PermissionSlots::default();
        for resource in PermissionResource::ALL {
            assert_eq!(slots.get(resource), PermissionState::Unknown);
            assert_eq!(slots.ensure(resource), EnsureDecision::NeedsPrompt);
        }
    }

    #[test]
    fn test_granted_never_needs_prompt() {
        let mut slots = PermissionSlots::default();
        slots.set(PermissionResource::Camera, PermissionState::Granted);
        assert_eq!(slots.ensure(PermissionResource::Camera), EnsureDecision::Granted);
        assert_eq!(
            slots.ensure(PermissionResource::MediaLibrary),
            EnsureDecision::NeedsPrompt
        );
    }

    #[test]
    fn test_denied_prompts_again() {
        let mut slots = PermissionSlots::default();
        slots.set(PermissionResource::MediaLibrary, PermissionState::Denied);
        assert_eq!(
            slots.ensure(PermissionResource::MediaLibrary),
            EnsureDecision::NeedsPrompt
        );
    }
}
