//! Modal alerts shown over the main view

use plantrecog_core::PermissionResource;

/// Whether the user can dismiss the alert and keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Single acknowledgement action that terminates the process
    Fatal,
    /// Dismissable, the app stays usable
    Notice,
}

/// A titled alert with one action button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertState {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub action_label: String,
}

impl AlertState {
    pub fn notice(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Notice,
            title: title.into(),
            message: message.into(),
            action_label: "OK".to_string(),
        }
    }

    /// Service health check came back negative at startup
    pub fn service_unavailable() -> Self {
        Self {
            kind: AlertKind::Fatal,
            title: "Oh! Snap".to_string(),
            message: "The service is currently unavailable, please check later!".to_string(),
            action_label: "Close App".to_string(),
        }
    }

    pub fn permission_denied(resource: PermissionResource) -> Self {
        Self::notice("Oh! Snap", resource.denied_notice())
    }

    pub fn classification_failed() -> Self {
        Self::notice("Ops", "Looks like something bad happened, please try again!")
    }

    pub fn acquisition_failed() -> Self {
        Self::notice("Oh! Snap", "Could not get the picture, please try again!")
    }

    pub fn gallery_unavailable() -> Self {
        Self::notice("Oh! Snap", "Could not read the gallery folder!")
    }

    pub fn is_fatal(&self) -> bool {
        self.kind == AlertKind::Fatal
    }
}
