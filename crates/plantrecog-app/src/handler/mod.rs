//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes

pub mod keys;
pub mod update;


use std::path::PathBuf;

use plantrecog_core::{ImageRef, PermissionResource};
use plantrecog_service::{CaptureOptions, PickerOptions};

use crate::acquisition::AcquisitionSource;
use crate::message::Message;
use crate::prediction::SubmissionId;

// Re-export main entry point
pub use keys::handle_key;
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Launch the four startup operations
    RunBootstrap,

    /// Prompt the platform, then resume `then` if granted
    RequestPermission {
        resource: PermissionResource,
        then: AcquisitionSource,
    },

    /// Trigger one shutter capture
    CapturePhoto { options: CaptureOptions },

    /// List the gallery directory for the picker
    LoadGallery {
        directory: PathBuf,
        extensions: Vec<String>,
    },

    /// Square-crop a picked file into the capture session
    ImportImage { path: PathBuf, options: PickerOptions },

    /// Upload the prepared image for classification
    Classify {
        submission: SubmissionId,
        image: ImageRef,
    },

    /// Delete a prepared image that will never be uploaded
    Release { image: ImageRef },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
