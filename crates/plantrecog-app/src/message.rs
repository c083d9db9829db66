//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use plantrecog_core::{ImageRef, PermissionResource, PermissionState};
use plantrecog_service::GalleryEntry;

use crate::acquisition::AcquisitionSource;
use crate::bootstrap::BootstrapReport;
use crate::input_key::InputKey;
use crate::prediction::{SubmissionId, SubmissionOutcome};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Bootstrap
    // ─────────────────────────────────────────────────────────
    /// All four startup operations settled
    BootstrapSettled(BootstrapReport),

    // ─────────────────────────────────────────────────────────
    // Alerts
    // ─────────────────────────────────────────────────────────
    /// Dismiss the front notice
    DismissAlert,
    /// Acknowledge the fatal alert; terminates the process
    CloseApp,

    // ─────────────────────────────────────────────────────────
    // Acquisition
    // ─────────────────────────────────────────────────────────
    /// Shutter pressed
    CaptureRequested,
    /// Open the gallery picker
    PickRequested,
    /// Submit a file given on the command line
    SubmitFile { path: PathBuf },
    /// Platform answered a permission prompt
    PermissionResolved {
        resource: PermissionResource,
        state: PermissionState,
        then: AcquisitionSource,
    },
    /// Gallery directory listed
    GalleryLoaded { entries: Vec<GalleryEntry> },
    GalleryLoadFailed { error: String },
    PickerUp,
    PickerDown,
    PickerFirst,
    PickerLast,
    /// Enter in the picker (open crop confirmation, or confirm it)
    PickerAccept,
    /// Esc in the picker (leave confirmation, or cancel the pick)
    PickerBack,
    /// Prepared image ready to upload
    ImageAcquired { image: ImageRef },
    AcquisitionFailed { error: String },

    // ─────────────────────────────────────────────────────────
    // Prediction
    // ─────────────────────────────────────────────────────────
    /// Classification call settled
    PredictionSettled {
        submission: SubmissionId,
        outcome: SubmissionOutcome,
    },

    /// Show or hide the recognized class list
    ToggleClassList,
}
