//! Domain events emitted by the Engine for external consumers
//!
//! The headless runner subscribes to these and prints them as NDJSON.
//! Events are broadcast after each message processing cycle, derived from a
//! before/after snapshot of the state.

use chrono::{DateTime, Local};
use plantrecog_core::{PermissionState, PredictionResult};
use serde::Serialize;

use crate::alert::AlertState;
use crate::prediction::SubmissionId;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Bootstrap batch settled and the app is usable
    Ready {
        service_up: bool,
        camera: PermissionState,
        media_library: PermissionState,
        recognized: Vec<String>,
    },

    /// A submission entered Processing
    Processing { submission: u64 },

    PredictionSucceeded {
        submission: u64,
        result: PredictionResult,
        settled_at: DateTime<Local>,
    },

    PredictionFailed {
        submission: u64,
        settled_at: DateTime<Local>,
    },

    AlertRaised {
        fatal: bool,
        title: String,
        message: String,
    },

    Shutdown,
}

impl EngineEvent {
    pub fn processing(submission: SubmissionId) -> Self {
        EngineEvent::Processing {
            submission: submission.value(),
        }
    }

    pub fn alert(alert: &AlertState) -> Self {
        EngineEvent::AlertRaised {
            fatal: alert.is_fatal(),
            title: alert.title.clone(),
            message: alert.message.clone(),
        }
    }
}
