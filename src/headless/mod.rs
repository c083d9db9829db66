//! Headless mode - NDJSON event output instead of the TUI
//!
//! Images are submitted one at a time, either the single `--image` path or
//! paths read from stdin (one per line). Every engine event is written to
//! stdout as one JSON object per line, with a millisecond timestamp.
//!
//! # Example Output
//!
//! ```json
//! {"event":"ready","service_up":true,"camera":"granted","media_library":"granted","recognized":["daisy","rose"],"timestamp":1704700001000}
//! {"event":"image_queued","path":"/tmp/rose.jpg","timestamp":1704700001005}
//! {"event":"processing","submission":1,"timestamp":1704700001100}
//! {"event":"prediction","submission":1,"primary":"Rose","score":0.92,"ranked":[{"name":"Rose","score":0.92}],"settled_at":1704700001880,"timestamp":1704700001900}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use plantrecog_app::EngineEvent;
use plantrecog_core::{PermissionState, PredictionItem};
use serde::Serialize;
use tracing::error;

pub use runner::{drive, run_headless};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Bootstrap settled
    Ready {
        service_up: bool,
        camera: PermissionState,
        media_library: PermissionState,
        recognized: Vec<String>,
        timestamp: i64,
    },

    /// A path was accepted for submission
    ImageQueued { path: String, timestamp: i64 },

    Processing { submission: u64, timestamp: i64 },

    /// Submission settled with a ranked result
    Prediction {
        submission: u64,
        primary: String,
        score: Option<f64>,
        ranked: Vec<PredictionItem>,
        /// When the service answer was applied, in milliseconds
        settled_at: i64,
        timestamp: i64,
    },

    PredictionFailed {
        submission: u64,
        settled_at: i64,
        timestamp: i64,
    },

    /// An alert the TUI would have shown
    Alert {
        fatal: bool,
        title: String,
        message: String,
        timestamp: i64,
    },

    /// Error outside the engine (stdin, startup)
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },

    Shutdown { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn image_queued(path: &std::path::Path) -> Self {
        Self::ImageQueued {
            path: path.display().to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

impl From<EngineEvent> for HeadlessEvent {
    fn from(event: EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::Ready {
                service_up,
                camera,
                media_library,
                recognized,
            } => Self::Ready {
                service_up,
                camera,
                media_library,
                recognized,
                timestamp,
            },
            EngineEvent::Processing { submission } => Self::Processing {
                submission,
                timestamp,
            },
            EngineEvent::PredictionSucceeded {
                submission,
                result,
                settled_at,
            } => Self::Prediction {
                submission,
                primary: result.primary.name,
                score: result.primary.score,
                ranked: result.ranked,
                settled_at: settled_at.timestamp_millis(),
                timestamp,
            },
            EngineEvent::PredictionFailed {
                submission,
                settled_at,
            } => Self::PredictionFailed {
                submission,
                settled_at: settled_at.timestamp_millis(),
                timestamp,
            },
            EngineEvent::AlertRaised {
                fatal,
                title,
                message,
            } => Self::Alert {
                fatal,
                title,
                message,
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }
}
