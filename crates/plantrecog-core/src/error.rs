//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Prediction Service Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Prediction service request failed: {message}")]
    Http { message: String },

    #[error("Prediction service returned {status} for {endpoint}")]
    ServiceStatus { status: u16, endpoint: String },

    #[error("Malformed service payload: {message}")]
    MalformedPayload { message: String },

    #[error("Invalid service URL: {message}")]
    InvalidUrl { message: String },

    // ─────────────────────────────────────────────────────────────
    // Platform Errors (camera, gallery, images)
    // ─────────────────────────────────────────────────────────────
    #[error("Camera capture failed: {message}")]
    Capture { message: String },

    #[error("Capture tool '{tool}' not found on PATH")]
    CaptureToolNotFound { tool: String },

    #[error("Gallery error: {message}")]
    Gallery { message: String },

    #[error("Image processing failed for {path}: {message}")]
    Image { path: PathBuf, message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration / Task Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Background task failed: {message}")]
    Task { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
        }
    }

    pub fn service_status(status: u16, endpoint: impl Into<String>) -> Self {
        Self::ServiceStatus {
            status,
            endpoint: endpoint.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }

    pub fn capture_tool_not_found(tool: impl Into<String>) -> Self {
        Self::CaptureToolNotFound { tool: tool.into() }
    }

    pub fn gallery(message: impl Into<String>) -> Self {
        Self::Gallery {
            message: message.into(),
        }
    }

    pub fn image(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Image {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn task(message: impl Into<String>) -> Self {
        Self::Task {
            message: message.into(),
        }
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InvalidUrl { .. } | Error::TerminalInit(_))
    }
}
