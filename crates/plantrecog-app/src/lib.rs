//! plantrecog-app - Application state and orchestration for PlantRecog
//!
//! This crate implements the TEA (The Elm Architecture) pattern for state
//! management: the bootstrap batch, the permission coordinator, image
//! acquisition and the prediction state machine, plus the Engine shared by
//! the TUI and headless runners and configuration loading.

pub mod acquisition;
pub mod actions;
pub mod alert;
pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod permissions;
pub mod platform;
pub mod prediction;
pub mod process;
pub mod signals;
pub mod splash;
pub mod state;

// Re-export primary types
pub use acquisition::{AcquisitionSource, GalleryPickerState};
pub use alert::{AlertKind, AlertState};
pub use bootstrap::BootstrapReport;
pub use config::Settings;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use input_key::InputKey;
pub use message::Message;
pub use platform::{Collaborators, Platform, SystemPlatform};
pub use prediction::{PredictionStateMachine, SubmissionId, SubmissionOutcome};
pub use splash::SplashScreen;
pub use state::{AppPhase, AppState, ExitReason, UiMode};
