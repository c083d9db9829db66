//! # plantrecog-core - Core Domain Types
//!
//! Foundation crate for PlantRecog. Provides domain types, error handling and
//! logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`PredictionItem`], [`PredictionResult`] - What the user sees
//! - [`RequestLifecycle`] - State of the single in-flight submission
//! - [`PermissionResource`], [`PermissionState`] - Camera / media library authorization
//! - [`ReadinessState`] - Whether the first frame may be drawn
//! - [`ImageRef`] - A prepared local image ready for upload
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `is_fatal` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use plantrecog_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all PlantRecog crates
pub mod prelude {
    pub use super::error::{Error, Result};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result};
pub use types::{
    ImageRef, PermissionResource, PermissionState, PredictionItem, PredictionResult,
    ReadinessState, RequestLifecycle, PLACEHOLDER_LABEL, PROCESSING_LABEL,
};
