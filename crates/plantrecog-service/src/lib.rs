//! # plantrecog-service - Remote Service and Platform Adapters
//!
//! Everything PlantRecog consumes but does not own: the prediction service
//! and the device primitives (permissions, camera, gallery).
//!
//! Depends on [`plantrecog_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Prediction Service
//! - [`PredictionService`] - Health check, class list, classification
//! - [`HttpPredictionClient`] - reqwest implementation
//! - [`ClassifyOutcome`] - Predictions or the no-prediction sentinel
//!
//! ### Platform
//! - [`PermissionPlatform`] / [`SystemPermissions`] - Camera and media library access
//! - [`CameraDevice`] / [`CommandCamera`] - Shutter primitive
//! - [`CaptureSession`] - Owned camera + working directory for prepared images
//! - [`list_images()`], [`PickerOptions`] - Gallery listing for the picker

pub mod camera;
pub mod client;
pub mod gallery;
pub mod image_prep;
pub mod permissions;
pub mod protocol;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use camera::{
    CameraDevice, CaptureOptions, CaptureSession, CommandCamera, OUTPUT_PLACEHOLDER,
    QUALITY_PLACEHOLDER,
};
pub use client::{
    parse_base_url, HttpPredictionClient, PredictionService, ServiceEndpoints,
    DEFAULT_SERVICE_URL,
};
pub use gallery::{list_images, GalleryEntry, PickerOptions, DEFAULT_EXTENSIONS};
pub use image_prep::Orientation;
pub use permissions::{PermissionPlatform, SystemPermissions};
pub use protocol::ClassifyOutcome;
