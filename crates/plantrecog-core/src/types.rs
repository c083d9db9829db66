//! Core domain types shared by every PlantRecog crate

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Label shown as the primary heading before any result arrives
pub const PLACEHOLDER_LABEL: &str = "PlantRecog";

/// Label shown while a submission is in flight
pub const PROCESSING_LABEL: &str = "Processing Image...";

/// Whether the first frame may be rendered.
///
/// Flips `NotReady -> Ready` exactly once, after the bootstrap batch settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadinessState {
    #[default]
    NotReady,
    Ready,
}

impl ReadinessState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ReadinessState::Ready)
    }
}

/// A device capability guarded by a platform permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionResource {
    Camera,
    MediaLibrary,
}

impl PermissionResource {
    pub const ALL: [PermissionResource; 2] =
        [PermissionResource::Camera, PermissionResource::MediaLibrary];

    /// Non-fatal notice shown when the permission is not granted
    pub fn denied_notice(&self) -> &'static str {
        match self {
            PermissionResource::Camera => "App does not have permission for the Camera!",
            PermissionResource::MediaLibrary => "Not having enough permission to open gallery!",
        }
    }
}

impl fmt::Display for PermissionResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionResource::Camera => write!(f, "camera"),
            PermissionResource::MediaLibrary => write!(f, "media library"),
        }
    }
}

/// Authorization state of a single resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    #[default]
    Unknown,
    Denied,
    Granted,
}

impl PermissionState {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

/// One classification candidate.
///
/// `score` is `None` only for placeholder entries, never in a settled
/// successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionItem {
    pub name: String,
    pub score: Option<f64>,
}

impl PredictionItem {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score: Some(score),
        }
    }

    /// An entry with no score
    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.score.is_none()
    }

    /// "name: score" as shown in the ranked list
    pub fn display_line(&self) -> String {
        match self.score {
            Some(score) => format!("{}: {}", self.name, score),
            None => self.name.clone(),
        }
    }
}

/// The user-visible prediction: a primary label and the ranked candidates.
///
/// `ranked` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub primary: PredictionItem,
    pub ranked: Vec<PredictionItem>,
}

impl Default for PredictionResult {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl PredictionResult {
    /// The idle state shown before the first real result
    pub fn placeholder() -> Self {
        Self {
            primary: PredictionItem::placeholder(PLACEHOLDER_LABEL),
            ranked: vec![PredictionItem::placeholder("")],
        }
    }

    /// Build a settled result from the service's ordered predictions.
    ///
    /// Returns `None` if there is nothing usable to show.
    pub fn from_predictions(predictions: Vec<PredictionItem>) -> Option<Self> {
        let primary = predictions.first()?.clone();
        if primary.is_placeholder() {
            return None;
        }
        Some(Self {
            primary,
            ranked: predictions,
        })
    }

    /// True while `ranked` holds the null-score placeholder
    pub fn is_placeholder(&self) -> bool {
        self.ranked.first().map_or(true, PredictionItem::is_placeholder)
    }
}

/// Lifecycle of the (single) image submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestLifecycle {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl RequestLifecycle {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, RequestLifecycle::Submitting)
    }
}

/// Local reference to a prepared image ready for upload
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageRef {
    path: PathBuf,
}

impl ImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used for the multipart upload
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image.jpg".to_string())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_result_is_non_empty() {
        let result = PredictionResult::placeholder();
        assert_eq!(result.primary.name, PLACEHOLDER_LABEL);
        assert_eq!(result.ranked.len(), 1);
        assert!(result.is_placeholder());
    }

    #[test]
    fn test_from_predictions_keeps_service_order() {
        let result = PredictionResult::from_predictions(vec![
            PredictionItem::new("Rose", 0.92),
            PredictionItem::new("Tulip", 0.4),
        ])
        .unwrap();

        assert_eq!(result.primary, PredictionItem::new("Rose", 0.92));
        assert_eq!(result.ranked[0].name, "Rose");
        assert_eq!(result.ranked[1].name, "Tulip");
        assert!(!result.is_placeholder());
    }

    #[test]
    fn test_from_predictions_does_not_resort() {
        let result = PredictionResult::from_predictions(vec![
            PredictionItem::new("Daisy", 0.1),
            PredictionItem::new("Lily", 0.8),
        ])
        .unwrap();
        assert_eq!(result.primary.name, "Daisy");
        assert_eq!(result.ranked[1].name, "Lily");
    }

    #[test]
    fn test_from_empty_predictions_is_unusable() {
        assert!(PredictionResult::from_predictions(Vec::new()).is_none());
    }

    #[test]
    fn test_from_null_score_predictions_is_unusable() {
        assert!(PredictionResult::from_predictions(vec![PredictionItem::placeholder("x")]).is_none());
    }

    #[test]
    fn test_display_line() {
        assert_eq!(PredictionItem::new("Rose", 0.92).display_line(), "Rose: 0.92");
        assert_eq!(PredictionItem::placeholder("Rose").display_line(), "Rose");
    }

    #[test]
    fn test_permission_state_defaults_unknown() {
        assert_eq!(PermissionState::default(), PermissionState::Unknown);
        assert!(!PermissionState::Denied.is_granted());
        assert!(PermissionState::Granted.is_granted());
    }

    #[test]
    fn test_denied_notices_differ_per_resource() {
        assert!(PermissionResource::Camera.denied_notice().contains("Camera"));
        assert!(PermissionResource::MediaLibrary
            .denied_notice()
            .contains("gallery"));
    }

    #[test]
    fn test_image_ref_file_name() {
        let image = ImageRef::new("/tmp/session/capture-1.jpg");
        assert_eq!(image.file_name(), "capture-1.jpg");
    }

    #[test]
    fn test_prediction_item_deserializes_wire_shape() {
        let item: PredictionItem = serde_json::from_str(r#"{"name":"Rose","score":0.92}"#).unwrap();
        assert_eq!(item, PredictionItem::new("Rose", 0.92));
    }
}
