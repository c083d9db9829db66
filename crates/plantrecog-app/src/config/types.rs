//! Configuration types for PlantRecog
//!
//! Defines `Settings` and one struct per TOML section, plus the conversions
//! into the option types the service crate consumes.

use std::path::PathBuf;
use std::time::Duration;

use plantrecog_core::prelude::*;
use plantrecog_service::{
    CaptureOptions, CommandCamera, Orientation, PickerOptions, ServiceEndpoints,
    DEFAULT_EXTENSIONS, DEFAULT_SERVICE_URL,
};
use serde::{Deserialize, Serialize};

/// Global application settings from config.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceSettings,

    #[serde(default)]
    pub camera: CameraSettings,

    #[serde(default)]
    pub gallery: GallerySettings,

    #[serde(default)]
    pub ui: UiSettings,
}

/// Remote prediction service
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ServiceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_health_path")]
    pub health_path: String,

    #[serde(default = "default_classes_path")]
    pub classes_path: String,

    #[serde(default = "default_predict_path")]
    pub predict_path: String,

    /// Per-request timeout. Unset means wait for the service indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_path: default_health_path(),
            classes_path: default_classes_path(),
            predict_path: default_predict_path(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_health_path() -> String {
    "health".to_string()
}

fn default_classes_path() -> String {
    "recognized".to_string()
}

fn default_predict_path() -> String {
    "predict".to_string()
}

/// Camera capture tool
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CameraSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Capture program looked up on PATH
    #[serde(default = "default_camera_command")]
    pub command: String,

    /// Arguments; `{output}` and `{quality}` are substituted per shot
    #[serde(default = "default_camera_args")]
    pub args: Vec<String>,

    #[serde(default)]
    pub quality: f32,

    /// Clockwise rotation applied to each shot: 0, 90, 180 or 270
    #[serde(default)]
    pub rotation: u16,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_camera_command(),
            args: default_camera_args(),
            quality: 0.0,
            rotation: 0,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_camera_command() -> String {
    "fswebcam".to_string()
}

fn default_camera_args() -> Vec<String> {
    vec![
        "--no-banner".to_string(),
        "--jpeg".to_string(),
        "{quality}".to_string(),
        "{output}".to_string(),
    ]
}

/// Gallery picker
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GallerySettings {
    #[serde(default = "default_gallery_dir")]
    pub directory: PathBuf,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub quality: f32,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self {
            directory: default_gallery_dir(),
            extensions: default_extensions(),
            quality: 0.0,
        }
    }
}

fn default_gallery_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Pictures")))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UiSettings {
    /// Show the recognized class count in the status bar
    #[serde(default = "default_true")]
    pub show_class_count: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_class_count: true,
        }
    }
}

impl Settings {
    /// Resolve the service URLs, failing on an unusable base URL
    pub fn service_endpoints(&self) -> Result<ServiceEndpoints> {
        let mut endpoints = ServiceEndpoints::new(&self.service.base_url)?;
        endpoints.health_path = self.service.health_path.clone();
        endpoints.classes_path = self.service.classes_path.clone();
        endpoints.predict_path = self.service.predict_path.clone();
        endpoints.timeout = self.service.timeout_secs.map(Duration::from_secs);
        Ok(endpoints)
    }

    pub fn camera(&self) -> CommandCamera {
        CommandCamera::new(self.camera.command.clone(), self.camera.args.clone())
    }

    pub fn capture_options(&self) -> CaptureOptions {
        let orientation = match self.camera.rotation {
            0 => Orientation::Natural,
            90 => Orientation::Rotate90,
            180 => Orientation::Rotate180,
            270 => Orientation::Rotate270,
            other => {
                warn!("Unsupported camera rotation {}, using 0", other);
                Orientation::Natural
            }
        };
        CaptureOptions {
            quality: self.camera.quality,
            orientation,
        }
    }

    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            quality: self.gallery.quality,
            ..PickerOptions::default()
        }
    }
}
