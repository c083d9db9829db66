//! Configuration loading for PlantRecog

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config, load_settings, resolve_config_path};
pub use types::{CameraSettings, GallerySettings, ServiceSettings, Settings, UiSettings};
