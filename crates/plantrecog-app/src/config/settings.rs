//! Settings loader for config.toml

use std::path::{Path, PathBuf};

use plantrecog_core::prelude::*;

use super::types::Settings;

const CONFIG_FILENAME: &str = "config.toml";
const PROJECT_DIR: &str = ".plantrecog";
const APP_DIR: &str = "plantrecog";

const DEFAULT_CONFIG: &str = r#"# PlantRecog Configuration

[service]
base_url = "http://localhost:8080"
health_path = "health"
classes_path = "recognized"
predict_path = "predict"
# timeout_secs = 30    # Unset waits for the service indefinitely

[camera]
enabled = true
command = "fswebcam"
args = ["--no-banner", "--jpeg", "{quality}", "{output}"]
quality = 0.0          # 0.0 = smallest upload, 1.0 = best fidelity
rotation = 0           # 0, 90, 180 or 270

[gallery]
# directory = "/home/me/Pictures"
extensions = ["jpg", "jpeg", "png"]
quality = 0.0

[ui]
show_class_count = true
"#;

/// User-level config file: `<config_dir>/plantrecog/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILENAME))
}

/// Pick the config file to read
///
/// An explicit path wins, then `.plantrecog/config.toml` under `cwd`, then
/// the user-level file. Returns `None` when nothing exists.
pub fn resolve_config_path(explicit: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let project = cwd.join(PROJECT_DIR).join(CONFIG_FILENAME);
    if project.exists() {
        return Some(project);
    }

    default_config_path().filter(|path| path.exists())
}

/// Load settings from `path`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let Some(config_path) = path else {
        debug!("No config file, using defaults");
        return Settings::default();
    };

    if !config_path.exists() {
        warn!("Config file {:?} does not exist, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write the commented default config to `path` unless it already exists
///
/// Returns `true` when a file was written.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        debug!("Config already present at {:?}", path);
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", path, e)))?;
    info!("Created default config at {:?}", path);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_settings_defaults() {
        let settings = load_settings(None);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_missing_file() {
        let temp = tempdir().unwrap();
        let settings = load_settings(Some(&temp.path().join("nope.toml")));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_settings_custom() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[service]
base_url = "http://plants.local:5000"
timeout_secs = 20

[camera]
enabled = false

[gallery]
directory = "/srv/photos"
extensions = ["webp"]
"#,
        )
        .unwrap();

        let settings = load_settings(Some(&path));
        assert_eq!(settings.service.base_url, "http://plants.local:5000");
        assert_eq!(settings.service.health_path, "health");
        assert_eq!(settings.service.timeout_secs, Some(20));
        assert!(!settings.camera.enabled);
        assert_eq!(settings.camera.command, "fswebcam");
        assert_eq!(settings.gallery.directory, PathBuf::from("/srv/photos"));
        assert_eq!(settings.gallery.extensions, vec!["webp"]);
        assert!(settings.ui.show_class_count);
    }

    #[test]
    fn test_load_settings_invalid_toml() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "this is not valid toml {{{{").unwrap();

        let settings = load_settings(Some(&path));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_resolve_prefers_explicit_then_project() {
        let temp = tempdir().unwrap();
        let explicit = temp.path().join("custom.toml");
        assert_eq!(
            resolve_config_path(Some(&explicit), temp.path()),
            Some(explicit.clone())
        );

        let project = temp.path().join(PROJECT_DIR).join(CONFIG_FILENAME);
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "").unwrap();
        assert_eq!(resolve_config_path(None, temp.path()), Some(project));
    }

    #[test]
    fn test_init_config_writes_parseable_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join(CONFIG_FILENAME);

        assert!(init_config(&path).unwrap());
        let settings = load_settings(Some(&path));
        assert_eq!(settings.service, Settings::default().service);
        assert_eq!(settings.camera, Settings::default().camera);
    }

    #[test]
    fn test_init_config_idempotent() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[ui]\nshow_class_count = false\n").unwrap();

        assert!(!init_config(&path).unwrap());
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("show_class_count = false"));
    }
}
