//! Gallery listing for the image picker

use std::path::{Path, PathBuf};

use plantrecog_core::prelude::*;

/// Default file extensions offered by the picker
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Picker configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PickerOptions {
    /// Forced crop aspect ratio (width, height)
    pub aspect: (u32, u32),
    /// Require an edit-confirmation step before the pick is final
    pub allows_editing: bool,
    /// Only a single image may be chosen
    pub single_selection: bool,
    /// Re-encode quality, 0.0..=1.0
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            aspect: (1, 1),
            allows_editing: true,
            single_selection: true,
            quality: 0.0,
        }
    }
}

/// One image in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub path: PathBuf,
    pub name: String,
    pub size_bytes: u64,
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// List images directly inside `dir`, sorted by file name
pub async fn list_images(dir: &Path, extensions: &[String]) -> Result<Vec<GalleryEntry>> {
    let mut reader = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| Error::gallery(format!("cannot read {}: {}", dir.display(), e)))?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let path = entry.path();
        if !has_extension(&path, extensions) {
            continue;
        }
        let metadata = match entry.metadata().await {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(e) => {
                trace!("Skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        entries.push(GalleryEntry {
            path,
            name,
            size_bytes: metadata.len(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Gallery {} has {} images", dir.display(), entries.len());
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_extensions() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_list_images_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tulip.PNG"), b"x").unwrap();
        std::fs::write(dir.path().join("aloe.jpg"), b"xx").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let entries = list_images(dir.path(), &default_extensions()).await.unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["aloe.jpg", "tulip.PNG"]);
        assert_eq!(entries[0].size_bytes, 2);
    }

    #[tokio::test]
    async fn test_list_images_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_images(&dir.path().join("gone"), &default_extensions())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Gallery { .. }));
    }

    #[test]
    fn test_picker_defaults_square_single_with_editing() {
        let options = PickerOptions::default();
        assert_eq!(options.aspect, (1, 1));
        assert!(options.allows_editing);
        assert!(options.single_selection);
        assert_eq!(options.quality, 0.0);
    }
}
