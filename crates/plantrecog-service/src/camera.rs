//! Camera capture primitives and the capture session
//!
//! The capture session is the single owner of the camera device and of the
//! working directory that holds every prepared image. It lives as long as the
//! view that created it; dropping it removes the directory and its files.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

use plantrecog_core::prelude::*;
use plantrecog_core::ImageRef;
use tempfile::TempDir;
use tokio::process::Command;

use crate::image_prep::{self, jpeg_quality, Orientation};

/// Placeholder replaced with the output file path in capture arguments
pub const OUTPUT_PLACEHOLDER: &str = "{output}";
/// Placeholder replaced with the JPEG quality (1-100) in capture arguments
pub const QUALITY_PLACEHOLDER: &str = "{quality}";

/// Shutter configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// 0.0 (smallest upload) ..= 1.0 (best fidelity)
    pub quality: f32,
    pub orientation: Orientation,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            quality: 0.0,
            orientation: Orientation::Natural,
        }
    }
}

/// A live camera able to take one photo at a time
#[trait_variant::make(CameraDevice: Send)]
pub trait LocalCameraDevice {
    /// Take a photo and write it to `output`
    async fn take_photo(&self, output: &Path, options: &CaptureOptions) -> Result<()>;
}

/// Camera backed by an external capture program (e.g. `fswebcam`)
#[derive(Debug, Clone)]
pub struct CommandCamera {
    program: String,
    args: Vec<String>,
}

impl CommandCamera {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with placeholders filled in
    pub fn expand_args(&self, output: &Path, options: &CaptureOptions) -> Vec<String> {
        let output = output.to_string_lossy();
        let quality = jpeg_quality(options.quality).to_string();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(OUTPUT_PLACEHOLDER, &output)
                    .replace(QUALITY_PLACEHOLDER, &quality)
            })
            .collect()
    }
}

impl CameraDevice for CommandCamera {
    async fn take_photo(&self, output: &Path, options: &CaptureOptions) -> Result<()> {
        let program = which::which(&self.program)
            .map_err(|_| Error::capture_tool_not_found(self.program.clone()))?;
        let args = self.expand_args(output, options);
        debug!("Running capture: {} {:?}", program.display(), args);

        let result = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::capture(format!("failed to run {}: {}", self.program, e)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::capture(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }

        if !tokio::fs::try_exists(output).await.unwrap_or(false) {
            return Err(Error::capture(format!(
                "{} did not write {}",
                self.program,
                output.display()
            )));
        }

        Ok(())
    }
}

/// Explicitly owned capture session
///
/// Holds the camera and a private working directory. Both the shutter and
/// gallery picks prepare their upload image inside that directory.
pub struct CaptureSession<C> {
    camera: C,
    workdir: TempDir,
    counter: AtomicU64,
}

impl<C> std::fmt::Debug for CaptureSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("workdir", &self.workdir.path())
            .field("counter", &self.counter.load(Ordering::Relaxed))
            .finish()
    }
}

impl<C: CameraDevice> CaptureSession<C> {
    /// Open a session with a fresh temporary working directory
    pub fn open(camera: C) -> Result<Self> {
        let workdir = tempfile::Builder::new().prefix("plantrecog-").tempdir()?;
        debug!("Capture session opened at {}", workdir.path().display());
        Ok(Self {
            camera,
            workdir,
            counter: AtomicU64::new(0),
        })
    }

    pub fn workdir(&self) -> &Path {
        self.workdir.path()
    }

    fn next_path(&self, stem: &str, ext: &str) -> PathBuf {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.workdir.path().join(format!("{}-{}.{}", stem, n, ext))
    }

    /// Trigger the shutter and prepare the square upload image
    pub async fn capture(&self, options: CaptureOptions) -> Result<ImageRef> {
        let raw = self.next_path("capture", "raw.jpg");
        let shot = CameraDevice::take_photo(&self.camera, &raw, &options).await;
        let prepared = match shot {
            Ok(()) => {
                self.prepare(raw.clone(), options.quality, options.orientation)
                    .await
            }
            Err(e) => Err(e),
        };
        remove_quietly(&raw).await;
        prepared
    }

    /// Prepare an existing file (e.g. a gallery pick) for upload
    pub async fn import(&self, source: &Path, quality: f32) -> Result<ImageRef> {
        self.prepare(source.to_path_buf(), quality, Orientation::Natural)
            .await
    }

    async fn prepare(
        &self,
        source: PathBuf,
        quality: f32,
        orientation: Orientation,
    ) -> Result<ImageRef> {
        let dest = self.next_path("upload", "jpg");
        let dest_clone = dest.clone();
        let result = tokio::task::spawn_blocking(move || {
            image_prep::prepare_square(&source, &dest_clone, quality, orientation)
        })
        .await
        .map_err(|e| Error::task(format!("image preparation panicked: {}", e)))
        .and_then(|prepared| prepared);

        match result {
            Ok(()) => Ok(ImageRef::new(dest)),
            Err(e) => {
                remove_quietly(&dest).await;
                Err(e)
            }
        }
    }

    /// Delete a prepared image once its submission has settled.
    ///
    /// Paths outside the working directory are left alone.
    pub async fn release(&self, image: &ImageRef) {
        if image.path().starts_with(self.workdir.path()) {
            remove_quietly(image.path()).await;
        }
    }
}

async fn remove_quietly(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => trace!("Removed {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => debug!("Could not remove {}: {}", path.display(), e),
    }
}

impl<C> Drop for CaptureSession<C> {
    fn drop(&mut self) {
        debug!("Capture session released: {}", self.workdir.path().display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_args_fills_placeholders() {
        let camera = CommandCamera::new(
            "fswebcam",
            vec![
                "--no-banner".to_string(),
                "--jpeg".to_string(),
                "{quality}".to_string(),
                "{output}".to_string(),
            ],
        );
        let args = camera.expand_args(Path::new("/tmp/shot.jpg"), &CaptureOptions::default());
        assert_eq!(args, vec!["--no-banner", "--jpeg", "1", "/tmp/shot.jpg"]);
    }

    #[test]
    fn test_default_capture_is_lowest_quality() {
        let options = CaptureOptions::default();
        assert_eq!(options.quality, 0.0);
        assert_eq!(options.orientation, Orientation::Natural);
    }

    #[tokio::test]
    async fn test_missing_capture_program() {
        let camera = CommandCamera::new("plantrecog-no-such-camera", Vec::new());
        let err = CameraDevice::take_photo(
            &camera,
            Path::new("/tmp/never.jpg"),
            &CaptureOptions::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::CaptureToolNotFound { .. }));
    }

    #[tokio::test]
    async fn test_session_workdir_removed_on_drop() {
        let session = CaptureSession::open(CommandCamera::new("true", Vec::new())).unwrap();
        let dir = session.workdir().to_path_buf();
        assert!(dir.exists());

        drop(session);
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_session_import_prepares_square_copy() {
        let src_dir = tempfile::tempdir().unwrap();
        let source = src_dir.path().join("fern.png");
        image::RgbImage::from_pixel(30, 10, image::Rgb([10, 200, 10]))
            .save(&source)
            .unwrap();

        let session = CaptureSession::open(CommandCamera::new("true", Vec::new())).unwrap();
        let image = session.import(&source, 0.0).await.unwrap();

        assert!(image.path().starts_with(session.workdir()));
        let prepared = image::open(image.path()).unwrap();
        assert_eq!(image::GenericImageView::dimensions(&prepared), (10, 10));
        // The original is untouched
        assert!(source.exists());
    }

    struct GarbageCamera;

    impl CameraDevice for GarbageCamera {
        async fn take_photo(&self, output: &Path, _options: &CaptureOptions) -> Result<()> {
            tokio::fs::write(output, b"not an image").await?;
            Ok(())
        }
    }

    fn workdir_entries<C: CameraDevice>(session: &CaptureSession<C>) -> usize {
        std::fs::read_dir(session.workdir()).unwrap().count()
    }

    #[tokio::test]
    async fn test_failed_capture_leaves_workdir_empty() {
        let session = CaptureSession::open(GarbageCamera).unwrap();

        for _ in 0..3 {
            let err = session.capture(CaptureOptions::default()).await.unwrap_err();
            assert!(matches!(err, Error::Image { .. }));
        }

        assert_eq!(workdir_entries(&session), 0);
    }

    #[tokio::test]
    async fn test_release_removes_prepared_images() {
        let src_dir = tempfile::tempdir().unwrap();
        let source = src_dir.path().join("moss.png");
        image::RgbImage::from_pixel(12, 12, image::Rgb([20, 120, 20]))
            .save(&source)
            .unwrap();

        let session = CaptureSession::open(CommandCamera::new("true", Vec::new())).unwrap();
        for _ in 0..5 {
            let image = session.import(&source, 0.0).await.unwrap();
            session.release(&image).await;
        }

        assert_eq!(workdir_entries(&session), 0);
    }

    #[tokio::test]
    async fn test_release_ignores_paths_outside_workdir() {
        let src_dir = tempfile::tempdir().unwrap();
        let outside = src_dir.path().join("keep.jpg");
        std::fs::write(&outside, b"x").unwrap();

        let session = CaptureSession::open(CommandCamera::new("true", Vec::new())).unwrap();
        session.release(&ImageRef::new(&outside)).await;

        assert!(outside.exists());
    }
}
