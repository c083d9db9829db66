//! Platform permission primitives
//!
//! On a desktop there is no OS permission dialog for cameras or photo
//! folders, so "granted" means the capability is actually usable: the
//! capture tool resolves on `PATH` (and the camera is enabled in config), or
//! the gallery directory can be read. Requesting simply re-evaluates, which
//! makes every resource re-askable after the user fixes their setup.

use std::path::PathBuf;

use plantrecog_core::prelude::*;
use plantrecog_core::{PermissionResource, PermissionState};

/// Permission request/status primitives for camera and media library
#[trait_variant::make(PermissionPlatform: Send)]
pub trait LocalPermissionPlatform {
    /// Ask for access. Suspends until the platform has an answer.
    async fn request(&self, resource: PermissionResource) -> Result<PermissionState>;

    /// Query the current state without prompting
    async fn status(&self, resource: PermissionResource) -> Result<PermissionState>;
}

/// Desktop permission rules derived from configuration
#[derive(Debug, Clone)]
pub struct SystemPermissions {
    camera_enabled: bool,
    capture_tool: String,
    gallery_dir: PathBuf,
}

impl SystemPermissions {
    pub fn new(camera_enabled: bool, capture_tool: impl Into<String>, gallery_dir: PathBuf) -> Self {
        Self {
            camera_enabled,
            capture_tool: capture_tool.into(),
            gallery_dir,
        }
    }

    fn camera_state(&self) -> PermissionState {
        if !self.camera_enabled {
            return PermissionState::Denied;
        }
        match which::which(&self.capture_tool) {
            Ok(path) => {
                debug!("Capture tool resolved to {}", path.display());
                PermissionState::Granted
            }
            Err(e) => {
                debug!("Capture tool '{}' not usable: {}", self.capture_tool, e);
                PermissionState::Denied
            }
        }
    }

    async fn media_library_state(&self) -> PermissionState {
        match tokio::fs::read_dir(&self.gallery_dir).await {
            Ok(_) => PermissionState::Granted,
            Err(e) => {
                debug!(
                    "Gallery directory {} not readable: {}",
                    self.gallery_dir.display(),
                    e
                );
                PermissionState::Denied
            }
        }
    }

    async fn evaluate(&self, resource: PermissionResource) -> PermissionState {
        match resource {
            PermissionResource::Camera => self.camera_state(),
            PermissionResource::MediaLibrary => self.media_library_state().await,
        }
    }
}

impl PermissionPlatform for SystemPermissions {
    async fn request(&self, resource: PermissionResource) -> Result<PermissionState> {
        let state = self.evaluate(resource).await;
        info!("Permission request for {}: {:?}", resource, state);
        Ok(state)
    }

    async fn status(&self, resource: PermissionResource) -> Result<PermissionState> {
        Ok(self.evaluate(resource).await)
    }
}
