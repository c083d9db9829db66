//! Platform seam
//!
//! Bundles the three collaborators the engine drives (prediction service,
//! permission platform, camera) behind one type parameter so the TUI, the
//! headless runner and the tests can swap them as a set.

use std::sync::Arc;

use plantrecog_core::prelude::*;
use plantrecog_service::{
    CameraDevice, CaptureSession, CommandCamera, HttpPredictionClient, PermissionPlatform,
    PredictionService, SystemPermissions,
};

use crate::config::Settings;

/// A set of collaborator implementations
pub trait Platform: Send + Sync + 'static {
    type Service: PredictionService + Sync + 'static;
    type Permissions: PermissionPlatform + Sync + 'static;
    type Camera: CameraDevice + Sync + 'static;
}

/// Live collaborators for one platform
pub struct Collaborators<P: Platform> {
    pub service: Arc<P::Service>,
    pub permissions: Arc<P::Permissions>,
    /// Owned for the lifetime of the view; dropping the last handle removes
    /// every prepared image
    pub session: Arc<CaptureSession<P::Camera>>,
}

impl<P: Platform> Clone for Collaborators<P> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            permissions: Arc::clone(&self.permissions),
            session: Arc::clone(&self.session),
        }
    }
}

impl<P: Platform> std::fmt::Debug for Collaborators<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl<P: Platform> Collaborators<P> {
    pub fn new(
        service: P::Service,
        permissions: P::Permissions,
        session: CaptureSession<P::Camera>,
    ) -> Self {
        Self {
            service: Arc::new(service),
            permissions: Arc::new(permissions),
            session: Arc::new(session),
        }
    }
}

/// HTTP service, desktop permission checks and a command-line camera
#[derive(Debug)]
pub struct SystemPlatform;

impl Platform for SystemPlatform {
    type Service = HttpPredictionClient;
    type Permissions = SystemPermissions;
    type Camera = CommandCamera;
}

impl Collaborators<SystemPlatform> {
    /// Build the real collaborators from settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let endpoints = settings.service_endpoints()?;
        info!("Prediction service at {}", endpoints.base_url);
        let service = HttpPredictionClient::new(endpoints)?;

        let permissions = SystemPermissions::new(
            settings.camera.enabled,
            settings.camera.command.clone(),
            settings.gallery.directory.clone(),
        );

        let session = CaptureSession::open(settings.camera())?;

        Ok(Self::new(service, permissions, session))
    }
}
