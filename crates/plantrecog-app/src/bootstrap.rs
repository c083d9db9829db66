//! Startup batch
//!
//! Health check, both permission requests and the class list fetch run as
//! four independent tasks and are awaited together. A failure or panic in
//! one only affects its own slot, which falls back to its default.

use std::future::Future;
use std::sync::Arc;

use plantrecog_core::prelude::*;
use plantrecog_core::{PermissionResource, PermissionState};
use plantrecog_service::{PermissionPlatform, PredictionService};

/// Outcome of one bootstrap operation
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    Fulfilled(T),
    Rejected(String),
}

impl<T> Settled<T> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Settled::Rejected(_))
    }

    /// The fulfilled value, or `default` for a rejection
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Settled::Fulfilled(value) => value,
            Settled::Rejected(_) => default,
        }
    }
}

/// Everything the batch produced, with rejected slots already defaulted
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapReport {
    pub service_up: bool,
    pub camera: PermissionState,
    pub media_library: PermissionState,
    pub recognized: Vec<String>,
    /// Names of the operations that were rejected
    pub rejected: Vec<&'static str>,
}

impl BootstrapReport {
    pub fn permission(&self, resource: PermissionResource) -> PermissionState {
        match resource {
            PermissionResource::Camera => self.camera,
            PermissionResource::MediaLibrary => self.media_library,
        }
    }
}

/// Run `fut` in its own task and capture errors and panics as a rejection
pub async fn settle<T, F>(label: &'static str, fut: F) -> Settled<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    match tokio::spawn(fut).await {
        Ok(Ok(value)) => Settled::Fulfilled(value),
        Ok(Err(e)) => {
            warn!("Bootstrap {} failed: {}", label, e);
            Settled::Rejected(e.to_string())
        }
        Err(e) => {
            warn!("Bootstrap {} task aborted: {}", label, e);
            Settled::Rejected(format!("task aborted: {}", e))
        }
    }
}

/// Launch the four startup operations and wait for all of them
pub async fn run<S, P>(service: Arc<S>, permissions: Arc<P>) -> BootstrapReport
where
    S: PredictionService + Sync + 'static,
    P: PermissionPlatform + Sync + 'static,
{
    info!("Bootstrap started");

    let health = {
        let service = Arc::clone(&service);
        settle("health check", async move { service.check_health().await })
    };
    let camera = {
        let permissions = Arc::clone(&permissions);
        settle("camera permission", async move {
            permissions.request(PermissionResource::Camera).await
        })
    };
    let media_library = {
        let permissions = Arc::clone(&permissions);
        settle("media library permission", async move {
            permissions.request(PermissionResource::MediaLibrary).await
        })
    };
    let classes = {
        let service = Arc::clone(&service);
        settle("class list", async move {
            service.fetch_recognized_classes().await
        })
    };

    let (health, camera, media_library, classes) =
        tokio::join!(health, camera, media_library, classes);

    let mut rejected = Vec::new();
    for (label, failed) in [
        ("health", health.is_rejected()),
        ("camera", camera.is_rejected()),
        ("media_library", media_library.is_rejected()),
        ("classes", classes.is_rejected()),
    ] {
        if failed {
            rejected.push(label);
        }
    }

    let report = BootstrapReport {
        service_up: health.unwrap_or(false),
        camera: camera.unwrap_or(PermissionState::Denied),
        media_library: media_library.unwrap_or(PermissionState::Denied),
        recognized: classes.unwrap_or(Vec::new()),
        rejected,
    };

    info!(
        "Bootstrap settled: service_up={} camera={:?} media_library={:?} classes={}",
        report.service_up,
        report.camera,
        report.media_library,
        report.recognized.len()
    );
    report
}
