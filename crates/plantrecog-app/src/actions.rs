//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every action runs in its own tokio task and reports back through the
//! message channel. No task touches `AppState`.

use std::sync::Arc;

use plantrecog_core::prelude::*;
use plantrecog_core::PermissionState;
use plantrecog_service::{list_images, PermissionPlatform, PredictionService};
use tokio::sync::mpsc;

use crate::acquisition;
use crate::bootstrap;
use crate::handler::UpdateAction;
use crate::message::Message;
use crate::platform::{Collaborators, Platform};
use crate::prediction::SubmissionOutcome;

/// Execute an action by spawning a background task
pub fn handle_action<P: Platform>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    collaborators: &Collaborators<P>,
) {
    match action {
        UpdateAction::RunBootstrap => {
            let service = Arc::clone(&collaborators.service);
            let permissions = Arc::clone(&collaborators.permissions);
            tokio::spawn(async move {
                let report = bootstrap::run(service, permissions).await;
                send(&msg_tx, Message::BootstrapSettled(report)).await;
            });
        }

        UpdateAction::RequestPermission { resource, then } => {
            let permissions = Arc::clone(&collaborators.permissions);
            tokio::spawn(async move {
                let state = match permissions.request(resource).await {
                    Ok(state) => state,
                    Err(e) => {
                        warn!("{} permission request failed: {}", resource, e);
                        PermissionState::Denied
                    }
                };
                send(
                    &msg_tx,
                    Message::PermissionResolved {
                        resource,
                        state,
                        then,
                    },
                )
                .await;
            });
        }

        UpdateAction::CapturePhoto { options } => {
            let session = Arc::clone(&collaborators.session);
            tokio::spawn(async move {
                let msg = match acquisition::capture_via_camera(&session, options).await {
                    Ok(image) => Message::ImageAcquired { image },
                    Err(e) => Message::AcquisitionFailed {
                        error: e.to_string(),
                    },
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::LoadGallery {
            directory,
            extensions,
        } => {
            tokio::spawn(async move {
                let msg = match list_images(&directory, &extensions).await {
                    Ok(entries) => Message::GalleryLoaded { entries },
                    Err(e) => Message::GalleryLoadFailed {
                        error: e.to_string(),
                    },
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::ImportImage { path, options } => {
            let session = Arc::clone(&collaborators.session);
            tokio::spawn(async move {
                let msg = match acquisition::import_picked(&session, &path, &options).await {
                    Ok(image) => Message::ImageAcquired { image },
                    Err(e) => Message::AcquisitionFailed {
                        error: e.to_string(),
                    },
                };
                send(&msg_tx, msg).await;
            });
        }

        UpdateAction::Classify { submission, image } => {
            let service = Arc::clone(&collaborators.service);
            let session = Arc::clone(&collaborators.session);
            tokio::spawn(async move {
                debug!("Uploading {} for {}", image, submission);
                let outcome = SubmissionOutcome::from(service.classify(&image).await);
                session.release(&image).await;
                send(
                    &msg_tx,
                    Message::PredictionSettled {
                        submission,
                        outcome,
                    },
                )
                .await;
            });
        }

        UpdateAction::Release { image } => {
            let session = Arc::clone(&collaborators.session);
            tokio::spawn(async move {
                session.release(&image).await;
            });
        }
    }
}

async fn send(msg_tx: &mpsc::Sender<Message>, msg: Message) {
    if msg_tx.send(msg).await.is_err() {
        debug!("Message channel closed, dropping task result");
    }
}
