//! Main update function - handles state transitions (TEA pattern)

use std::path::PathBuf;

use plantrecog_core::prelude::*;
use plantrecog_core::{ImageRef, PermissionResource, PermissionState, ReadinessState};
use plantrecog_service::GalleryEntry;

use crate::acquisition::{AcquisitionSource, GalleryPickerState, PickerStep};
use crate::alert::AlertState;
use crate::bootstrap::BootstrapReport;
use crate::message::Message;
use crate::permissions::EnsureDecision;
use crate::prediction::{Settlement, SubmissionId, SubmissionOutcome};
use crate::state::{AppPhase, AppState, ExitReason};

use super::{keys::handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => UpdateResult::none(),

        Message::Quit | Message::CloseApp => {
            let reason = if state.is_fatal() {
                ExitReason::ServiceUnavailable
            } else {
                ExitReason::Normal
            };
            state.request_quit(reason);
            UpdateResult::none()
        }

        Message::BootstrapSettled(report) => {
            handle_bootstrap_settled(state, report);
            UpdateResult::none()
        }

        Message::DismissAlert => {
            state.dismiss_alert();
            UpdateResult::none()
        }

        Message::CaptureRequested => begin_acquisition(state, AcquisitionSource::Camera),

        Message::PickRequested => begin_acquisition(state, AcquisitionSource::Gallery),

        Message::SubmitFile { path } => handle_submit_file(state, path),

        Message::PermissionResolved {
            resource,
            state: permission,
            then,
        } => handle_permission_resolved(state, resource, permission, then),

        Message::GalleryLoaded { entries } => {
            handle_gallery_loaded(state, entries);
            UpdateResult::none()
        }

        Message::GalleryLoadFailed { error } => {
            warn!("Gallery listing failed: {}", error);
            state.pending = None;
            state.push_alert(AlertState::gallery_unavailable());
            UpdateResult::none()
        }

        Message::PickerUp => {
            if let Some(picker) = state.picker.as_mut() {
                picker.select_previous();
            }
            UpdateResult::none()
        }

        Message::PickerDown => {
            if let Some(picker) = state.picker.as_mut() {
                picker.select_next();
            }
            UpdateResult::none()
        }

        Message::PickerFirst => {
            if let Some(picker) = state.picker.as_mut() {
                picker.select_first();
            }
            UpdateResult::none()
        }

        Message::PickerLast => {
            if let Some(picker) = state.picker.as_mut() {
                picker.select_last();
            }
            UpdateResult::none()
        }

        Message::PickerAccept => handle_picker_accept(state),

        Message::PickerBack => {
            handle_picker_back(state);
            UpdateResult::none()
        }

        Message::ImageAcquired { image } => handle_image_acquired(state, image),

        Message::AcquisitionFailed { error } => {
            error!("Image acquisition failed: {}", error);
            state.pending = None;
            state.picker = None;
            state.push_alert(AlertState::acquisition_failed());
            UpdateResult::none()
        }

        Message::PredictionSettled {
            submission,
            outcome,
        } => {
            handle_prediction_settled(state, submission, outcome);
            UpdateResult::none()
        }

        Message::ToggleClassList => {
            if state.readiness.is_ready() && !state.is_fatal() {
                state.show_class_list = !state.show_class_list;
            }
            UpdateResult::none()
        }
    }
}

fn handle_bootstrap_settled(state: &mut AppState, report: BootstrapReport) {
    if state.readiness.is_ready() {
        warn!("Ignoring duplicate bootstrap report");
        return;
    }

    for resource in PermissionResource::ALL {
        state.permissions.set(resource, report.permission(resource));
    }
    state.recognized = report.recognized;
    state.service_up = report.service_up;
    state.readiness = ReadinessState::Ready;
    if state.phase == AppPhase::Initializing {
        state.phase = AppPhase::Running;
    }

    if !report.service_up {
        error!("Prediction service is unavailable");
        state.push_alert(AlertState::service_unavailable());
    }
}

/// Acquisition triggers only act on a ready, idle app
fn accepts_triggers(state: &AppState) -> bool {
    state.readiness.is_ready() && !state.is_fatal() && !state.should_quit()
}

fn begin_acquisition(state: &mut AppState, source: AcquisitionSource) -> UpdateResult {
    if !accepts_triggers(state) {
        return UpdateResult::none();
    }
    if state.is_busy() {
        debug!("Ignoring {:?} trigger while busy", source);
        return UpdateResult::none();
    }

    state.pending = Some(source);
    let Some(resource) = source.resource() else {
        return continue_acquisition(state, source);
    };

    match state.permissions.ensure(resource) {
        EnsureDecision::Granted => continue_acquisition(state, source),
        EnsureDecision::NeedsPrompt => {
            debug!("Prompting for {} permission", resource);
            UpdateResult::action(UpdateAction::RequestPermission {
                resource,
                then: source,
            })
        }
    }
}

/// Permission is settled; start the actual acquisition
fn continue_acquisition(state: &mut AppState, source: AcquisitionSource) -> UpdateResult {
    match source {
        AcquisitionSource::Camera => UpdateResult::action(UpdateAction::CapturePhoto {
            options: state.capture_options,
        }),
        AcquisitionSource::Gallery => UpdateResult::action(UpdateAction::LoadGallery {
            directory: state.settings.gallery.directory.clone(),
            extensions: state.settings.gallery.extensions.clone(),
        }),
        AcquisitionSource::File => {
            // files arrive through SubmitFile with their path
            state.pending = None;
            UpdateResult::none()
        }
    }
}

fn handle_submit_file(state: &mut AppState, path: PathBuf) -> UpdateResult {
    if !accepts_triggers(state) {
        return UpdateResult::none();
    }
    if state.is_busy() {
        debug!("Ignoring file submission while busy: {:?}", path);
        return UpdateResult::none();
    }

    state.pending = Some(AcquisitionSource::File);
    UpdateResult::action(UpdateAction::ImportImage {
        path,
        options: state.picker_options.clone(),
    })
}

fn handle_permission_resolved(
    state: &mut AppState,
    resource: PermissionResource,
    permission: PermissionState,
    then: AcquisitionSource,
) -> UpdateResult {
    state.permissions.set(resource, permission);

    if state.pending != Some(then) || state.is_fatal() {
        debug!("Permission answer for {} arrived with nothing pending", resource);
        return UpdateResult::none();
    }

    if permission.is_granted() {
        return continue_acquisition(state, then);
    }

    info!("{} permission not granted ({:?})", resource, permission);
    state.pending = None;
    state.push_alert(AlertState::permission_denied(resource));
    UpdateResult::none()
}

fn handle_gallery_loaded(state: &mut AppState, entries: Vec<GalleryEntry>) {
    if state.pending != Some(AcquisitionSource::Gallery) || state.is_fatal() {
        return;
    }
    debug!("Gallery picker opened with {} images", entries.len());
    state.picker = Some(GalleryPickerState::new(
        entries,
        state.picker_options.clone(),
    ));
}

fn handle_picker_accept(state: &mut AppState) -> UpdateResult {
    let Some(picker) = state.picker.as_mut() else {
        return UpdateResult::none();
    };

    match picker.accept() {
        PickerStep::Pending => UpdateResult::none(),
        PickerStep::Picked(entry) => {
            let options = picker.options.clone();
            state.picker = None;
            UpdateResult::action(UpdateAction::ImportImage {
                path: entry.path,
                options,
            })
        }
    }
}

/// Esc leaves the crop confirmation, or cancels the pick silently
fn handle_picker_back(state: &mut AppState) {
    let Some(picker) = state.picker.as_mut() else {
        return;
    };
    if !picker.back() {
        debug!("Gallery pick cancelled");
        state.picker = None;
        state.pending = None;
    }
}

fn handle_image_acquired(state: &mut AppState, image: ImageRef) -> UpdateResult {
    state.pending = None;
    state.picker = None;

    if state.is_fatal() {
        return UpdateResult::action(UpdateAction::Release { image });
    }

    match state.prediction.begin() {
        Some(submission) => {
            info!("Submitting {} as {}", image, submission);
            UpdateResult::action(UpdateAction::Classify { submission, image })
        }
        None => {
            warn!("Dropping {}: a submission is already in flight", image);
            UpdateResult::action(UpdateAction::Release { image })
        }
    }
}

fn handle_prediction_settled(
    state: &mut AppState,
    submission: SubmissionId,
    outcome: SubmissionOutcome,
) {
    match state.prediction.settle(submission, outcome) {
        Settlement::Stale => {
            debug!("Dropping stale outcome for {}", submission);
        }
        Settlement::Succeeded => {
            info!(
                "Submission {} classified as {}",
                submission,
                state.prediction.result().primary.name
            );
        }
        Settlement::Failed { reason } => {
            error!("Classification failed for {}: {}", submission, reason);
            state.push_alert(AlertState::classification_failed());
        }
    }
}
