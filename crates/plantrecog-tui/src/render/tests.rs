use super::view;
use crate::test_utils::{ready_report, ready_state, TestTerminal};
use plantrecog_app::handler::update;
use plantrecog_app::{AlertState, AppState, Message, SubmissionOutcome};
use plantrecog_core::{PermissionResource, PermissionState, PredictionItem};

fn draw(state: &AppState) -> TestTerminal {
    let mut term = TestTerminal::new();
    term.draw_with(|frame| view(frame, state));
    term
}

#[test]
fn test_splash_before_bootstrap() {
    let state = AppState::new();
    let term = draw(&state);

    assert!(term.buffer_contains("Connecting"));
    assert!(!term.buffer_contains("Shutter"));
}

#[test]
fn test_splash_held_until_released() {
    let mut state = AppState::new();
    update(&mut state, Message::BootstrapSettled(ready_report(PermissionState::Granted)));

    // Ready, but the runner has not released the splash yet
    assert!(draw(&state).buffer_contains("Connecting"));

    state.splash.release_if_ready(state.readiness);
    assert!(draw(&state).buffer_contains("Shutter"));
}

#[test]
fn test_idle_main_view() {
    let state = ready_state(PermissionState::Granted);
    let term = draw(&state);

    assert!(term.buffer_contains("PlantRecog"));
    assert!(term.buffer_contains("[c] Shutter"));
    assert!(term.buffer_contains("Know plants with just a click"));
    assert!(term.buffer_contains("Idle"));
}

#[test]
fn test_fatal_alert_hides_camera() {
    let mut state = AppState::new();
    let mut report = ready_report(PermissionState::Granted);
    report.service_up = false;
    update(&mut state, Message::BootstrapSettled(report));
    state.splash.release_if_ready(state.readiness);

    let term = draw(&state);
    assert!(term.buffer_contains("Oh! Snap"));
    assert!(term.buffer_contains("Close App"));
    assert!(!term.buffer_contains("Shutter"));
    assert!(!term.buffer_contains("Know plants"));
}

#[test]
fn test_notice_drawn_over_main_view() {
    let mut state = ready_state(PermissionState::Granted);
    state.push_alert(AlertState::permission_denied(PermissionResource::Camera));

    let term = draw(&state);
    assert!(term.buffer_contains("App does not have permission for the Camera!"));
    assert!(term.buffer_contains("PlantRecog"));
}

#[test]
fn test_processing_then_ranked_result() {
    let mut state = ready_state(PermissionState::Granted);
    let id = state.prediction.begin().unwrap();
    assert!(draw(&state).buffer_contains("PROCESSING IMAGE..."));

    update(
        &mut state,
        Message::PredictionSettled {
            submission: id,
            outcome: SubmissionOutcome::Predictions(vec![
                PredictionItem::new("Rose", 0.92),
                PredictionItem::new("Tulip", 0.4),
            ]),
        },
    );

    let term = draw(&state);
    assert!(term.buffer_contains("ROSE"));
    assert!(term.buffer_contains("Rose: 0.92"));
    assert!(term.buffer_contains("Tulip: 0.4"));
    assert!(!term.buffer_contains("Know plants"));
}

#[test]
fn test_class_list_overlay() {
    let mut state = ready_state(PermissionState::Granted);
    update(&mut state, Message::ToggleClassList);

    let term = draw(&state);
    assert!(term.buffer_contains("Recognized Plants (3)"));
    assert!(term.buffer_contains("tulip"));
}

#[test]
fn test_narrow_terminal_stacks_panels() {
    let state = ready_state(PermissionState::Granted);
    let mut term = TestTerminal::with_size(50, 30);
    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("Camera"));
    assert!(term.buffer_contains("Result"));
}
