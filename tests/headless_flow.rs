//! Headless runner driven end to end over in-memory collaborators
//!
//! Run with: cargo test --test headless_flow

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use plantrecog::headless::{drive, HeadlessEvent};
use plantrecog_app::{Collaborators, Engine, ExitReason, Platform, Settings};
use plantrecog_service::test_utils::{
    rose_and_tulip, write_test_image, FakeCamera, FakePermissions, FakePredictionService,
    Scripted,
};
use plantrecog_service::CaptureSession;
use tokio::sync::mpsc;

struct FakePlatform;

impl Platform for FakePlatform {
    type Service = FakePredictionService;
    type Permissions = FakePermissions;
    type Camera = FakeCamera;
}

fn engine_with(service: FakePredictionService) -> Engine<FakePlatform> {
    let session = CaptureSession::open(FakeCamera::default()).unwrap();
    Engine::new(
        Settings::default(),
        Collaborators::new(service, FakePermissions::granting(), session),
    )
}

/// Feed `paths`, close the channel, and collect every emitted event as JSON
async fn run_paths(engine: &mut Engine<FakePlatform>, paths: Vec<PathBuf>) -> Vec<serde_json::Value> {
    let (tx, rx) = mpsc::channel(16);
    for path in paths {
        tx.send(path).await.unwrap();
    }
    drop(tx);

    let mut events = Vec::new();
    tokio::time::timeout(
        Duration::from_secs(10),
        drive(engine, rx, |event: HeadlessEvent| {
            events.push(serde_json::to_value(&event).unwrap())
        }),
    )
    .await
    .expect("headless run timed out")
    .unwrap();
    events
}

fn names(events: &[serde_json::Value]) -> Vec<String> {
    events
        .iter()
        .map(|e| e["event"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn image_in(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    write_test_image(&path, 40, 20).unwrap();
    path
}

#[tokio::test]
async fn test_single_image_is_classified() {
    let dir = tempfile::tempdir().unwrap();
    let service = FakePredictionService::healthy();
    service.push_classify(Scripted::Ok(rose_and_tulip()));
    let mut engine = engine_with(service);

    let events = run_paths(&mut engine, vec![image_in(&dir, "rose.png")]).await;

    assert_eq!(
        names(&events),
        vec!["ready", "image_queued", "processing", "prediction"]
    );
    let prediction = &events[3];
    assert_eq!(prediction["primary"], "Rose");
    assert_eq!(prediction["ranked"][1]["name"], "Tulip");
    assert_eq!(engine.exit_reason(), ExitReason::Normal);
}

#[tokio::test]
async fn test_service_down_ends_run_with_fatal_alert() {
    let dir = tempfile::tempdir().unwrap();
    let service = FakePredictionService::healthy().with_health(Scripted::Ok(false));
    let mut engine = engine_with(service);

    let events = run_paths(&mut engine, vec![image_in(&dir, "rose.png")]).await;

    let kinds = names(&events);
    assert_eq!(kinds, vec!["ready", "alert"]);
    assert_eq!(events[1]["fatal"], true);
    assert_eq!(events[1]["title"], "Oh! Snap");
    assert_eq!(engine.exit_reason(), ExitReason::ServiceUnavailable);
    assert_eq!(
        engine.collaborators().service.classify_calls.load(Ordering::SeqCst),
        0
    );
}

#[tokio::test]
async fn test_failure_then_success_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let service = FakePredictionService::healthy();
    service.push_classify(Scripted::Fail("connection reset".to_string()));
    service.push_classify(Scripted::Ok(rose_and_tulip()));
    let mut engine = engine_with(service);

    let events = run_paths(
        &mut engine,
        vec![image_in(&dir, "first.png"), image_in(&dir, "second.png")],
    )
    .await;

    assert_eq!(
        names(&events),
        vec![
            "ready",
            "image_queued",
            "processing",
            "prediction_failed",
            "alert",
            "image_queued",
            "processing",
            "prediction",
        ]
    );
    assert_eq!(events[2]["submission"], 1);
    assert_eq!(events[4]["title"], "Ops");
    assert_eq!(events[4]["fatal"], false);
    assert_eq!(events[6]["submission"], 2);
    assert_eq!(
        engine.collaborators().service.classify_calls.load(Ordering::SeqCst),
        2
    );
}

#[tokio::test]
async fn test_unreadable_image_raises_notice_and_continues() {
    let dir = tempfile::tempdir().unwrap();
    let service = FakePredictionService::healthy();
    service.push_classify(Scripted::Ok(rose_and_tulip()));
    let mut engine = engine_with(service);

    let missing = dir.path().join("missing.jpg");
    let events = run_paths(&mut engine, vec![missing, image_in(&dir, "ok.png")]).await;

    assert_eq!(
        names(&events),
        vec![
            "ready",
            "image_queued",
            "alert",
            "image_queued",
            "processing",
            "prediction",
        ]
    );
    assert_eq!(events[2]["fatal"], false);
    assert_eq!(engine.exit_reason(), ExitReason::Normal);
}

#[tokio::test]
async fn test_no_images_just_reports_ready() {
    let mut engine = engine_with(FakePredictionService::healthy());
    let events = run_paths(&mut engine, Vec::new()).await;

    assert_eq!(names(&events), vec!["ready"]);
    assert_eq!(events[0]["recognized"][2], "tulip");
    assert!(engine.should_quit());
}
