//! In-memory fakes of the service and platform traits
//!
//! Used by the app, tui and workspace tests to drive the state machine
//! without a network, a camera or a real gallery.

use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use plantrecog_core::prelude::*;
use plantrecog_core::{ImageRef, PermissionResource, PermissionState, PredictionItem};
use tokio::sync::Notify;

use crate::camera::{CameraDevice, CaptureOptions};
use crate::client::PredictionService;
use crate::permissions::PermissionPlatform;
use crate::protocol::ClassifyOutcome;

/// Scripted outcome of a fake call
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Ok(T),
    Fail(String),
    Panic,
}

impl<T: Clone> Scripted<T> {
    fn resolve(&self) -> Result<T> {
        match self {
            Scripted::Ok(value) => Ok(value.clone()),
            Scripted::Fail(message) => Err(Error::http(message.clone())),
            Scripted::Panic => panic!("scripted panic"),
        }
    }
}

/// Fake prediction service
#[derive(Debug)]
pub struct FakePredictionService {
    health: Scripted<bool>,
    classes: Scripted<Vec<String>>,
    classify: Mutex<VecDeque<Scripted<ClassifyOutcome>>>,
    /// When set, `check_health` waits for a notification before answering
    pub health_gate: Option<Arc<Notify>>,
    /// When set, `classify` waits for a notification before answering
    pub classify_gate: Option<Arc<Notify>>,
    pub health_calls: AtomicUsize,
    pub classes_calls: AtomicUsize,
    pub classify_calls: AtomicUsize,
}

impl Default for FakePredictionService {
    fn default() -> Self {
        Self::healthy()
    }
}

impl FakePredictionService {
    /// Up, with a small class list and no scripted classifications
    pub fn healthy() -> Self {
        Self {
            health: Scripted::Ok(true),
            classes: Scripted::Ok(vec![
                "daisy".to_string(),
                "rose".to_string(),
                "tulip".to_string(),
            ]),
            classify: Mutex::new(VecDeque::new()),
            health_gate: None,
            classify_gate: None,
            health_calls: AtomicUsize::new(0),
            classes_calls: AtomicUsize::new(0),
            classify_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_health(mut self, health: Scripted<bool>) -> Self {
        self.health = health;
        self
    }

    pub fn with_classes(mut self, classes: Scripted<Vec<String>>) -> Self {
        self.classes = classes;
        self
    }

    pub fn with_health_gate(mut self, gate: Arc<Notify>) -> Self {
        self.health_gate = Some(gate);
        self
    }

    pub fn with_classify_gate(mut self, gate: Arc<Notify>) -> Self {
        self.classify_gate = Some(gate);
        self
    }

    /// Queue the answer for the next `classify` call
    pub fn push_classify(&self, outcome: Scripted<ClassifyOutcome>) {
        self.classify
            .lock()
            .expect("fake classify queue poisoned")
            .push_back(outcome);
    }
}

impl PredictionService for FakePredictionService {
    async fn check_health(&self) -> Result<bool> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.health_gate {
            gate.notified().await;
        }
        self.health.resolve()
    }

    async fn fetch_recognized_classes(&self) -> Result<Vec<String>> {
        self.classes_calls.fetch_add(1, Ordering::SeqCst);
        self.classes.resolve()
    }

    async fn classify(&self, _image: &ImageRef) -> Result<ClassifyOutcome> {
        self.classify_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.classify_gate {
            gate.notified().await;
        }
        let next = self
            .classify
            .lock()
            .expect("fake classify queue poisoned")
            .pop_front()
            .unwrap_or(Scripted::Ok(ClassifyOutcome::NoPrediction));
        next.resolve()
    }
}

/// Convenience: the Rose/Tulip answer used across tests
pub fn rose_and_tulip() -> ClassifyOutcome {
    ClassifyOutcome::Predictions(vec![
        PredictionItem::new("Rose", 0.92),
        PredictionItem::new("Tulip", 0.4),
    ])
}

/// Fake permission platform with per-resource answers and prompt counters
#[derive(Debug, Default)]
pub struct FakePermissions {
    answers: Mutex<HashMap<PermissionResource, Scripted<PermissionState>>>,
    prompts: Mutex<HashMap<PermissionResource, usize>>,
}

impl FakePermissions {
    /// Every request is granted
    pub fn granting() -> Self {
        let fake = Self::default();
        for resource in PermissionResource::ALL {
            fake.answer(resource, Scripted::Ok(PermissionState::Granted));
        }
        fake
    }

    /// Every request is denied
    pub fn denying() -> Self {
        let fake = Self::default();
        for resource in PermissionResource::ALL {
            fake.answer(resource, Scripted::Ok(PermissionState::Denied));
        }
        fake
    }

    pub fn answer(&self, resource: PermissionResource, answer: Scripted<PermissionState>) {
        self.answers
            .lock()
            .expect("fake permissions poisoned")
            .insert(resource, answer);
    }

    /// How many times `request` was called for `resource`
    pub fn prompt_count(&self, resource: PermissionResource) -> usize {
        self.prompts
            .lock()
            .expect("fake permissions poisoned")
            .get(&resource)
            .copied()
            .unwrap_or(0)
    }

    fn scripted(&self, resource: PermissionResource) -> Scripted<PermissionState> {
        self.answers
            .lock()
            .expect("fake permissions poisoned")
            .get(&resource)
            .cloned()
            .unwrap_or(Scripted::Ok(PermissionState::Denied))
    }
}

impl PermissionPlatform for FakePermissions {
    async fn request(&self, resource: PermissionResource) -> Result<PermissionState> {
        *self
            .prompts
            .lock()
            .expect("fake permissions poisoned")
            .entry(resource)
            .or_insert(0) += 1;
        self.scripted(resource).resolve()
    }

    async fn status(&self, resource: PermissionResource) -> Result<PermissionState> {
        self.scripted(resource).resolve()
    }
}

/// Fake camera that writes a solid-color JPEG frame
#[derive(Debug)]
pub struct FakeCamera {
    pub width: u32,
    pub height: u32,
    pub fail: bool,
    pub shots: AtomicUsize,
}

impl Default for FakeCamera {
    fn default() -> Self {
        Self {
            width: 48,
            height: 32,
            fail: false,
            shots: AtomicUsize::new(0),
        }
    }
}

impl FakeCamera {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl CameraDevice for FakeCamera {
    async fn take_photo(&self, output: &Path, _options: &CaptureOptions) -> Result<()> {
        self.shots.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::capture("fake shutter failure"));
        }
        write_test_image(output, self.width, self.height)
    }
}

/// Write a small solid-color image (format from the extension, PNG otherwise)
pub fn write_test_image(path: &Path, width: u32, height: u32) -> Result<()> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([34, 139, 34]));
    let format = image::ImageFormat::from_path(path).unwrap_or(image::ImageFormat::Png);
    img.save_with_format(path, format)
        .map_err(|e| Error::image(path, e.to_string()))
}
