//! Application state (Model in TEA pattern)

use std::collections::VecDeque;

use plantrecog_core::{PermissionResource, PermissionState, ReadinessState};
use plantrecog_service::{CaptureOptions, PickerOptions};

use crate::acquisition::{AcquisitionSource, GalleryPickerState};
use crate::alert::AlertState;
use crate::config::Settings;
use crate::permissions::PermissionSlots;
use crate::prediction::PredictionStateMachine;
use crate::splash::SplashScreen;

/// Coarse lifecycle of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Bootstrap batch still running
    #[default]
    Initializing,
    Running,
    Quitting,
}

/// Why the process is leaving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitReason {
    #[default]
    Normal,
    /// Fatal alert acknowledged after a failed health check
    ServiceUnavailable,
}

/// What currently owns the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Splash,
    FatalAlert,
    Alert,
    GalleryPicker,
    ClassList,
    Normal,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub readiness: ReadinessState,
    pub splash: SplashScreen,

    /// Health check result from bootstrap
    pub service_up: bool,
    /// Class names the service can recognize
    pub recognized: Vec<String>,
    pub permissions: PermissionSlots,

    pub prediction: PredictionStateMachine,

    /// Acquisition started but no image yet (prompt, shutter, picker, import)
    pub pending: Option<AcquisitionSource>,
    pub picker: Option<GalleryPickerState>,

    /// Front alert is the one shown
    pub alerts: VecDeque<AlertState>,
    /// Total alerts ever raised
    pub alerts_raised: usize,
    pub show_class_list: bool,

    pub settings: Settings,
    pub capture_options: CaptureOptions,
    pub picker_options: PickerOptions,

    pub exit: ExitReason,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            phase: AppPhase::Initializing,
            readiness: ReadinessState::NotReady,
            splash: SplashScreen::hold(),
            service_up: false,
            recognized: Vec::new(),
            permissions: PermissionSlots::default(),
            prediction: PredictionStateMachine::new(),
            pending: None,
            picker: None,
            alerts: VecDeque::new(),
            alerts_raised: 0,
            show_class_list: false,
            capture_options: settings.capture_options(),
            picker_options: settings.picker_options(),
            settings,
            exit: ExitReason::Normal,
        }
    }

    pub fn ui_mode(&self) -> UiMode {
        if !self.readiness.is_ready() {
            return UiMode::Splash;
        }
        if let Some(alert) = self.alerts.front() {
            return if alert.is_fatal() {
                UiMode::FatalAlert
            } else {
                UiMode::Alert
            };
        }
        if self.picker.is_some() {
            return UiMode::GalleryPicker;
        }
        if self.show_class_list {
            return UiMode::ClassList;
        }
        UiMode::Normal
    }

    pub fn permission(&self, resource: PermissionResource) -> PermissionState {
        self.permissions.get(resource)
    }

    /// A submission is in flight or an acquisition is pending
    pub fn is_busy(&self) -> bool {
        self.prediction.is_in_flight() || self.pending.is_some()
    }

    /// The fatal alert is up; nothing but closing the app is possible
    pub fn is_fatal(&self) -> bool {
        self.alerts.front().is_some_and(AlertState::is_fatal)
    }

    pub fn current_alert(&self) -> Option<&AlertState> {
        self.alerts.front()
    }

    /// Queue an alert. A fatal alert replaces everything else.
    pub fn push_alert(&mut self, alert: AlertState) {
        if self.is_fatal() {
            return;
        }
        if alert.is_fatal() {
            self.alerts.clear();
            self.picker = None;
            self.show_class_list = false;
        }
        self.alerts.push_back(alert);
        self.alerts_raised += 1;
    }

    /// Pop the front alert if it is dismissable
    pub fn dismiss_alert(&mut self) -> bool {
        match self.alerts.front() {
            Some(alert) if !alert.is_fatal() => {
                self.alerts.pop_front();
                true
            }
            _ => false,
        }
    }

    pub fn request_quit(&mut self, reason: ExitReason) {
        self.phase = AppPhase::Quitting;
        self.exit = reason;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}
