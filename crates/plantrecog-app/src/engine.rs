//! Engine - shared orchestration for the TUI and headless runners
//!
//! Owns the application state, the message channel, the collaborators and
//! the event broadcaster. Runners feed it messages and render its state.

use chrono::Local;
use plantrecog_core::prelude::*;
use plantrecog_core::{ReadinessState, RequestLifecycle};
use tokio::sync::{broadcast, mpsc};

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::handler::UpdateAction;
use crate::message::Message;
use crate::platform::{Collaborators, Platform};
use crate::prediction::SubmissionId;
use crate::state::{AppState, ExitReason};
use crate::{actions, process, signals};

/// Message channel capacity
const CHANNEL_CAPACITY: usize = 256;

/// Lightweight snapshot of state for change detection.
#[derive(Debug, Clone, Copy)]
struct StateSnapshot {
    readiness: ReadinessState,
    lifecycle: RequestLifecycle,
    submission: Option<SubmissionId>,
    alerts_raised: usize,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            readiness: state.readiness,
            lifecycle: state.prediction.lifecycle(),
            submission: state.prediction.current(),
            alerts_raised: state.alerts_raised,
        }
    }
}

/// Orchestration engine for PlantRecog
pub struct Engine<P: Platform> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, key reader).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Loaded settings
    pub settings: Settings,

    collaborators: Collaborators<P>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl<P: Platform> Engine<P> {
    pub fn new(settings: Settings, collaborators: Collaborators<P>) -> Self {
        let state = AppState::with_settings(settings.clone());
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        let (event_tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            state,
            msg_tx,
            msg_rx,
            settings,
            collaborators,
            event_tx,
        }
    }

    /// Forward SIGINT/SIGTERM as `Message::Quit`
    pub fn install_signal_handler(&self) {
        signals::spawn_signal_handler(self.msg_tx.clone());
    }

    /// Launch the bootstrap batch. The app stays on the splash until it settles.
    pub fn start(&mut self) {
        info!("Engine starting");
        actions::handle_action(
            UpdateAction::RunBootstrap,
            self.msg_tx.clone(),
            &self.collaborators,
        );
    }

    /// Subscribe to engine events.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit any
    /// resulting events.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, msg, &self.msg_tx, &self.collaborators);

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next message from any source
    pub async fn next_message(&mut self) -> Option<Message> {
        self.msg_rx.recv().await
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn collaborators(&self) -> &Collaborators<P> {
        &self.collaborators
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn exit_reason(&self) -> ExitReason {
        self.state.exit
    }

    pub fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);
        info!("Engine shut down");
    }

    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if !pre.readiness.is_ready() && post.readiness.is_ready() {
            self.emit(EngineEvent::Ready {
                service_up: self.state.service_up,
                camera: self.state.permission(plantrecog_core::PermissionResource::Camera),
                media_library: self
                    .state
                    .permission(plantrecog_core::PermissionResource::MediaLibrary),
                recognized: self.state.recognized.clone(),
            });
        }

        if let Some(submission) = post.submission {
            let started = post.lifecycle == RequestLifecycle::Submitting
                && (pre.submission != post.submission || pre.lifecycle != post.lifecycle);
            if started {
                self.emit(EngineEvent::processing(submission));
            }

            if pre.lifecycle == RequestLifecycle::Submitting && pre.submission == post.submission {
                let settled_at = self
                    .state
                    .prediction
                    .settled_at()
                    .unwrap_or_else(Local::now);
                match post.lifecycle {
                    RequestLifecycle::Succeeded => self.emit(EngineEvent::PredictionSucceeded {
                        submission: submission.value(),
                        result: self.state.prediction.result().clone(),
                        settled_at,
                    }),
                    RequestLifecycle::Failed => self.emit(EngineEvent::PredictionFailed {
                        submission: submission.value(),
                        settled_at,
                    }),
                    _ => {}
                }
            }
        }

        if post.alerts_raised > pre.alerts_raised {
            if let Some(alert) = self.state.alerts.back() {
                self.emit(EngineEvent::alert(alert));
            }
        }
    }

    fn emit(&self, event: EngineEvent) {
        // no subscribers is fine
        let _ = self.event_tx.send(event);
    }
}
