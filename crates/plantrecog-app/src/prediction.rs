//! Prediction state machine
//!
//! Owns the user-visible [`PredictionResult`] and the submission lifecycle.
//! `begin` flips the primary label to the processing text before any network
//! call is issued; `settle` applies the service outcome once it arrives.

use chrono::{DateTime, Local};
use plantrecog_core::prelude::*;
use plantrecog_core::{
    PredictionItem, PredictionResult, RequestLifecycle, PROCESSING_LABEL,
};
use plantrecog_service::ClassifyOutcome;

/// Identifies one submission so late answers for an older one are dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(u64);

impl SubmissionId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the classification call produced, in message-friendly form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Predictions(Vec<PredictionItem>),
    NoPrediction,
    /// Transport or service error, already rendered to text
    Failed(String),
}

impl From<Result<ClassifyOutcome>> for SubmissionOutcome {
    fn from(result: Result<ClassifyOutcome>) -> Self {
        match result {
            Ok(ClassifyOutcome::Predictions(items)) => SubmissionOutcome::Predictions(items),
            Ok(ClassifyOutcome::NoPrediction) => SubmissionOutcome::NoPrediction,
            Err(e) => SubmissionOutcome::Failed(e.to_string()),
        }
    }
}

/// Result of applying an outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// Outcome belonged to a submission that is no longer current
    Stale,
    Succeeded,
    Failed { reason: String },
}

#[derive(Debug, Default)]
pub struct PredictionStateMachine {
    result: PredictionResult,
    lifecycle: RequestLifecycle,
    current: Option<SubmissionId>,
    next_id: u64,
    settled_at: Option<DateTime<Local>>,
}

impl PredictionStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> &PredictionResult {
        &self.result
    }

    pub fn lifecycle(&self) -> RequestLifecycle {
        self.lifecycle
    }

    pub fn is_in_flight(&self) -> bool {
        self.lifecycle.is_in_flight()
    }

    pub fn current(&self) -> Option<SubmissionId> {
        self.current
    }

    /// When the last submission settled, if any has
    pub fn settled_at(&self) -> Option<DateTime<Local>> {
        self.settled_at
    }

    /// Enter Processing for a new submission.
    ///
    /// Returns `None` while another submission is in flight. The ranked list
    /// is left untouched.
    pub fn begin(&mut self) -> Option<SubmissionId> {
        if self.is_in_flight() {
            return None;
        }

        self.next_id += 1;
        let id = SubmissionId(self.next_id);
        self.current = Some(id);
        self.lifecycle = RequestLifecycle::Submitting;
        self.result.primary = PredictionItem::placeholder(PROCESSING_LABEL);
        debug!("Submission {} started", id);
        Some(id)
    }

    /// Apply the service outcome for `id`
    pub fn settle(&mut self, id: SubmissionId, outcome: SubmissionOutcome) -> Settlement {
        if self.current != Some(id) || !self.is_in_flight() {
            return Settlement::Stale;
        }

        self.settled_at = Some(Local::now());
        let reason = match outcome {
            SubmissionOutcome::Predictions(items) => match PredictionResult::from_predictions(items) {
                Some(result) => {
                    self.result = result;
                    self.lifecycle = RequestLifecycle::Succeeded;
                    return Settlement::Succeeded;
                }
                None => "service returned no usable prediction".to_string(),
            },
            SubmissionOutcome::NoPrediction => "service returned no prediction".to_string(),
            SubmissionOutcome::Failed(reason) => reason,
        };

        self.result = PredictionResult::placeholder();
        self.lifecycle = RequestLifecycle::Failed;
        Settlement::Failed { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantrecog_core::PLACEHOLDER_LABEL;

    fn rose_and_tulip() -> SubmissionOutcome {
        SubmissionOutcome::Predictions(vec![
            PredictionItem::new("Rose", 0.92),
            PredictionItem::new("Tulip", 0.4),
        ])
    }

    #[test]
    fn test_starts_idle_with_placeholder() {
        let machine = PredictionStateMachine::new();
        assert_eq!(machine.lifecycle(), RequestLifecycle::Idle);
        assert_eq!(machine.result().primary.name, PLACEHOLDER_LABEL);
        assert_eq!(machine.result().ranked.len(), 1);
        assert!(machine.result().ranked[0].score.is_none());
    }

    #[test]
    fn test_begin_enters_processing_synchronously() {
        let mut machine = PredictionStateMachine::new();
        let before = machine.result().ranked.clone();

        let id = machine.begin();
        assert!(id.is_some());
        assert_eq!(machine.lifecycle(), RequestLifecycle::Submitting);
        assert_eq!(machine.result().primary.name, PROCESSING_LABEL);
        assert_eq!(machine.result().ranked, before);
    }

    #[test]
    fn test_begin_refused_while_in_flight() {
        let mut machine = PredictionStateMachine::new();
        machine.begin().unwrap();
        assert!(machine.begin().is_none());
    }

    #[test]
    fn test_success_keeps_service_order() {
        let mut machine = PredictionStateMachine::new();
        let id = machine.begin().unwrap();

        assert_eq!(machine.settle(id, rose_and_tulip()), Settlement::Succeeded);
        let result = machine.result();
        assert_eq!(result.primary, PredictionItem::new("Rose", 0.92));
        assert_eq!(result.ranked[0].name, "Rose");
        assert_eq!(result.ranked[1].name, "Tulip");
        assert_eq!(machine.lifecycle(), RequestLifecycle::Succeeded);
        assert!(machine.settled_at().is_some());
    }

    #[test]
    fn test_sentinel_reverts_to_placeholder() {
        let mut machine = PredictionStateMachine::new();
        let id = machine.begin().unwrap();

        let settlement = machine.settle(id, SubmissionOutcome::NoPrediction);
        assert!(matches!(settlement, Settlement::Failed { .. }));
        assert_eq!(machine.lifecycle(), RequestLifecycle::Failed);
        assert_eq!(*machine.result(), PredictionResult::placeholder());
    }

    #[test]
    fn test_empty_list_is_failure() {
        let mut machine = PredictionStateMachine::new();
        let id = machine.begin().unwrap();
        let settlement = machine.settle(id, SubmissionOutcome::Predictions(vec![]));
        assert!(matches!(settlement, Settlement::Failed { .. }));
        assert!(machine.result().is_placeholder());
    }

    #[test]
    fn test_failure_after_success_resets_result() {
        let mut machine = PredictionStateMachine::new();
        let first = machine.begin().unwrap();
        machine.settle(first, rose_and_tulip());

        let second = machine.begin().unwrap();
        assert_eq!(machine.result().ranked[0].name, "Rose");
        machine.settle(second, SubmissionOutcome::Failed("connection refused".into()));
        assert_eq!(*machine.result(), PredictionResult::placeholder());
    }

    #[test]
    fn test_success_after_failure_still_works() {
        let mut machine = PredictionStateMachine::new();
        let first = machine.begin().unwrap();
        machine.settle(first, SubmissionOutcome::NoPrediction);

        let second = machine.begin().unwrap();
        assert_eq!(machine.settle(second, rose_and_tulip()), Settlement::Succeeded);
        assert_eq!(machine.result().primary.name, "Rose");
    }

    #[test]
    fn test_stale_outcome_is_dropped() {
        let mut machine = PredictionStateMachine::new();
        let first = machine.begin().unwrap();
        machine.settle(first, SubmissionOutcome::NoPrediction);
        let second = machine.begin().unwrap();

        assert_eq!(machine.settle(first, rose_and_tulip()), Settlement::Stale);
        assert_eq!(machine.lifecycle(), RequestLifecycle::Submitting);
        assert_eq!(machine.current(), Some(second));
    }

    #[test]
    fn test_outcome_from_service_error() {
        let outcome: SubmissionOutcome = Err(Error::http("timed out")).into();
        assert!(matches!(outcome, SubmissionOutcome::Failed(ref m) if m.contains("timed out")));
    }
}
