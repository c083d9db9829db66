//! Wire format of the prediction service
//!
//! ```text
//! GET  /recognized  -> { "recognized": ["rose", "tulip", ...] }
//! POST /predict     -> { "predictions": [{ "name": "rose", "score": 0.92 }, ...] }
//!                   -> { "predictions": null }
//! ```

use plantrecog_core::prelude::*;
use plantrecog_core::PredictionItem;
use serde::{Deserialize, Serialize};

/// Body of the recognized-class-list response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassListPayload {
    pub recognized: Vec<String>,
}

/// A single scored candidate as sent by the service.
///
/// Unlike [`PredictionItem`] the score is mandatory here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePrediction {
    pub name: String,
    pub score: f64,
}

impl From<WirePrediction> for PredictionItem {
    fn from(wire: WirePrediction) -> Self {
        PredictionItem::new(wire.name, wire.score)
    }
}

/// Body of the classification response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionPayload {
    /// `None` is the service's way of saying it has no usable prediction
    pub predictions: Option<Vec<WirePrediction>>,
}

/// Outcome of a classification round trip that reached the service
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    /// Candidates in the order the service returned them
    Predictions(Vec<PredictionItem>),
    /// The service answered but had nothing usable
    NoPrediction,
}

impl ClassifyOutcome {
    pub fn is_no_prediction(&self) -> bool {
        matches!(self, ClassifyOutcome::NoPrediction)
    }
}

/// Parse the class-list body
pub fn parse_class_list(body: &str) -> Result<Vec<String>> {
    let payload: ClassListPayload = serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("class list: {}", e)))?;
    Ok(payload.recognized)
}

/// Parse the classification body.
///
/// A missing/null or empty `predictions` array is the no-prediction sentinel;
/// anything that does not match the schema is an error.
pub fn parse_prediction_payload(body: &str) -> Result<ClassifyOutcome> {
    let payload: PredictionPayload = serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("predictions: {}", e)))?;

    match payload.predictions {
        Some(predictions) if !predictions.is_empty() => Ok(ClassifyOutcome::Predictions(
            predictions.into_iter().map(PredictionItem::from).collect(),
        )),
        _ => Ok(ClassifyOutcome::NoPrediction),
    }
}
