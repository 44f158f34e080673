//! Prescription lookup
//!
//! Feeds `(withered_crops, crop_yield)` through a pre-trained classifier and
//! splits the returned label into ordered remediation steps.
//!
//! - `forest`: random forest loaded from a JSON export

pub mod forest;

pub use forest::ForestClassifier;

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diagnostics::coerce::number_field;
use crate::error::{DiagnosticError, Result};

/// Separator between steps inside a classifier label. The leading `.`
/// terminates the previous step and is kept with it.
pub const STEP_SEPARATOR: &str = "., ";

/// Inference capability consumed by the adapter.
///
/// Implementations are loaded once at startup and shared read-only across
/// requests, hence `Send + Sync` and `&self`.
pub trait PrescriptionClassifier: Send + Sync {
    /// Predict a label from `[withered_crops, crop_yield]`
    fn predict(&self, features: [f64; 2]) -> Result<String>;

    /// Short description for health reporting
    fn name(&self) -> String {
        "prescription classifier".to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionRequest {
    pub crop_yield: f64,
    pub withered_crops: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub predicted_prescription: Vec<String>,
}

/// Split a classifier label into remediation steps.
///
/// `"Apply fertilizer., Increase irrigation."` becomes
/// `["Apply fertilizer.", "Increase irrigation."]`. A label without a
/// separator is a single step. Stray leading or trailing commas are dropped.
pub fn split_prescription(label: &str) -> Result<Vec<String>> {
    let mut steps = Vec::new();
    let mut rest = label;

    while let Some(pos) = rest.find(STEP_SEPARATOR) {
        push_step(&mut steps, &rest[..pos + 1]);
        rest = &rest[pos + STEP_SEPARATOR.len()..];
    }
    push_step(&mut steps, rest);

    if steps.is_empty() {
        return Err(DiagnosticError::CollaboratorFailure(format!(
            "unparseable prescription label {:?}",
            label
        )));
    }
    Ok(steps)
}

fn push_step(steps: &mut Vec<String>, raw: &str) {
    let step = raw.trim().trim_matches(',').trim();
    if !step.is_empty() {
        steps.push(step.to_string());
    }
}

/// Coerce a `/predict-prescription` body; numeric strings are accepted
pub fn prescription_requests_from_json(body: &serde_json::Value) -> Result<Vec<PrescriptionRequest>> {
    let rows = body.as_array().ok_or_else(|| {
        DiagnosticError::malformed("body", None, "expected a JSON array of prescription requests")
    })?;

    rows.iter()
        .enumerate()
        .map(|(index, value)| {
            let row = value.as_object().ok_or_else(|| {
                DiagnosticError::malformed("prescription_request", Some(index), "expected a JSON object")
            })?;
            Ok(PrescriptionRequest {
                crop_yield: number_field(row, "crop_yield", Some(index))?,
                withered_crops: number_field(row, "withered_crops", Some(index))?,
            })
        })
        .collect()
}

/// Wraps an injected classifier; cheap to clone
#[derive(Clone)]
pub struct PrescriptionAdapter {
    classifier: Arc<dyn PrescriptionClassifier>,
}

impl PrescriptionAdapter {
    pub fn new(classifier: Arc<dyn PrescriptionClassifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier_name(&self) -> String {
        self.classifier.name()
    }

    /// Steps for a single feature pair
    pub fn prescribe(&self, withered_crops: f64, crop_yield: f64) -> Result<Vec<String>> {
        let label = self.classifier.predict([withered_crops, crop_yield])?;
        tracing::debug!(
            "Prescription for withered={} yield={}: {:?}",
            withered_crops,
            crop_yield,
            label
        );
        split_prescription(&label)
    }

    /// Classify every request independently. Output order matches input
    /// order; the first failure fails the whole batch.
    pub fn prescribe_batch(&self, requests: &[PrescriptionRequest]) -> Result<Vec<Prescription>> {
        requests
            .par_iter()
            .map(|req| {
                self.prescribe(req.withered_crops, req.crop_yield)
                    .map(|steps| Prescription { predicted_prescription: steps })
            })
            .collect()
    }
}
