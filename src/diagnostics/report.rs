//! Report composition
//!
//! Runs the three axis classifiers over each observation and assembles the
//! per-plant narrative plus index-aligned label sequences.

use serde::Serialize;

use crate::diagnostics::classify::{classify_net_yield, classify_withered, classify_yield};
use crate::diagnostics::types::*;
use crate::error::Result;

/// Classification of a single observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantReport {
    pub plant: String,
    pub withered: WitheredLabel,
    pub crop_yield: YieldLabel,
    pub net_yield: NetYieldLabel,
    pub narrative: String,
}

/// Classification of a batch; every sequence is aligned with the input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub withered: Vec<WitheredLabel>,
    pub crop_yield: Vec<YieldLabel>,
    pub net_yield: Vec<NetYieldLabel>,
    pub plants: Vec<String>,
    pub narratives: Vec<String>,
}

/// Classify one observation and build its narrative.
///
/// Narrative layout: header line, then withered, yield and net-yield
/// sentences in that order. Fails with MalformedInput on `planted_qty` when a
/// Type B observation has no planted baseline.
pub fn compose_report(observation: &Observation) -> Result<PlantReport> {
    let withered = classify_withered(observation.crop_type, observation.withered_crops);
    let crop_yield = classify_yield(observation.crop_type, observation.crop_yield);
    let net_yield = classify_net_yield(
        observation.crop_type,
        observation.net_yield,
        observation.planted_qty,
    )?;

    tracing::debug!(
        "{} (type {}): withered={:?} yield={:?} net={:?}",
        observation.plant_name,
        observation.crop_type.code(),
        withered,
        crop_yield,
        net_yield
    );

    let mut narrative = format!("Report for {} crop:\n", observation.plant_name);
    narrative.push_str(withered.narrative());
    narrative.push_str(crop_yield.narrative());
    narrative.push_str(net_yield.narrative());

    Ok(PlantReport {
        plant: observation.plant_name.clone(),
        withered,
        crop_yield,
        net_yield,
        narrative,
    })
}

/// Classify a batch in order. The first failing row fails the batch and its
/// index is carried in the error.
pub fn compose_reports(observations: &[Observation]) -> Result<BatchReport> {
    let mut batch = BatchReport {
        withered: Vec::with_capacity(observations.len()),
        crop_yield: Vec::with_capacity(observations.len()),
        net_yield: Vec::with_capacity(observations.len()),
        plants: Vec::with_capacity(observations.len()),
        narratives: Vec::with_capacity(observations.len()),
    };

    for (idx, observation) in observations.iter().enumerate() {
        batch.push(compose_report(observation).map_err(|e| e.at_row(idx))?);
    }

    Ok(batch)
}

impl BatchReport {
    pub fn push(&mut self, report: PlantReport) {
        self.withered.push(report.withered);
        self.crop_yield.push(report.crop_yield);
        self.net_yield.push(report.net_yield);
        self.plants.push(report.plant);
        self.narratives.push(report.narrative);
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    /// Plant name of the final row; the scalar `plant` field of the wire format
    pub fn last_plant(&self) -> Option<&str> {
        self.plants.last().map(|s| s.as_str())
    }

    /// Wire representation served by `/pre-defined`.
    ///
    /// `withered_reports`, `crop_yield` and `net_yield` carry the canned
    /// messages per row; `labels` carries the stable label names.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "withered_reports": self.withered.iter().map(|l| l.message()).collect::<Vec<_>>(),
            "crop_yield": self.crop_yield.iter().map(|l| l.message()).collect::<Vec<_>>(),
            "net_yield": self.net_yield.iter().map(|l| l.message()).collect::<Vec<_>>(),
            "plant": self.last_plant(),
            "labels": {
                "withered_crops": self.withered,
                "crop_yield": self.crop_yield,
                "net_yield": self.net_yield,
            },
            "plants": self.plants,
            "reports": self.narratives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticError;

    fn obs(name: &str, crop_type: CropType, withered: f64, crop_yield: f64, net: f64, planted: Option<f64>) -> Observation {
        Observation {
            plant_name: name.to_string(),
            crop_type,
            withered_crops: withered,
            crop_yield,
            net_yield: net,
            planted_qty: planted,
        }
    }

    #[test]
    fn test_single_report_narrative_order() {
        let report = compose_report(&obs("tomato", CropType::TypeA, 6.0, 12.0, 4.0, None)).unwrap();

        assert_eq!(report.withered, WitheredLabel::Critical);
        assert_eq!(report.crop_yield, YieldLabel::Excellent);
        assert_eq!(report.net_yield, NetYieldLabel::BelowExpectations);

        assert!(report.narrative.starts_with("Report for tomato crop:\n"));
        let w = report.narrative.find("Withered crops have").unwrap();
        let y = report.narrative.find("Crop yield is exceptional").unwrap();
        let n = report.narrative.find("Net yield is lower").unwrap();
        assert!(w < y && y < n);
    }

    #[test]
    fn test_batch_alignment_and_last_plant() {
        let batch = compose_reports(&[
            obs("lettuce", CropType::TypeB, 0.0, 1.0, 30.0, Some(30.0)),
            obs("pepper", CropType::TypeA, 2.0, 7.0, 9.0, None),
            obs("cabbage", CropType::TypeB, 4.0, -1.0, -3.0, Some(10.0)),
        ])
        .unwrap();

        assert_eq!(batch.len(), 3);
        assert_eq!(
            batch.withered,
            vec![WitheredLabel::Excellent, WitheredLabel::Concerning, WitheredLabel::Concerning]
        );
        assert_eq!(
            batch.crop_yield,
            vec![YieldLabel::Satisfactory, YieldLabel::Satisfactory, YieldLabel::Disastrous]
        );
        assert_eq!(
            batch.net_yield,
            vec![NetYieldLabel::Average, NetYieldLabel::Average, NetYieldLabel::NegativeLoss]
        );
        assert_eq!(batch.plants, vec!["lettuce", "pepper", "cabbage"]);
        assert_eq!(batch.last_plant(), Some("cabbage"));
        assert!(batch.narratives[1].starts_with("Report for pepper crop:\n"));
    }

    #[test]
    fn test_empty_batch() {
        let batch = compose_reports(&[]).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.last_plant(), None);

        let json = batch.to_json();
        assert!(json["plant"].is_null());
        assert_eq!(json["withered_reports"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_wire_json_messages_and_labels() {
        let batch = compose_reports(&[obs("okra", CropType::TypeA, 0.0, 3.0, 15.0, None)]).unwrap();
        let json = batch.to_json();

        assert_eq!(json["withered_reports"][0], WitheredLabel::Excellent.message());
        assert_eq!(json["crop_yield"][0], "Crop yield is below expectations");
        assert_eq!(json["net_yield"][0], "Net yield exceeds expectations");
        assert_eq!(json["labels"]["withered_crops"][0], "excellent");
        assert_eq!(json["labels"]["crop_yield"][0], "below_expectations");
        assert_eq!(json["labels"]["net_yield"][0], "excellent");
        assert_eq!(json["plant"], "okra");
    }

    #[test]
    fn test_same_observation_twice_is_identical() {
        let o = obs("bean", CropType::TypeB, 2.0, 0.5, 5.0, Some(8.0));
        assert_eq!(compose_report(&o), compose_report(&o));
    }

    #[test]
    fn test_type_b_without_baseline_fails_batch_with_row() {
        let lone = obs("yam", CropType::TypeB, 1.0, 0.5, 12.0, None);
        assert_eq!(
            compose_report(&lone).unwrap_err(),
            DiagnosticError::missing("planted_qty", None)
        );

        let err = compose_reports(&[
            obs("pepper", CropType::TypeA, 2.0, 7.0, 9.0, None),
            lone,
        ])
        .unwrap_err();
        assert_eq!(err, DiagnosticError::missing("planted_qty", Some(1)));
        assert_eq!(err.to_string(), "row 1: field 'planted_qty': missing required field");
    }
}
