//! Growth Rate Comparison
//!
//! Compares a recent growth measurement with the historical average and
//! composes a verdict message.

use serde::{Deserialize, Serialize};

/// Shared text for the equal case and the zero-average short-circuit
pub const NO_SIGNIFICANT_INCREASE: &str = "No significant increase in growth rate.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthVerdict {
    Higher,
    Lower,
    NoChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthComparison {
    pub verdict: GrowthVerdict,
    /// `None` when no percentage is computed (zero average, or lower growth)
    pub percentage_delta: Option<f64>,
    pub message: String,
}

/// Percentage change relative to the magnitude of the average.
///
/// Returns `None` for a zero average instead of dividing by it.
pub fn percentage_increase(average: f64, recent: f64) -> Option<f64> {
    if average == 0.0 {
        return None;
    }
    Some(((recent - average) / average.abs()) * 100.0)
}

/// Compare recent growth against the average.
///
/// Only the higher case reports a delta; a lower reading reports the
/// average it fell short of.
pub fn compare_growth(average: f64, recent: f64) -> GrowthComparison {
    if recent > average {
        match percentage_increase(average, recent) {
            Some(delta) => GrowthComparison {
                verdict: GrowthVerdict::Higher,
                percentage_delta: Some(delta),
                message: format!(
                    "You're doing well! Recent plant growth is higher than average growth by {:.2}%.",
                    delta
                ),
            },
            None => GrowthComparison {
                verdict: GrowthVerdict::Higher,
                percentage_delta: None,
                message: NO_SIGNIFICANT_INCREASE.to_string(),
            },
        }
    } else if recent < average {
        GrowthComparison {
            verdict: GrowthVerdict::Lower,
            percentage_delta: None,
            message: format!(
                "Your plant has a lower growth rate that is lower than your usual {:.2}%.",
                average
            ),
        }
    } else {
        GrowthComparison {
            verdict: GrowthVerdict::NoChange,
            percentage_delta: Some(0.0),
            message: NO_SIGNIFICANT_INCREASE.to_string(),
        }
    }
}
