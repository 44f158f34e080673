//! Observation and label types
//!
//! Crop type encoding, one observation row, and the three severity label
//! enums with their canned messages and narrative fragments.

use serde::{Deserialize, Serialize};

/// Crop category; selects which threshold table applies
///
/// Wire encoding: Type A = 1, Type B = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropType {
    TypeA,
    TypeB,
}

impl CropType {
    /// Decode the numeric wire value. Anything other than exactly 1 or 0 is rejected.
    pub fn from_code(code: f64) -> Option<Self> {
        if code == 1.0 {
            Some(CropType::TypeA)
        } else if code == 0.0 {
            Some(CropType::TypeB)
        } else {
            None
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            CropType::TypeA => 1,
            CropType::TypeB => 0,
        }
    }
}

/// One row of cultivation data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub plant_name: String,
    pub crop_type: CropType,
    pub withered_crops: f64,
    pub crop_yield: f64,
    pub net_yield: f64,
    /// Baseline for `net_yield`; only consulted for Type B
    pub planted_qty: Option<f64>,
}

// ============================================================================
// Severity labels
// ============================================================================

/// Withered-crop axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WitheredLabel {
    Excellent,
    Manageable,
    Concerning,
    Critical,
}

impl WitheredLabel {
    pub fn message(&self) -> &'static str {
        match self {
            WitheredLabel::Critical => {
                "The withered crops have significantly impacted yield. Immediate action is needed"
            }
            WitheredLabel::Concerning => {
                "The number of withered crops is concerning and impacting yield"
            }
            WitheredLabel::Excellent => {
                "The withered crops count is zero, indicating excellent crop health and minimal losses during cultivation. "
            }
            WitheredLabel::Manageable => {
                "There are some losses due to withered crops, but they're manageable"
            }
        }
    }

    /// Sentence used inside the per-plant narrative
    pub fn narrative(&self) -> &'static str {
        match self {
            WitheredLabel::Critical => {
                "Withered crops have significantly impacted yield. Immediate action is needed. "
            }
            WitheredLabel::Concerning => {
                "The number of withered crops is concerning and impacting yield. "
            }
            WitheredLabel::Excellent => {
                "The withered crops count is minimal, indicating excellent crop health and minimal losses during cultivation. \
                 This suggests effective pest control, optimal water management, and overall favorable growing conditions. \
                 Keep up the good work! "
            }
            WitheredLabel::Manageable => {
                "There are some losses due to withered crops, but they're manageable. "
            }
        }
    }
}

/// Crop-yield axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldLabel {
    Excellent,
    Satisfactory,
    BelowExpectations,
    Disastrous,
}

impl YieldLabel {
    pub fn message(&self) -> &'static str {
        match self {
            YieldLabel::Excellent => "Crop yield is exceptional!",
            YieldLabel::BelowExpectations => "Crop yield is below expectations",
            YieldLabel::Satisfactory => "crop yield is satisfactory",
            YieldLabel::Disastrous => "Crop yield is disastrously low",
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            YieldLabel::Excellent => "Crop yield is exceptional! ",
            YieldLabel::BelowExpectations => "Crop yield is below expectations. ",
            YieldLabel::Satisfactory => "Crop yield is satisfactory. ",
            YieldLabel::Disastrous => "Crop yield is disastrously low. ",
        }
    }
}

/// Net-yield axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetYieldLabel {
    Excellent,
    Average,
    BelowExpectations,
    NegativeLoss,
}

impl NetYieldLabel {
    pub fn message(&self) -> &'static str {
        match self {
            NetYieldLabel::Excellent => "Net yield exceeds expectations",
            NetYieldLabel::BelowExpectations => "Net yield is lower than anticipated",
            NetYieldLabel::Average => "Net yield is performing average",
            NetYieldLabel::NegativeLoss => "Net yield is negative, indicating significant losses",
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            NetYieldLabel::Excellent => "Net yield exceeds expectations.\n",
            NetYieldLabel::BelowExpectations => "Net yield is lower than anticipated.\n",
            NetYieldLabel::Average => "Net yield is performing average.\n",
            NetYieldLabel::NegativeLoss => "Net yield is negative, indicating significant losses.\n",
        }
    }
}
