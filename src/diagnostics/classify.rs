//! Severity classification for the three cultivation axes.
//!
//! Each axis is an ordered chain of guarded rules evaluated top to bottom;
//! the first matching rule wins. Type A and Type B crops are measured on
//! different scales, so every axis keeps one chain per crop type.

use crate::diagnostics::types::*;
use crate::error::{DiagnosticError, Result};

// ============================================================================
// Withered-crop axis
// ============================================================================

/// Type A critical threshold (inclusive)
pub const WITHERED_CRITICAL_A: f64 = 5.0;

/// Type B thresholds
pub const WITHERED_CRITICAL_B: f64 = 5.0; // exclusive
pub const WITHERED_CONCERNING_B: f64 = 3.0;
pub const WITHERED_MANAGEABLE_B: f64 = 1.0;

/// Classify the withered-crop count.
///
/// | Crop   | Rule (in order)   | Label      |
/// |--------|-------------------|------------|
/// | Type A | `c >= 5`          | Critical   |
/// | Type A | `0 < c < 5`       | Concerning |
/// | Type A | `c == 0`          | Excellent  |
/// | Type A | otherwise (c < 0) | Manageable |
/// | Type B | `c > 5`           | Critical   |
/// | Type B | `c >= 3`          | Concerning |
/// | Type B | `1 <= c < 3`      | Manageable |
/// | Type B | otherwise         | Excellent  |
pub fn classify_withered(crop_type: CropType, count: f64) -> WitheredLabel {
    match crop_type {
        CropType::TypeA => {
            if count >= WITHERED_CRITICAL_A {
                WitheredLabel::Critical
            } else if count > 0.0 {
                WitheredLabel::Concerning
            } else if count == 0.0 {
                WitheredLabel::Excellent
            } else {
                WitheredLabel::Manageable
            }
        }
        CropType::TypeB => {
            if count > WITHERED_CRITICAL_B {
                WitheredLabel::Critical
            } else if count >= WITHERED_CONCERNING_B {
                WitheredLabel::Concerning
            } else if count >= WITHERED_MANAGEABLE_B {
                WitheredLabel::Manageable
            } else {
                WitheredLabel::Excellent
            }
        }
    }
}

// ============================================================================
// Crop-yield axis
// ============================================================================

pub const YIELD_BELOW_A: f64 = 5.0;
pub const YIELD_EXCELLENT_A: f64 = 10.0;

/// Type B measures yield as a ratio where 1.0 is the expected harvest.
pub const YIELD_EXPECTED_B: f64 = 1.0;

/// Classify crop yield.
///
/// Negative yield is checked first so it is never shadowed by the
/// below-expectations range.
/// - Type A: `< 0` Disastrous, `< 5` BelowExpectations, `>= 10` Excellent,
///   otherwise Satisfactory
/// - Type B: `== 1` Satisfactory, `0 < y < 1` BelowExpectations,
///   `< 0` Disastrous, `> 1` Excellent, `== 0` BelowExpectations
pub fn classify_yield(crop_type: CropType, crop_yield: f64) -> YieldLabel {
    match crop_type {
        CropType::TypeA => match crop_yield {
            y if y < 0.0 => YieldLabel::Disastrous,
            y if y < YIELD_BELOW_A => YieldLabel::BelowExpectations,
            y if y >= YIELD_EXCELLENT_A => YieldLabel::Excellent,
            _ => YieldLabel::Satisfactory,
        },
        CropType::TypeB => match crop_yield {
            y if y == YIELD_EXPECTED_B => YieldLabel::Satisfactory,
            y if y > 0.0 && y < YIELD_EXPECTED_B => YieldLabel::BelowExpectations,
            y if y < 0.0 => YieldLabel::Disastrous,
            y if y > YIELD_EXPECTED_B => YieldLabel::Excellent,
            // Zero harvest: nothing gained, nothing lost
            _ => YieldLabel::BelowExpectations,
        },
    }
}

// ============================================================================
// Net-yield axis
// ============================================================================

pub const NET_EXCELLENT_A: f64 = 12.0;
pub const NET_AVERAGE_A: f64 = 8.0;

/// Classify net yield.
///
/// Type A compares against fixed thresholds (12 / 8). Type B compares against
/// the planted quantity of the same row. For both, a negative net yield is a
/// loss regardless of the other rules.
///
/// A Type B row without `planted_qty` is a MalformedInput error; the row
/// index is attached by the caller.
pub fn classify_net_yield(crop_type: CropType, net_yield: f64, planted_qty: Option<f64>) -> Result<NetYieldLabel> {
    let planted = match (crop_type, planted_qty) {
        (CropType::TypeB, None) => return Err(DiagnosticError::missing("planted_qty", None)),
        (_, planted) => planted,
    };

    if net_yield < 0.0 {
        return Ok(NetYieldLabel::NegativeLoss);
    }

    let label = match (crop_type, planted) {
        (CropType::TypeB, Some(planted)) => {
            if net_yield == planted {
                NetYieldLabel::Average
            } else if net_yield > planted {
                NetYieldLabel::Excellent
            } else {
                NetYieldLabel::BelowExpectations
            }
        }
        _ => {
            if net_yield >= NET_EXCELLENT_A {
                NetYieldLabel::Excellent
            } else if net_yield >= NET_AVERAGE_A {
                NetYieldLabel::Average
            } else {
                NetYieldLabel::BelowExpectations
            }
        }
    };

    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_withered_type_a() {
        let a = CropType::TypeA;
        assert_eq!(classify_withered(a, 0.0), WitheredLabel::Excellent);
        assert_eq!(classify_withered(a, 0.5), WitheredLabel::Concerning);
        assert_eq!(classify_withered(a, 4.99), WitheredLabel::Concerning);
        assert_eq!(classify_withered(a, 5.0), WitheredLabel::Critical);
        assert_eq!(classify_withered(a, 40.0), WitheredLabel::Critical);
        assert_eq!(classify_withered(a, -1.0), WitheredLabel::Manageable);
    }

    #[test]
    fn test_withered_type_b() {
        let b = CropType::TypeB;
        assert_eq!(classify_withered(b, 0.0), WitheredLabel::Excellent);
        assert_eq!(classify_withered(b, 0.9), WitheredLabel::Excellent);
        assert_eq!(classify_withered(b, 1.0), WitheredLabel::Manageable);
        assert_eq!(classify_withered(b, 2.99), WitheredLabel::Manageable);
        assert_eq!(classify_withered(b, 3.0), WitheredLabel::Concerning);
        assert_eq!(classify_withered(b, 5.0), WitheredLabel::Concerning);
        assert_eq!(classify_withered(b, 5.01), WitheredLabel::Critical);
    }

    #[test]
    fn test_yield_type_a_boundaries() {
        let a = CropType::TypeA;
        assert_eq!(classify_yield(a, -0.1), YieldLabel::Disastrous);
        assert_eq!(classify_yield(a, 0.0), YieldLabel::BelowExpectations);
        assert_eq!(classify_yield(a, 4.9), YieldLabel::BelowExpectations);
        assert_eq!(classify_yield(a, 5.0), YieldLabel::Satisfactory);
        assert_eq!(classify_yield(a, 9.99), YieldLabel::Satisfactory);
        assert_eq!(classify_yield(a, 10.0), YieldLabel::Excellent);
    }

    #[test]
    fn test_yield_type_b() {
        let b = CropType::TypeB;
        assert_eq!(classify_yield(b, 1.0), YieldLabel::Satisfactory);
        assert_eq!(classify_yield(b, 0.4), YieldLabel::BelowExpectations);
        assert_eq!(classify_yield(b, -2.0), YieldLabel::Disastrous);
        assert_eq!(classify_yield(b, 1.5), YieldLabel::Excellent);
        assert_eq!(classify_yield(b, 0.0), YieldLabel::BelowExpectations);
    }

    #[test]
    fn test_net_yield_type_a() {
        let a = CropType::TypeA;
        assert_eq!(classify_net_yield(a, 12.0, None).unwrap(), NetYieldLabel::Excellent);
        assert_eq!(classify_net_yield(a, 11.9, None).unwrap(), NetYieldLabel::Average);
        assert_eq!(classify_net_yield(a, 8.0, None).unwrap(), NetYieldLabel::Average);
        assert_eq!(classify_net_yield(a, 7.9, None).unwrap(), NetYieldLabel::BelowExpectations);
        assert_eq!(classify_net_yield(a, 0.0, None).unwrap(), NetYieldLabel::BelowExpectations);
        assert_eq!(classify_net_yield(a, -0.5, None).unwrap(), NetYieldLabel::NegativeLoss);
    }

    #[test]
    fn test_net_yield_type_b_against_planted() {
        let b = CropType::TypeB;
        assert_eq!(classify_net_yield(b, 20.0, Some(20.0)).unwrap(), NetYieldLabel::Average);
        assert_eq!(classify_net_yield(b, 25.0, Some(20.0)).unwrap(), NetYieldLabel::Excellent);
        assert_eq!(classify_net_yield(b, 0.0, Some(20.0)).unwrap(), NetYieldLabel::BelowExpectations);
        assert_eq!(classify_net_yield(b, 19.0, Some(20.0)).unwrap(), NetYieldLabel::BelowExpectations);
    }

    #[test]
    fn test_negative_net_yield_overrides_planted() {
        let b = CropType::TypeB;
        assert_eq!(classify_net_yield(b, -1.0, Some(20.0)).unwrap(), NetYieldLabel::NegativeLoss);
        assert_eq!(classify_net_yield(b, -1.0, Some(-1.0)).unwrap(), NetYieldLabel::NegativeLoss);
        assert_eq!(classify_net_yield(b, -5.0, Some(-10.0)).unwrap(), NetYieldLabel::NegativeLoss);
    }

    #[test]
    fn test_type_b_without_planted_qty_is_rejected() {
        let err = classify_net_yield(CropType::TypeB, 5.0, None).unwrap_err();
        assert_eq!(err, DiagnosticError::missing("planted_qty", None));

        // Even a loss needs its baseline on Type B rows
        assert!(classify_net_yield(CropType::TypeB, -5.0, None).is_err());

        // Type A never consults it
        assert_eq!(classify_net_yield(CropType::TypeA, 5.0, None).unwrap(), NetYieldLabel::BelowExpectations);
    }

    #[test]
    fn test_classification_is_repeatable() {
        for &c in &[0.0, 1.0, 3.0, 5.0, 6.0] {
            assert_eq!(
                classify_withered(CropType::TypeB, c),
                classify_withered(CropType::TypeB, c)
            );
        }
    }
}
