//! LTV determination result types

use serde::{Deserialize, Serialize};

/// A numeric adjustment applied after the base matrix lookup, in the order
/// the engine applied it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LtvAdjustment {
    /// Appraisal above 15억: 5-point cut
    HighValueCut,
    /// Building age >= 40 years: result capped at 60
    AgeCap,
    /// County-level address on the new-town exception list: 5-point cut
    NewTownCut,
}

/// Outcome of an LTV matrix evaluation.
///
/// `ineligible` is a tagged outcome, never a sentinel: a zero percentage
/// with `ineligible: true` means the combination is not underwritten at
/// all, which callers must not confuse with a genuine 0% policy decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LtvResult {
    pub value_percent: f64,
    pub ineligible: bool,
    pub adjustments: Vec<LtvAdjustment>,
}

impl LtvResult {
    pub fn ineligible() -> Self {
        Self {
            value_percent: 0.0,
            ineligible: true,
            adjustments: Vec::new(),
        }
    }

    pub fn eligible(value_percent: f64) -> Self {
        Self {
            value_percent,
            ineligible: false,
            adjustments: Vec::new(),
        }
    }
}
