//! Program eligibility domain entities
//!
//! Exactly one program is active per evaluation. Every gate is evaluated -
//! the full violation set comes back so callers can report field-level
//! failures instead of stopping at the first one.

use serde::{Deserialize, Serialize};

/// Lender program under evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Program {
    #[serde(rename = "hope")]
    HopeCollateral,
    #[serde(rename = "meritz")]
    MeritzCollateral,
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Program::HopeCollateral => write!(f, "hope"),
            Program::MeritzCollateral => write!(f, "meritz"),
        }
    }
}

/// One failed eligibility gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// Hope: complex has fewer than 100 units
    UnitCountBelowMinimum,
    /// Appraisal below the program floor (3억 Hope, 1억 Meritz)
    AppraisalBelowMinimum,
    /// Hope: building age >= 45 years
    BuildingTooOld,
    /// Hope: property type outside {apartment, mixed-use}
    UnsupportedPropertyType,
    /// Hope: address outside 서울/경기/인천
    OutsideServiceRegion,
    /// Hope: senior lien with LTV above 70
    SeniorLtvExceeded,
    /// Meritz: non-apartment collateral in a tier 2/3 region
    UnsupportedRegionPropertyCombo,
    /// Meritz: county-level address outside the new-town exception list
    CountyRestricted,
    /// Meritz: building age >= 40 - informational, the LTV cap already
    /// bounds the figure; surfaced for display only
    BuildingAgeCapped,
}

impl Violation {
    /// Informational flags do not block the program
    pub fn is_informational(&self) -> bool {
        matches!(self, Violation::BuildingAgeCapped)
    }
}

/// Full gate evaluation outcome for one program
#[derive(Debug, Clone, Serialize)]
pub struct EligibilityResult {
    pub program: Program,
    pub violations: Vec<Violation>,
}

impl EligibilityResult {
    /// Eligible when no blocking violation is present
    pub fn is_eligible(&self) -> bool {
        self.violations.iter().all(|v| v.is_informational())
    }
}
