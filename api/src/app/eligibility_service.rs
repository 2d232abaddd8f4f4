//! Program eligibility gates
//!
//! Evaluates every gate of the selected program independently and returns
//! the full violation set - no short-circuiting, so the caller can light
//! up every failing field at once. Also resolves the Hope program's
//! published interest-rate band.

use std::sync::Arc;

use serde::Deserialize;

use crate::app::policy::PolicyTables;
use crate::app::region_classifier::{CountyRuling, RegionClassifier};
use crate::domain::entities::{
    building_age, EligibilityResult, Program, PropertyType, RegionScheme, RegionTier, Seniority,
    ServiceRegion, Violation,
};

/// Inputs shared by both program gate sets
#[derive(Debug, Clone, Deserialize)]
pub struct EligibilityInput {
    /// Appraisal (KB quote) in 만원; 0 reads as "not provided"
    #[serde(default)]
    pub kb_price: i64,
    /// Number of units in the complex, when known
    #[serde(default)]
    pub unit_count: Option<i64>,
    #[serde(default)]
    pub completion_date: Option<String>,
    pub property_type: PropertyType,
    #[serde(default)]
    pub address: String,
    pub seniority: Seniority,
    /// The LTV under consideration, when already determined
    #[serde(default)]
    pub ltv_percent: Option<f64>,
    /// Explicit tier override; absent means classify from the address
    #[serde(default)]
    pub region: Option<RegionTier>,
    pub as_of_year: i32,
}

pub struct EligibilityService {
    tables: Arc<PolicyTables>,
    regions: Arc<RegionClassifier>,
}

impl EligibilityService {
    pub fn new(tables: Arc<PolicyTables>, regions: Arc<RegionClassifier>) -> Self {
        Self { tables, regions }
    }

    /// Evaluate every gate of `program` against `input`.
    ///
    /// Only one program is active per evaluation; any program-specific UI
    /// state of the other (the deposit-deduction region selector) is reset
    /// by the caller on toggle.
    pub fn validate(&self, program: Program, input: &EligibilityInput) -> EligibilityResult {
        let violations = match program {
            Program::HopeCollateral => self.hope_gates(input),
            Program::MeritzCollateral => self.meritz_gates(input),
        };
        EligibilityResult {
            program,
            violations,
        }
    }

    fn hope_gates(&self, input: &EligibilityInput) -> Vec<Violation> {
        let mut violations = Vec::new();

        if let Some(units) = input.unit_count {
            if units > 0 && units < self.tables.hope_min_unit_count {
                violations.push(Violation::UnitCountBelowMinimum);
            }
        }

        if input.kb_price > 0 && input.kb_price < self.tables.hope_min_price {
            violations.push(Violation::AppraisalBelowMinimum);
        }

        if let Some(age) = self.age_of(input) {
            if age >= self.tables.hope_max_building_age {
                violations.push(Violation::BuildingTooOld);
            }
        }

        if !input.property_type.hope_supported() {
            violations.push(Violation::UnsupportedPropertyType);
        }

        if self.regions.hope_region(&input.address).is_none() {
            violations.push(Violation::OutsideServiceRegion);
        }

        if input.seniority.is_first() {
            if let Some(ltv) = input.ltv_percent {
                if ltv > self.tables.hope_senior_ltv_cap {
                    violations.push(Violation::SeniorLtvExceeded);
                }
            }
        }

        violations
    }

    fn meritz_gates(&self, input: &EligibilityInput) -> Vec<Violation> {
        let mut violations = Vec::new();

        if input.kb_price > 0 && input.kb_price < self.tables.meritz_min_price {
            violations.push(Violation::AppraisalBelowMinimum);
        }

        let tier = input
            .region
            .unwrap_or_else(|| self.regions.classify_tier(&input.address, RegionScheme::Meritz));
        if !input.property_type.is_apartment()
            && matches!(tier, RegionTier::Tier2 | RegionTier::Tier3)
        {
            violations.push(Violation::UnsupportedRegionPropertyCombo);
        }

        if self.regions.county_ruling(&input.address) == CountyRuling::Restricted {
            violations.push(Violation::CountyRestricted);
        }

        // Informational: the age cap already bounds the LTV figure, the
        // flag is surfaced for display only
        if let Some(age) = self.age_of(input) {
            if age >= self.tables.meritz_age_flag_years {
                violations.push(Violation::BuildingAgeCapped);
            }
        }

        violations
    }

    fn age_of(&self, input: &EligibilityInput) -> Option<i32> {
        input
            .completion_date
            .as_deref()
            .and_then(|date| building_age(date, input.as_of_year))
    }

    /// Hope interest-rate band for a metropolitan region and LTV: first
    /// matching policy row wins, the default band otherwise.
    pub fn rate_band(&self, region: ServiceRegion, ltv_percent: f64) -> String {
        for row in &self.tables.rate_bands {
            if row.regions.contains(&region) && ltv_percent < row.ltv_below {
                return row.band.clone();
            }
        }
        self.tables.rate_band_default.clone()
    }
}
