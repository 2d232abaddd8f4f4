//! LTV matrix engine
//!
//! Looks up the base LTV ceiling from (region tier, property type, floor
//! area, lien seniority) and applies the ordered numeric adjustments. The
//! order is fixed and each adjustment applies at most once:
//! high-value cut, then the building-age cap, then the county ruling.

use std::sync::Arc;

use serde::Deserialize;

use crate::app::policy::PolicyTables;
use crate::app::region_classifier::{CountyRuling, RegionClassifier};
use crate::domain::entities::{
    building_age, LtvAdjustment, LtvResult, PropertyType, RegionTier, Seniority,
};
use crate::error::DomainError;

/// Inputs for one LTV determination
#[derive(Debug, Clone, Deserialize)]
pub struct LtvInput {
    pub area: f64,
    pub seniority: Seniority,
    pub region: RegionTier,
    pub property_type: PropertyType,
    /// Appraisal in 만원
    #[serde(default)]
    pub total_value: i64,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub as_of_year: i32,
}

pub struct LtvEngine {
    tables: Arc<PolicyTables>,
    regions: Arc<RegionClassifier>,
}

impl LtvEngine {
    pub fn new(tables: Arc<PolicyTables>, regions: Arc<RegionClassifier>) -> Self {
        Self { tables, regions }
    }

    /// Determine the LTV ceiling for one collateral.
    ///
    /// An unclassified region is an error - tier-dependent computation
    /// never proceeds on an implicit default. An unsupported
    /// (region, property type) combination is not an error but a tagged
    /// ineligible result.
    pub fn compute(&self, input: &LtvInput) -> Result<LtvResult, DomainError> {
        if !input.region.is_classified() {
            return Err(DomainError::UnclassifiedRegion(
                "region must be resolved before LTV lookup".to_string(),
            ));
        }

        // Missing or degenerate area falls into the smallest apartment band
        let area = if input.area.is_finite() && input.area > 0.0 {
            input.area
        } else {
            self.tables.area_breakpoints.mid
        };

        let base = match self.base_percent(input.region, input.property_type, area, input.seniority)
        {
            Some(base) => base,
            None => return Ok(LtvResult::ineligible()),
        };

        let mut result = LtvResult::eligible(base);

        // (a) high-value cut
        if input.total_value > self.tables.high_value_threshold {
            result.value_percent =
                (result.value_percent - self.tables.high_value_cut).max(0.0);
            result.adjustments.push(LtvAdjustment::HighValueCut);
        }

        // (b) building-age cap - only ever lowers the current figure
        if let Some(age) = input
            .completion_date
            .as_deref()
            .and_then(|date| building_age(date, input.as_of_year))
        {
            if age >= self.tables.age_cap_years
                && result.value_percent > self.tables.age_cap_percent
            {
                result.value_percent = self.tables.age_cap_percent;
                result.adjustments.push(LtvAdjustment::AgeCap);
            }
        }

        // (c) county ruling
        if let Some(address) = input.address.as_deref() {
            match self.regions.county_ruling(address) {
                CountyRuling::NotCounty => {}
                CountyRuling::NewTownException => {
                    result.value_percent =
                        (result.value_percent - self.tables.new_town_cut).max(0.0);
                    result.adjustments.push(LtvAdjustment::NewTownCut);
                }
                CountyRuling::Restricted => {
                    result.ineligible = true;
                }
            }
        }

        Ok(result)
    }

    /// Base table lookup; `None` means the combination is not underwritten
    /// (non-apartment collateral outside tier 1).
    fn base_percent(
        &self,
        region: RegionTier,
        property_type: PropertyType,
        area: f64,
        seniority: Seniority,
    ) -> Option<f64> {
        let breaks = &self.tables.area_breakpoints;
        let matrix = &self.tables.ltv_matrix;

        if property_type.is_apartment() {
            let row = match region {
                RegionTier::Tier1 => &matrix.apartment_tier1,
                RegionTier::Tier2 => &matrix.apartment_tier2,
                RegionTier::Tier3 => &matrix.apartment_tier3,
                RegionTier::Unclassified => return None,
            };
            let band = if area <= breaks.mid {
                0
            } else if area <= breaks.high {
                1
            } else {
                2
            };
            let values = match seniority {
                Seniority::First => &row.first,
                Seniority::Second => &row.second,
            };
            Some(values[band])
        } else {
            // Non-apartment: tier 1 only, seniority ignored, four bands
            match region {
                RegionTier::Tier1 => {
                    let band = if area <= breaks.low {
                        0
                    } else if area <= breaks.mid {
                        1
                    } else if area <= breaks.high {
                        2
                    } else {
                        3
                    };
                    Some(matrix.non_apartment_tier1[band])
                }
                _ => None,
            }
        }
    }
}
