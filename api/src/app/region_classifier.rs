//! Address-to-region classification
//!
//! Deterministic, pure substring matching of raw address text against the
//! ordered policy rule tables. Addresses are never parsed into structured
//! fields. An address no rule matches classifies as `Unclassified`, which
//! tier-dependent operations must refuse - there is no implicit default
//! tier.

use std::sync::Arc;

use regex::Regex;

use crate::app::policy::{PolicyTables, RegionRule};
use crate::domain::entities::{RegionScheme, RegionTier, ServiceRegion};

/// Ruling for the county-level (군) address restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountyRuling {
    /// Address carries no county designator
    NotCounty,
    /// County on the new-town exception list: percentage cut instead
    NewTownException,
    /// County outside the exception list: not underwritten
    Restricted,
}

/// Classifies addresses under the lender region tables
pub struct RegionClassifier {
    tables: Arc<PolicyTables>,
}

impl RegionClassifier {
    pub fn new(tables: Arc<PolicyTables>) -> Self {
        Self { tables }
    }

    /// Classify an address under the Meritz or Share tier table.
    /// The Hope scheme has no tiers; use [`RegionClassifier::hope_region`].
    pub fn classify_tier(&self, address: &str, scheme: RegionScheme) -> RegionTier {
        let rules = match scheme {
            RegionScheme::Meritz => &self.tables.meritz_regions,
            RegionScheme::Share => &self.tables.share_regions,
            RegionScheme::Hope => return RegionTier::Unclassified,
        };
        classify(address, rules)
    }

    /// Service region for the Hope program; `None` means the address is
    /// outside 서울/경기/인천 and the program does not apply.
    pub fn hope_region(&self, address: &str) -> Option<ServiceRegion> {
        ServiceRegion::from_address(address)
    }

    /// Evaluate the county-level restriction for an address.
    pub fn county_ruling(&self, address: &str) -> CountyRuling {
        if !has_county_designator(address) {
            return CountyRuling::NotCounty;
        }
        let exempt = self
            .tables
            .new_town_counties
            .iter()
            .any(|county| address.contains(county.as_str()));
        if exempt {
            CountyRuling::NewTownException
        } else {
            CountyRuling::Restricted
        }
    }
}

fn classify(address: &str, rules: &[RegionRule]) -> RegionTier {
    let address = address.trim().to_lowercase();
    if address.is_empty() {
        return RegionTier::Unclassified;
    }
    for rule in rules {
        let matches = rule
            .all
            .iter()
            .all(|needle| address.contains(&needle.to_lowercase()));
        if matches {
            return RegionTier::from_number(rule.tier).unwrap_or(RegionTier::Unclassified);
        }
    }
    RegionTier::Unclassified
}

/// A county designator is a hangul token ending in 군 followed by a
/// boundary - 군포시 must not read as a county.
fn has_county_designator(address: &str) -> bool {
    match Regex::new(r"[가-힣]+군(?:\s|$|,)") {
        Ok(re) => re.is_match(address),
        Err(_) => false,
    }
}
