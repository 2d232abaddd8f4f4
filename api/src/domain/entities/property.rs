//! Property domain entities
//!
//! Property type, building-age derivation from the registered completion
//! date, and the appraisal basis implied by the floor designator in an
//! address (floors 1-2 are priced on the lower-bound quote).

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Collateral property type
///
/// Wire names follow the appraisal feed ("APT", "mixed", "other");
/// unrecognized input deserializes as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Apartment,
    MixedUse,
    Other,
    Unknown,
}

impl Serialize for PropertyType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or(PropertyType::Unknown))
    }
}

impl PropertyType {
    /// Apartment pricing rows in the LTV matrix apply only to true
    /// apartments; mixed-use and everything else take the non-apartment row.
    pub fn is_apartment(&self) -> bool {
        matches!(self, PropertyType::Apartment)
    }

    /// The Hope program accepts apartments and mixed-use units
    pub fn hope_supported(&self) -> bool {
        matches!(self, PropertyType::Apartment | PropertyType::MixedUse)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::Apartment => write!(f, "APT"),
            PropertyType::MixedUse => write!(f, "mixed"),
            PropertyType::Other => write!(f, "other"),
            PropertyType::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for PropertyType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "apt" | "apartment" | "아파트" => PropertyType::Apartment,
            "mixed" | "주상복합" => PropertyType::MixedUse,
            "non-apt" | "other" => PropertyType::Other,
            _ => PropertyType::Unknown,
        })
    }
}

/// Parse a completion date in any of the registry formats
/// (`YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY.MM`, `YYYY.MM.DD`)
/// and return the building age in years as of `as_of_year`.
///
/// Unparseable input yields `None`; a future completion year clamps to 0.
pub fn building_age(completion_date: &str, as_of_year: i32) -> Option<i32> {
    let re = Regex::new(r"^(\d{4})(?:[.\-]\d{1,2})?(?:[.\-]\d{1,2})?$").ok()?;
    let caps = re.captures(completion_date.trim())?;
    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    Some((as_of_year - year).max(0))
}

/// Appraisal basis implied by the floor of the unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBasis {
    /// 하안가 - lower-bound quote, floors 1-2
    LowerBound,
    /// 일반가 - standard quote
    Standard,
}

impl PriceBasis {
    /// Extract the floor designator (`제N층` or `N층`) from an address.
    /// Returns `None` when no floor is present.
    pub fn from_address(address: &str) -> Option<PriceBasis> {
        if address.trim().is_empty() {
            return None;
        }
        let re = Regex::new(r"(?:제)?(\d+)층").ok()?;
        let caps = re.captures(address)?;
        let floor: i64 = caps.get(1)?.as_str().parse().ok()?;
        if floor <= 2 {
            Some(PriceBasis::LowerBound)
        } else {
            Some(PriceBasis::Standard)
        }
    }
}

impl std::fmt::Display for PriceBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceBasis::LowerBound => write!(f, "하안가 적용"),
            PriceBasis::Standard => write!(f, "일반가 적용"),
        }
    }
}
