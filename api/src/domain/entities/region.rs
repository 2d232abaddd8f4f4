//! Region classification domain entities
//!
//! Addresses are classified by case-insensitive substring matching against
//! ordered policy tables - never parsed into structured fields. Each lender
//! scheme keeps its own table.

use serde::{Deserialize, Serialize};

/// Which lender's classification table to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionScheme {
    /// Hope collateral program: metropolitan service-area check only
    Hope,
    /// Meritz capital tiered table
    Meritz,
    /// Ownership-share lending table (curated separately from Meritz)
    Share,
}

impl std::str::FromStr for RegionScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hope" => Ok(RegionScheme::Hope),
            "meritz" => Ok(RegionScheme::Meritz),
            "share" => Ok(RegionScheme::Share),
            _ => Err(format!("Unknown region scheme: {}", s)),
        }
    }
}

/// Tier under the Meritz or Share table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTier {
    Tier1,
    Tier2,
    Tier3,
    Unclassified,
}

impl RegionTier {
    pub fn from_number(n: u8) -> Option<RegionTier> {
        match n {
            1 => Some(RegionTier::Tier1),
            2 => Some(RegionTier::Tier2),
            3 => Some(RegionTier::Tier3),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<u8> {
        match self {
            RegionTier::Tier1 => Some(1),
            RegionTier::Tier2 => Some(2),
            RegionTier::Tier3 => Some(3),
            RegionTier::Unclassified => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        !matches!(self, RegionTier::Unclassified)
    }
}

impl std::fmt::Display for RegionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegionTier::Tier1 => write!(f, "1군"),
            RegionTier::Tier2 => write!(f, "2군"),
            RegionTier::Tier3 => write!(f, "3군"),
            RegionTier::Unclassified => write!(f, "미분류"),
        }
    }
}

/// Metropolitan service regions recognized by the Hope program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRegion {
    Seoul,
    Gyeonggi,
    Incheon,
}

impl ServiceRegion {
    /// Extract the service region from an address.
    /// Checked 서울 > 인천 > 경기 so "경기" inside a street name cannot
    /// shadow a city prefix.
    pub fn from_address(address: &str) -> Option<ServiceRegion> {
        if address.contains("서울") {
            Some(ServiceRegion::Seoul)
        } else if address.contains("인천") {
            Some(ServiceRegion::Incheon)
        } else if address.contains("경기") {
            Some(ServiceRegion::Gyeonggi)
        } else {
            None
        }
    }
}

impl std::fmt::Display for ServiceRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceRegion::Seoul => write!(f, "서울"),
            ServiceRegion::Gyeonggi => write!(f, "경기"),
            ServiceRegion::Incheon => write!(f, "인천"),
        }
    }
}
