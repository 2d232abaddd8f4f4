//! Underwriting policy tables
//!
//! Every policy figure the engine consumes lives here: region
//! classification rules, the new-town county exceptions, area breakpoints,
//! the LTV matrix, adjustment constants, program gates, and the Hope
//! interest-rate bands. The whole set is versioned data - deserializable
//! from a JSON file named by `POLICY_TABLES_PATH` - so a policy update
//! never touches control flow.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::entities::ServiceRegion;

/// One region classification rule: matches when every substring in `all`
/// occurs in the address. Rules are evaluated in order, first match wins;
/// narrow tier-3/2 city lists come before the broad tier-1 entries so a
/// province-level substring cannot shadow them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRule {
    pub all: Vec<String>,
    pub tier: u8,
}

/// Ordered Hope interest-rate band row: applies when the address region is
/// listed and the LTV is strictly below `ltv_below`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRule {
    pub regions: Vec<ServiceRegion>,
    pub ltv_below: f64,
    pub band: String,
}

/// Floor-area breakpoints of the LTV matrix, in ㎡
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AreaBreakpoints {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

/// Apartment percentages for one region tier, per area band
/// (≤ mid, ≤ high, > high) and lien position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApartmentRow {
    pub first: [f64; 3],
    pub second: [f64; 3],
}

/// The base LTV matrix. Non-apartment collateral is only underwritten in
/// tier 1, where seniority is ignored and a fourth (lowest) area band
/// applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LtvMatrix {
    pub apartment_tier1: ApartmentRow,
    pub apartment_tier2: ApartmentRow,
    pub apartment_tier3: ApartmentRow,
    /// Per area band (≤ low, ≤ mid, ≤ high, > high)
    pub non_apartment_tier1: [f64; 4],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyTables {
    /// Meritz capital tier table, ordered 3군 → 2군 → 1군
    pub meritz_regions: Vec<RegionRule>,
    /// Ownership-share lending tier table. Curated separately from the
    /// Meritz table; the lists overlap heavily but are not identical and
    /// must not be merged (flagged for product-owner review).
    pub share_regions: Vec<RegionRule>,
    /// County-level (군) districts exempt from the county restriction;
    /// these take a percentage cut instead.
    pub new_town_counties: Vec<String>,
    pub area_breakpoints: AreaBreakpoints,
    pub ltv_matrix: LtvMatrix,

    /// Appraisal threshold (만원) above which the high-value cut applies
    pub high_value_threshold: i64,
    pub high_value_cut: f64,
    /// Building age at which the LTV result is capped
    pub age_cap_years: i32,
    pub age_cap_percent: f64,
    pub new_town_cut: f64,

    /// Hope program gates
    pub hope_min_unit_count: i64,
    pub hope_min_price: i64,
    pub hope_max_building_age: i32,
    pub hope_senior_ltv_cap: f64,

    /// Meritz program gates
    pub meritz_min_price: i64,
    pub meritz_age_flag_years: i32,

    /// Hope interest-rate bands, ordered; `rate_band_default` applies when
    /// no row matches
    pub rate_bands: Vec<RateRule>,
    pub rate_band_default: String,
}

impl PolicyTables {
    /// Load the policy set: the JSON file at `path` when given, otherwise
    /// the built-in defaults.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(Path::new(path))
                    .with_context(|| format!("reading policy tables from {}", path))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing policy tables from {}", path))
            }
            None => Ok(Self::default()),
        }
    }
}

fn rule(all: &[&str], tier: u8) -> RegionRule {
    RegionRule {
        all: all.iter().map(|s| s.to_string()).collect(),
        tier,
    }
}

fn rate(regions: &[ServiceRegion], ltv_below: f64, band: &str) -> RateRule {
    RateRule {
        regions: regions.to_vec(),
        ltv_below,
        band: band.to_string(),
    }
}

fn meritz_region_rules() -> Vec<RegionRule> {
    let mut rules = Vec::new();

    // 남양주 first: it is tier 1 but contains the tier-2 substring 양주
    rules.push(rule(&["남양주"], 1));

    // 3군 (경기)
    for city in ["평택", "안성", "여주", "포천"] {
        rules.push(rule(&[city], 3));
    }

    // 2군 - 인천 (중구/동구/서구 need the city qualifier: the same district
    // names exist in 서울 and elsewhere)
    rules.push(rule(&["남동구"], 2));
    rules.push(rule(&["인천", "서구"], 2));
    rules.push(rule(&["인천", "동구"], 2));
    rules.push(rule(&["인천", "중구"], 2));
    // 2군 - 경기 (광주 qualified against 광주광역시)
    for city in [
        "시흥", "안산", "화성", "의정부", "양주", "고양", "동두천", "오산", "이천", "파주",
    ] {
        rules.push(rule(&[city], 2));
    }
    rules.push(rule(&["경기", "광주"], 2));

    // 1군 - 서울
    for district in [
        "강남구", "서초구", "송파구", "강동구", "마포구", "서대문구", "종로구", "용산구",
        "영등포구", "동작구", "관악구", "성동구", "광진구", "동대문구", "중랑구", "성북구",
        "강북구", "노원구", "도봉구", "은평구", "양천구", "구로구",
    ] {
        rules.push(rule(&[district], 1));
    }
    rules.push(rule(&["서울", "중구"], 1));
    // 1군 - 인천
    for district in ["계양구", "부평구", "연수구", "미추홀구"] {
        rules.push(rule(&[district], 1));
    }
    // 1군 - 경기
    for city in [
        "용인", "과천", "광명", "구리", "군포", "부천", "성남", "수원", "안양", "의왕", "하남",
        "김포",
    ] {
        rules.push(rule(&[city], 1));
    }

    rules
}

fn share_region_rules() -> Vec<RegionRule> {
    let mut rules = Vec::new();

    // 3군 (경기) - the share table does not list 포천
    for city in ["평택", "안성", "여주"] {
        rules.push(rule(&[city], 3));
    }

    // 2군 - 인천
    rules.push(rule(&["남동구"], 2));
    rules.push(rule(&["인천", "서구"], 2));
    rules.push(rule(&["인천", "동구"], 2));
    rules.push(rule(&["인천", "중구"], 2));
    // 2군 - 경기 (김포/남양주 sit in tier 2 here, unlike the Meritz table)
    for city in [
        "시흥", "안산", "화성", "의정부", "양주", "고양", "동두천", "오산", "이천", "파주",
        "김포", "남양주",
    ] {
        rules.push(rule(&[city], 2));
    }
    rules.push(rule(&["경기", "광주"], 2));

    // 1군 - 서울
    for district in [
        "강남구", "서초구", "송파구", "강동구", "마포구", "서대문구", "종로구", "용산구",
        "영등포구", "동작구", "관악구", "성동구", "광진구", "동대문구", "중랑구", "성북구",
        "강북구", "노원구", "도봉구", "은평구", "양천구", "구로구",
    ] {
        rules.push(rule(&[district], 1));
    }
    rules.push(rule(&["서울", "중구"], 1));
    // 1군 - 인천
    for district in ["계양구", "부평구", "연수구", "미추홀구"] {
        rules.push(rule(&[district], 1));
    }
    // 1군 - 경기
    for city in [
        "용인", "과천", "광명", "구리", "군포", "부천", "성남", "수원", "안양", "의왕", "하남",
    ] {
        rules.push(rule(&[city], 1));
    }

    rules
}

impl Default for PolicyTables {
    fn default() -> Self {
        Self {
            meritz_regions: meritz_region_rules(),
            share_regions: share_region_rules(),
            new_town_counties: vec![
                "기장군".to_string(),
                "달성군".to_string(),
                "울주군".to_string(),
            ],
            area_breakpoints: AreaBreakpoints {
                low: 62.8,
                mid: 95.9,
                high: 135.0,
            },
            ltv_matrix: LtvMatrix {
                apartment_tier1: ApartmentRow {
                    first: [83.0, 75.0, 60.0],
                    second: [85.0, 80.0, 70.0],
                },
                apartment_tier2: ApartmentRow {
                    first: [75.0, 70.0, 55.0],
                    second: [80.0, 75.0, 65.0],
                },
                apartment_tier3: ApartmentRow {
                    first: [70.0, 65.0, 50.0],
                    second: [75.0, 70.0, 60.0],
                },
                non_apartment_tier1: [75.0, 70.0, 60.0, 50.0],
            },
            high_value_threshold: 150_000,
            high_value_cut: 5.0,
            age_cap_years: 40,
            age_cap_percent: 60.0,
            new_town_cut: 5.0,
            hope_min_unit_count: 100,
            hope_min_price: 30_000,
            hope_max_building_age: 45,
            hope_senior_ltv_cap: 70.0,
            meritz_min_price: 10_000,
            meritz_age_flag_years: 40,
            rate_bands: vec![
                rate(&[ServiceRegion::Seoul], 70.0, "9.9% / 10.9%"),
                rate(&[ServiceRegion::Seoul], 75.0, "10.9% / 11.9%"),
                rate(&[ServiceRegion::Seoul], 80.0, "11.9% / 12.9%"),
                rate(
                    &[ServiceRegion::Gyeonggi, ServiceRegion::Incheon],
                    75.0,
                    "11.9% / 12.9%",
                ),
                rate(
                    &[ServiceRegion::Gyeonggi, ServiceRegion::Incheon],
                    80.0,
                    "12.9% / 13.9%",
                ),
            ],
            rate_band_default: "13.9% / 14.9%".to_string(),
        }
    }
}
