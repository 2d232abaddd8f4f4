//! Per-owner share-limit computation
//!
//! Computes an individual co-owner's lending capacity from the appraisal,
//! an LTV tier, and their ownership share. Seniority is derived once from
//! the loan set; a per-owner "available" figure only exists for senior
//! positions - junior claims must be netted against the full lien stack
//! elsewhere and are intentionally reported without one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::app::region_classifier::RegionClassifier;
use crate::domain::entities::{
    round_half_up, LoanBreakdown, LoanLine, Owner, RegionScheme, RegionTier,
};
use crate::error::DomainError;

/// Maximum LTV tiers one request may evaluate
const MAX_TIERS: usize = 2;

#[derive(Debug, Clone, Deserialize)]
pub struct ShareLimitInput {
    /// Appraisal in 만원
    pub total_value: i64,
    /// LTV tiers to evaluate, at most two
    pub ltv_tiers: Vec<f64>,
    #[serde(default)]
    pub loans: Vec<LoanLine>,
    pub owner: Owner,
    #[serde(default)]
    pub address: Option<String>,
    /// Pledged (질권) share lending restricts the address to tier 1
    #[serde(default)]
    pub pledge_program: bool,
}

/// One output line per evaluated LTV tier
#[derive(Debug, Clone, Serialize)]
pub struct ShareLimitLine {
    pub ltv_percent: f64,
    pub limit: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<i64>,
    /// Owner display name, first line only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Display share text, first line only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<String>,
}

pub struct ShareService {
    regions: Arc<RegionClassifier>,
}

impl ShareService {
    pub fn new(regions: Arc<RegionClassifier>) -> Self {
        Self { regions }
    }

    pub fn compute(&self, input: &ShareLimitInput) -> Result<Vec<ShareLimitLine>, DomainError> {
        let share_percent = input.owner.share_percent().ok_or_else(|| {
            DomainError::Validation(
                "owner share percent must be set and inside (0, 100)".to_string(),
            )
        })?;

        if input.ltv_tiers.is_empty() || input.ltv_tiers.len() > MAX_TIERS {
            return Err(DomainError::Validation(format!(
                "between 1 and {} LTV tiers per evaluation",
                MAX_TIERS
            )));
        }
        if input.ltv_tiers.iter().any(|ltv| *ltv <= 0.0) {
            return Err(DomainError::Validation(
                "LTV tiers must be positive".to_string(),
            ));
        }

        if input.pledge_program {
            let address = input.address.as_deref().ok_or_else(|| {
                DomainError::Validation(
                    "pledged share lending requires the collateral address".to_string(),
                )
            })?;
            let tier = self.regions.classify_tier(address, RegionScheme::Share);
            if tier != RegionTier::Tier1 {
                return Err(DomainError::Unsupported(format!(
                    "pledged share lending is limited to tier 1 collateral (classified: {})",
                    tier
                )));
            }
        }

        let breakdown = LoanBreakdown::from_lines(&input.loans);
        let senior = breakdown.seniority().is_first();
        let repayable = breakdown.repayable_sum();

        let lines = input
            .ltv_tiers
            .iter()
            .enumerate()
            .map(|(index, ltv)| {
                let limit = round_half_up(
                    input.total_value as f64 * ltv / 100.0 * share_percent / 100.0,
                );
                let available = senior.then(|| (limit - repayable).max(0));
                ShareLimitLine {
                    ltv_percent: *ltv,
                    limit,
                    available,
                    owner: (index == 0).then(|| input.owner.name.clone()),
                    share: (index == 0).then(|| input.owner.display_share()).flatten(),
                }
            })
            .collect();

        Ok(lines)
    }
}
