//! Underwriting summary
//!
//! Assembles one evaluation into the plain-text memo the review desk
//! pastes into their tooling. The renderer is pure over a prepared
//! context; handlers build the context from the engine services.

pub mod renderer;

use serde::Serialize;

use crate::domain::entities::{
    round_half_up, LoanLine, LoanStatus, PriceBasis, Program, Seniority,
};

pub use renderer::render_memo;

/// One whole-property limit line of the memo
#[derive(Debug, Clone, Serialize)]
pub struct LimitLine {
    pub seniority: Seniority,
    pub ltv_percent: f64,
    pub limit: i64,
    pub available: i64,
}

/// Consulting and bridge fee figures, all in 만원
#[derive(Debug, Clone, Serialize)]
pub struct FeeSummary {
    pub consult_amount: i64,
    pub consult_rate: f64,
    pub consult_fee: i64,
    pub bridge_amount: i64,
    pub bridge_rate: f64,
    pub bridge_fee: i64,
}

impl FeeSummary {
    /// Fee lines exist only when at least one base amount is set
    pub fn compute(
        consult_amount: i64,
        consult_rate: f64,
        bridge_amount: i64,
        bridge_rate: f64,
    ) -> Option<FeeSummary> {
        if consult_amount <= 0 && bridge_amount <= 0 {
            return None;
        }
        Some(FeeSummary {
            consult_amount,
            consult_rate,
            consult_fee: round_half_up(consult_amount as f64 * consult_rate / 100.0),
            bridge_amount,
            bridge_rate,
            bridge_fee: round_half_up(bridge_amount as f64 * bridge_rate / 100.0),
        })
    }

    pub fn total(&self) -> i64 {
        self.consult_fee + self.bridge_fee
    }
}

/// Everything the renderer needs for one memo
#[derive(Debug, Clone)]
pub struct MemoContext {
    pub customer_name: String,
    pub address: String,
    pub area: String,
    /// Appraisal in 만원; 0 means unspecified and is not rendered
    pub kb_price: i64,
    pub price_basis: Option<PriceBasis>,
    pub deduction_amount: i64,
    pub deduction_region: Option<String>,
    pub loans: Vec<LoanLine>,
    pub limits: Vec<LimitLine>,
    pub fees: Option<FeeSummary>,
    pub rate_band: Option<String>,
    pub program: Option<Program>,
}

/// Principal subtotals per repayable status, in the fixed memo order
/// 선말소 → 대환 → 퇴거자금. Statuses with no principal are omitted.
pub fn status_principal_sums(loans: &[LoanLine]) -> Vec<(LoanStatus, i64)> {
    [
        LoanStatus::PriorPayoff,
        LoanStatus::Refinanced,
        LoanStatus::VacatingFunds,
    ]
    .into_iter()
    .filter_map(|status| {
        let sum: i64 = loans
            .iter()
            .filter(|line| line.status == status)
            .map(|line| line.principal)
            .sum();
        (sum > 0).then_some((status, sum))
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_summary_computes_both_fees() {
        let fees = FeeSummary::compute(10_000, 1.5, 5_000, 0.7).unwrap();
        assert_eq!(fees.consult_fee, 150);
        assert_eq!(fees.bridge_fee, 35);
        assert_eq!(fees.total(), 185);
    }

    #[test]
    fn fee_summary_absent_without_amounts() {
        assert!(FeeSummary::compute(0, 1.5, 0, 0.7).is_none());
        assert!(FeeSummary::compute(0, 0.0, 3_000, 0.7).is_some());
    }

    #[test]
    fn status_sums_keep_memo_order() {
        let line = |status, principal| LoanLine {
            lender: String::new(),
            max_amount: 0,
            ratio: 120.0,
            principal,
            status,
        };
        let loans = vec![
            line(LoanStatus::VacatingFunds, 3_000),
            line(LoanStatus::PriorPayoff, 5_000),
            line(LoanStatus::Maintained, 9_000),
            line(LoanStatus::PriorPayoff, 1_000),
        ];
        assert_eq!(
            status_principal_sums(&loans),
            vec![
                (LoanStatus::PriorPayoff, 6_000),
                (LoanStatus::VacatingFunds, 3_000),
            ]
        );
    }
}
