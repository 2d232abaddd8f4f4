//! Underwriting memo handler
//!
//! Runs one full evaluation - normalization, status breakdown, limit
//! lines, price basis, rate band - and renders the desk memo.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::ltv_limit;
use crate::domain::entities::{
    LoanBreakdown, LoanLine, LoanStatus, PriceBasis, Program,
};
use crate::error::AppError;
use crate::summary::{render_memo, FeeSummary, LimitLine, MemoContext};
use crate::AppState;

/// Core evaluation inputs; every scalar amount is free currency text
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MemoInputs {
    pub customer_name: String,
    pub address: String,
    pub area: String,
    pub kb_price: String,
    pub deduction_amount: String,
    pub deduction_region: Option<String>,
    /// LTV tiers to evaluate, in display order
    pub ltv_rates: Vec<f64>,
    pub program: Option<Program>,
}

/// One loan row as entered: text amounts, Korean status label
#[derive(Debug, Deserialize)]
pub struct MemoLoanRow {
    #[serde(default)]
    pub lender: String,
    #[serde(default)]
    pub max_amount: String,
    #[serde(default)]
    pub ratio: Option<f64>,
    #[serde(default)]
    pub principal: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MemoFees {
    pub consult_amt: String,
    pub consult_rate: f64,
    pub bridge_amt: String,
    pub bridge_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct MemoRequest {
    pub inputs: MemoInputs,
    #[serde(default)]
    pub loans: Vec<MemoLoanRow>,
    #[serde(default)]
    pub fees: Option<MemoFees>,
}

#[derive(Debug, Serialize)]
pub struct MemoResponse {
    pub memo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_basis: Option<String>,
    pub limits: Vec<LimitLine>,
}

/// POST /memo
pub async fn generate(
    State(state): State<AppState>,
    Json(request): Json<MemoRequest>,
) -> Result<Json<MemoResponse>, AppError> {
    let inputs = &request.inputs;
    let kb_price = state.amounts.normalize(&inputs.kb_price).await;
    let deduction = state.amounts.normalize(&inputs.deduction_amount).await;

    let mut loans: Vec<LoanLine> = Vec::with_capacity(request.loans.len());
    for row in &request.loans {
        let line = LoanLine {
            lender: row.lender.clone(),
            max_amount: state.amounts.normalize(&row.max_amount).await,
            ratio: row.ratio.unwrap_or(120.0),
            principal: state.amounts.normalize(&row.principal).await,
            status: row.status.parse().unwrap_or(LoanStatus::Unset),
        };
        if line.has_amount() {
            loans.push(line);
        }
    }

    let breakdown = LoanBreakdown::from_lines(&loans);
    let seniority = breakdown.seniority();

    let mut limits = Vec::new();
    if kb_price > 0 {
        for ltv in inputs.ltv_rates.iter().filter(|ltv| **ltv > 0.0) {
            let (limit, available) = ltv_limit(
                kb_price,
                deduction,
                breakdown.repayable_sum(),
                breakdown.maintained_sum,
                *ltv,
                seniority.is_first(),
            );
            limits.push(LimitLine {
                seniority,
                ltv_percent: *ltv,
                limit,
                available,
            });
        }
    }

    // Rate band: program selected, metropolitan address, and an LTV on
    // the table - the last tier is the one under negotiation
    let rate_band = match (inputs.program, limits.last()) {
        (Some(_), Some(last)) => state
            .regions
            .hope_region(&inputs.address)
            .map(|region| state.eligibility.rate_band(region, last.ltv_percent)),
        _ => None,
    };

    let fees = request.fees.as_ref();
    let fee_summary = match fees {
        Some(f) => FeeSummary::compute(
            state.amounts.normalize(&f.consult_amt).await,
            f.consult_rate,
            state.amounts.normalize(&f.bridge_amt).await,
            f.bridge_rate.unwrap_or(0.7),
        ),
        None => None,
    };

    let price_basis = PriceBasis::from_address(&inputs.address);
    let context = MemoContext {
        customer_name: inputs.customer_name.clone(),
        address: inputs.address.clone(),
        area: inputs.area.clone(),
        kb_price,
        price_basis,
        deduction_amount: deduction,
        deduction_region: inputs.deduction_region.clone(),
        loans,
        limits: limits.clone(),
        fees: fee_summary,
        rate_band,
        program: inputs.program,
    };

    Ok(Json(MemoResponse {
        memo: render_memo(&context),
        price_basis: price_basis.map(|b| b.to_string()),
        limits,
    }))
}
