//! Program eligibility handler

use axum::{extract::State, Json};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::app::EligibilityInput;
use crate::domain::entities::{
    Program, PropertyType, RegionTier, Seniority, Violation,
};
use crate::error::AppError;
use crate::AppState;

/// Request body for a program eligibility check
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    pub program: Program,
    #[serde(default)]
    pub kb_price: i64,
    #[serde(default)]
    pub unit_count: Option<i64>,
    #[serde(default)]
    pub completion_date: Option<String>,
    pub property_type: PropertyType,
    #[serde(default)]
    pub address: String,
    pub seniority: Seniority,
    #[serde(default)]
    pub ltv_percent: Option<f64>,
    /// Explicit tier number override; absent classifies from the address
    #[serde(default)]
    pub region: Option<u8>,
    #[serde(default)]
    pub as_of_year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub program: Program,
    pub eligible: bool,
    pub violations: Vec<Violation>,
    /// Hope interest-rate band, when the inputs pin one down
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_band: Option<String>,
}

/// POST /eligibility/validate
///
/// Evaluates every gate of the selected program - the full violation set
/// comes back for field-level reporting.
pub async fn validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, AppError> {
    let region = match request.region {
        Some(n) => Some(RegionTier::from_number(n).ok_or_else(|| {
            AppError::BadRequest(format!("region tier must be 1-3, got {}", n))
        })?),
        None => None,
    };

    let input = EligibilityInput {
        kb_price: request.kb_price,
        unit_count: request.unit_count,
        completion_date: request.completion_date,
        property_type: request.property_type,
        address: request.address,
        seniority: request.seniority,
        ltv_percent: request.ltv_percent,
        region,
        as_of_year: request
            .as_of_year
            .unwrap_or_else(|| chrono::Utc::now().year()),
    };

    let result = state.eligibility.validate(request.program, &input);

    let rate_band = match (request.program, request.ltv_percent) {
        (Program::HopeCollateral, Some(ltv)) => state
            .regions
            .hope_region(&input.address)
            .map(|region| state.eligibility.rate_band(region, ltv)),
        _ => None,
    };

    Ok(Json(ValidateResponse {
        program: result.program,
        eligible: result.is_eligible(),
        violations: result.violations,
        rate_band,
    }))
}
