//! LTV determination handlers

use axum::{extract::State, Json};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::app::{ltv_from_required, LtvInput};
use crate::domain::entities::{
    LoanLine, LtvResult, PropertyType, RegionTier, Seniority,
};
use crate::error::AppError;
use crate::AppState;

/// Request body for an LTV matrix lookup
#[derive(Debug, Deserialize)]
pub struct ComputeLtvRequest {
    #[serde(default)]
    pub area: f64,
    pub seniority: Seniority,
    /// Region tier number (1, 2, or 3)
    pub region: u8,
    pub property_type: PropertyType,
    /// Appraisal in 만원
    #[serde(default)]
    pub total_value: i64,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Evaluation year for building age; defaults to the current UTC year
    #[serde(default)]
    pub as_of_year: Option<i32>,
}

/// POST /ltv/compute
///
/// Base matrix lookup plus the ordered adjustments. An ineligible
/// combination is a success response with `ineligible: true`, distinct
/// from a 0% policy outcome.
pub async fn compute(
    State(state): State<AppState>,
    Json(request): Json<ComputeLtvRequest>,
) -> Result<Json<LtvResult>, AppError> {
    let region = RegionTier::from_number(request.region).ok_or_else(|| {
        AppError::BadRequest(format!("region tier must be 1-3, got {}", request.region))
    })?;

    let input = LtvInput {
        area: request.area,
        seniority: request.seniority,
        region,
        property_type: request.property_type,
        total_value: request.total_value,
        completion_date: request.completion_date,
        address: request.address,
        as_of_year: request
            .as_of_year
            .unwrap_or_else(|| chrono::Utc::now().year()),
    };

    let result = state.ltv_engine.compute(&input)?;
    Ok(Json(result))
}

/// Request body for the reverse derivation: which LTV covers the
/// requested cash. Scalar amounts are free currency text.
#[derive(Debug, Deserialize)]
pub struct LtvFromRequiredRequest {
    pub kb_price: String,
    pub required_amount: String,
    #[serde(default)]
    pub loans: Vec<LoanLine>,
    #[serde(default)]
    pub deduction_amount: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LtvFromRequiredResponse {
    pub ltv: i64,
}

/// POST /ltv/from-required
pub async fn from_required(
    State(state): State<AppState>,
    Json(request): Json<LtvFromRequiredRequest>,
) -> Result<Json<LtvFromRequiredResponse>, AppError> {
    let kb_price = state.amounts.normalize(&request.kb_price).await;
    let required = state.amounts.normalize(&request.required_amount).await;
    let deduction = match request.deduction_amount.as_deref() {
        Some(text) => state.amounts.normalize(text).await,
        None => 0,
    };

    let ltv = ltv_from_required(kb_price, required, &request.loans, deduction);
    Ok(Json(LtvFromRequiredResponse { ltv }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compute_request() {
        let request: ComputeLtvRequest = serde_json::from_str(
            r#"{
                "area": 80.0,
                "seniority": "first",
                "region": 1,
                "property_type": "APT",
                "total_value": 160000
            }"#,
        )
        .unwrap();
        assert_eq!(request.region, 1);
        assert_eq!(request.seniority, Seniority::First);
        assert_eq!(request.property_type, PropertyType::Apartment);
        assert!(request.as_of_year.is_none());
    }

    #[test]
    fn parse_from_required_request() {
        let request: LtvFromRequiredRequest = serde_json::from_str(
            r#"{
                "kb_price": "5억",
                "required_amount": "8000",
                "loans": [{"max_amount": 20000, "status": "유지"}]
            }"#,
        )
        .unwrap();
        assert_eq!(request.kb_price, "5억");
        assert_eq!(request.loans.len(), 1);
    }
}
