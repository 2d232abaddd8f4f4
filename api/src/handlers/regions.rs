//! Region classification handler

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::domain::entities::RegionScheme;
use crate::error::AppError;
use crate::AppState;

/// Request body for address classification
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub address: String,
    /// "hope", "meritz", or "share"
    pub scheme: String,
}

/// POST /regions/classify
///
/// Classify a raw address under one lender scheme. Tiered schemes answer
/// with the tier number (null when unclassified); the Hope scheme answers
/// with the service-region check.
pub async fn classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let scheme: RegionScheme = request
        .scheme
        .parse()
        .map_err(|e: String| AppError::BadRequest(e))?;

    match scheme {
        RegionScheme::Hope => {
            let region = state.regions.hope_region(&request.address);
            Ok(Json(serde_json::json!({
                "scheme": "hope",
                "eligible": region.is_some(),
                "region": region.map(|r| r.to_string()),
            })))
        }
        RegionScheme::Meritz | RegionScheme::Share => {
            let tier = state.regions.classify_tier(&request.address, scheme);
            Ok(Json(serde_json::json!({
                "scheme": request.scheme.to_lowercase(),
                "tier": tier.as_number(),
                "label": tier.to_string(),
            })))
        }
    }
}
