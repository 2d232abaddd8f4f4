//! Amount normalization handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Request body for amount normalization
#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
}

/// Response body: the amount in 만원. Zero means the text was
/// unparseable - callers must read it as "unspecified", never as an
/// asserted zero-value figure.
#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub amount: i64,
}

/// POST /amounts/normalize
///
/// Normalize free currency text ("6억 5,500", "2천만", "50+3천만") to a
/// 만원 amount. Never errors.
pub async fn normalize(
    State(state): State<AppState>,
    Json(request): Json<NormalizeRequest>,
) -> Json<NormalizeResponse> {
    let amount = state.amounts.normalize(&request.text).await;
    Json(NormalizeResponse { amount })
}
