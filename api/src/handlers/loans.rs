//! Loan reconciliation handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::app::{reconcile, EditedField};
use crate::error::AppError;
use crate::AppState;

fn default_ratio() -> f64 {
    120.0
}

/// Request body for loan-line reconciliation. Amounts are free currency
/// text and run through normalization before the figures reconcile.
#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    #[serde(default)]
    pub max_amount: Option<String>,
    #[serde(default)]
    pub principal: Option<String>,
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    /// Which field the caller just edited. Defaults to the only amount
    /// present; a request carrying both reconciles from the maximum.
    #[serde(default)]
    pub edited: Option<EditedField>,
}

#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub max_amount: i64,
    pub principal: i64,
    pub ratio: f64,
}

/// POST /loans/reconcile
///
/// Keep a loan line's (maximum secured amount, ratio, principal) triple
/// consistent. A ratio of zero or below derives nothing - the fields come
/// back as entered.
pub async fn reconcile_line(
    State(state): State<AppState>,
    Json(request): Json<ReconcileRequest>,
) -> Result<Json<ReconcileResponse>, AppError> {
    let max_amount = match request.max_amount.as_deref() {
        Some(text) => state.amounts.normalize(text).await,
        None => 0,
    };
    let principal = match request.principal.as_deref() {
        Some(text) => state.amounts.normalize(text).await,
        None => 0,
    };

    let edited = request.edited.unwrap_or_else(|| {
        if request.principal.is_some() && request.max_amount.is_none() {
            EditedField::Principal
        } else {
            EditedField::MaxAmount
        }
    });

    let line = reconcile(max_amount, principal, request.ratio, edited);
    Ok(Json(ReconcileResponse {
        max_amount: line.max_amount,
        principal: line.principal,
        ratio: request.ratio,
    }))
}
