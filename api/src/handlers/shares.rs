//! Ownership-share limit handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::app::{ShareLimitInput, ShareLimitLine};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ShareLimitResponse {
    pub results: Vec<ShareLimitLine>,
}

/// POST /shares/limit
///
/// Per-owner lending capacity across up to two LTV tiers. The first
/// result line carries the owner's name and display share text; the
/// `available` figure only exists for senior evaluations.
pub async fn limit(
    State(state): State<AppState>,
    Json(request): Json<ShareLimitInput>,
) -> Result<Json<ShareLimitResponse>, AppError> {
    let results = state.shares.compute(&request)?;
    Ok(Json(ShareLimitResponse { results }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_share_limit_request() {
        let request: ShareLimitInput = serde_json::from_str(
            r#"{
                "total_value": 50000,
                "ltv_tiers": [70.0],
                "owner": {"name": "홍길동", "share": "1/2 (50.0%)"},
                "loans": [{"max_amount": 12000, "status": "유지"}]
            }"#,
        )
        .unwrap();
        assert_eq!(request.total_value, 50_000);
        assert_eq!(request.owner.share, "1/2 (50.0%)");
        assert!(!request.pledge_program);
    }
}
