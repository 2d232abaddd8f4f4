//! Remote amount-normalization client
//!
//! Talks to the optional authoritative normalization service. Errors from
//! this client are never surfaced to callers - the amount service logs
//! them and falls back to the local grammar.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::AmountNormalizer;
use crate::error::NormalizerError;

/// How long we wait for the remote service before falling back locally
const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

pub struct RemoteNormalizerImpl {
    http: Client,
    base_url: String,
}

impl RemoteNormalizerImpl {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Serialize)]
struct NormalizeRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NormalizeResponse {
    amount: i64,
}

#[async_trait]
impl AmountNormalizer for RemoteNormalizerImpl {
    async fn normalize(&self, text: &str) -> Result<i64, NormalizerError> {
        let response = self
            .http
            .post(format!("{}/normalize", self.base_url))
            .json(&NormalizeRequest { text })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: NormalizeResponse = response
                .json()
                .await
                .map_err(|e| NormalizerError::Deserialization(e.to_string()))?;
            Ok(body.amount)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(NormalizerError::Service {
                status: status.as_u16(),
                message,
            })
        }
    }
}
