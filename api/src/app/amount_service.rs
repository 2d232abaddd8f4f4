//! Amount normalization service
//!
//! Wraps the local parsing grammar with the optional remote normalization
//! service. The remote path is authoritative when configured, but any
//! failure or timeout degrades silently to the local parser - callers
//! never see an error from normalization.

use std::sync::Arc;

use crate::app::amount_parser::normalize_amount;
use crate::domain::ports::AmountNormalizer;

/// Service for converting currency text into 만원 amounts
pub struct AmountService<N>
where
    N: AmountNormalizer,
{
    remote: Option<Arc<N>>,
}

impl<N> AmountService<N>
where
    N: AmountNormalizer,
{
    pub fn new(remote: Option<Arc<N>>) -> Self {
        Self { remote }
    }

    /// Normalize currency text to a 만원 amount. Never errors; unparseable
    /// input is 0.
    pub async fn normalize(&self, text: &str) -> i64 {
        if let Some(remote) = &self.remote {
            match remote.normalize(text).await {
                Ok(amount) => return amount,
                Err(e) => {
                    tracing::debug!("remote normalization failed, using local parser: {}", e);
                }
            }
        }
        normalize_amount(text)
    }
}
