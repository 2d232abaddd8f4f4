//! Amount normalizer port
//!
//! Currency normalization may be delegated to a remote service for
//! authoritative parsing. The engine never depends on it being available:
//! any error makes the caller fall back to the local grammar silently.

use async_trait::async_trait;

use crate::error::NormalizerError;

/// Remote currency-text normalization service
#[async_trait]
pub trait AmountNormalizer: Send + Sync {
    /// Normalize free currency text to a 만원 amount.
    ///
    /// Implementations must agree with the local grammar for the documented
    /// inputs; callers treat any `Err` as "use the local parser".
    async fn normalize(&self, text: &str) -> Result<i64, NormalizerError>;
}
