//! Mock implementations of port traits

use async_trait::async_trait;

use crate::domain::ports::AmountNormalizer;
use crate::error::NormalizerError;

/// A remote normalizer that always answers with one scripted amount
pub struct ScriptedNormalizer {
    amount: i64,
}

impl ScriptedNormalizer {
    pub fn returning(amount: i64) -> Self {
        Self { amount }
    }
}

#[async_trait]
impl AmountNormalizer for ScriptedNormalizer {
    async fn normalize(&self, _text: &str) -> Result<i64, NormalizerError> {
        Ok(self.amount)
    }
}

/// A remote normalizer that always fails, for exercising the silent
/// local fallback
pub struct FailingNormalizer;

#[async_trait]
impl AmountNormalizer for FailingNormalizer {
    async fn normalize(&self, _text: &str) -> Result<i64, NormalizerError> {
        Err(NormalizerError::Service {
            status: 503,
            message: "scripted outage".to_string(),
        })
    }
}
