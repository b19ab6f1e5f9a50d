use crate::domain::model::{RecommendationQuery, RecommendationRecord};
use crate::utils::error::ProviderFailure;
use async_trait::async_trait;
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio::time::Instant;

pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

pub trait RandomSource: Send + Sync {
    /// Uniform value within `range`, bounds included.
    fn next_in_range(&self, range: RangeInclusive<u32>) -> u32;
}

#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn fetch(
        &self,
        query: &RecommendationQuery,
    ) -> std::result::Result<Vec<RecommendationRecord>, ProviderFailure>;
}
