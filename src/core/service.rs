use crate::adapters::http::ChatCompletionProvider;
use crate::config::ServiceConfig;
use crate::core::clock::SystemClock;
use crate::core::random::ThreadRandom;
use crate::core::rate_limiter::{RateLimiter, DEFAULT_MIN_INTERVAL};
use crate::core::synthesis::{MockSynthesizer, DEFAULT_SUBJECT};
use crate::domain::catalog::resolve_country;
use crate::domain::model::{RecommendationQuery, RecommendationRecord, RECOMMENDATION_COUNT};
use crate::domain::ports::{Clock, RandomSource, RecommendationProvider};
use crate::utils::error::{ProviderFailure, Result};
use std::time::Duration;

pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(1500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Acquires university recommendations.
///
/// Tries the remote provider when one is configured and falls back to local
/// synthesis on any failure, so callers always get five ranked records.
pub struct RecommendationService<C: Clock + Clone = SystemClock> {
    provider: Option<Box<dyn RecommendationProvider>>,
    limiter: RateLimiter<C>,
    synthesizer: MockSynthesizer,
    clock: C,
    simulated_latency: Duration,
    request_timeout: Duration,
}

impl RecommendationService<SystemClock> {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::with_config(config, SystemClock, Box::new(ThreadRandom))
    }
}

impl<C: Clock + Clone> RecommendationService<C> {
    /// A service without remote provider.
    pub fn new(clock: C, random: Box<dyn RandomSource>) -> Self {
        Self {
            provider: None,
            limiter: RateLimiter::new(clock.clone(), DEFAULT_MIN_INTERVAL),
            synthesizer: MockSynthesizer::new(random),
            clock,
            simulated_latency: DEFAULT_SIMULATED_LATENCY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_config(
        config: &ServiceConfig,
        clock: C,
        random: Box<dyn RandomSource>,
    ) -> Result<Self> {
        let mut service = Self::new(clock, random)
            .with_min_interval(config.min_interval())
            .with_simulated_latency(config.simulated_latency())
            .with_request_timeout(config.request_timeout());

        if config.remote_enabled() {
            let provider = ChatCompletionProvider::from_config(config)?;
            tracing::info!(endpoint = provider.endpoint(), "Remote provider configured");
            service = service.with_provider(Box::new(provider));
        } else {
            tracing::info!("No usable API key, recommendations will be synthesized locally");
        }

        Ok(service)
    }

    pub fn with_provider(mut self, provider: Box<dyn RecommendationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.limiter = RateLimiter::new(self.clock.clone(), min_interval);
        self
    }

    pub fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn remote_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub fn rate_limiter(&self) -> &RateLimiter<C> {
        &self.limiter
    }

    /// Never fails: a blank subject is replaced by `general-studies`.
    pub async fn acquire_recommendations(
        &self,
        subject: &str,
        country: &str,
    ) -> Vec<RecommendationRecord> {
        let country = resolve_country(country);
        let query = match RecommendationQuery::new(subject, &country) {
            Ok(query) => query,
            Err(e) => {
                tracing::warn!("{}, using '{}'", e, DEFAULT_SUBJECT);
                RecommendationQuery {
                    subject: DEFAULT_SUBJECT.to_string(),
                    country,
                }
            }
        };

        self.acquire(&query).await
    }

    pub async fn acquire(&self, query: &RecommendationQuery) -> Vec<RecommendationRecord> {
        let Some(provider) = self.provider.as_deref() else {
            if !self.simulated_latency.is_zero() {
                self.clock.sleep(self.simulated_latency).await;
            }
            return self.synthesizer.synthesize(&query.subject, &query.country);
        };

        match self.fetch_remote(provider, query).await {
            Ok(records) => {
                tracing::info!(
                    subject = %query.subject,
                    "Received {} recommendations from remote provider",
                    records.len()
                );
                records
            }
            Err(failure) => {
                tracing::warn!(
                    reason = failure.reason(),
                    "Remote provider failed ({}), falling back to local synthesis",
                    failure
                );
                self.synthesizer.synthesize(&query.subject, &query.country)
            }
        }
    }

    async fn fetch_remote(
        &self,
        provider: &dyn RecommendationProvider,
        query: &RecommendationQuery,
    ) -> std::result::Result<Vec<RecommendationRecord>, ProviderFailure> {
        self.limiter.acquire().await;

        let records = tokio::time::timeout(self.request_timeout, provider.fetch(query))
            .await
            .map_err(|_| ProviderFailure::Timeout(self.request_timeout))??;

        if records.len() != RECOMMENDATION_COUNT {
            return Err(ProviderFailure::InvalidShape(format!(
                "expected {} records, got {}",
                RECOMMENDATION_COUNT,
                records.len()
            )));
        }

        Ok(records)
    }
}
