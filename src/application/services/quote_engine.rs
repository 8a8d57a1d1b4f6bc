//! # Quote Engine
//!
//! Multi-provider quote aggregation.
//!
//! For every enabled provider covering the request's zone, the engine
//! concurrently resolves cost and sell rate cards, prices both scopes,
//! and optionally overlays a live carrier rate. Failures are isolated:
//! a provider that times out or misconfigures is excluded from the batch
//! and recorded in the session's diagnostics, never aborting the others.
//! The ranked result is frozen into a [`QuoteSession`].

use crate::application::error::{QuoteError, QuoteResult};
use crate::application::services::ranking::RankingStrategy;
use crate::application::services::rate_card_selector::RateCardSelector;
use crate::domain::entities::quote::{QuoteOption, QuoteSession};
use crate::domain::entities::request::ShipmentRequest;
use crate::domain::services::pricing::{calculate_pricing, calculate_pricing_with_live_freight};
use crate::domain::value_objects::enums::RateScope;
use crate::domain::value_objects::zone::Zone;
use crate::domain::value_objects::{Money, ProviderId, Timestamp};
use crate::infrastructure::gateway::registry::{ProviderProfile, ProviderRegistry};
use crate::infrastructure::gateway::CarrierGateway;
use crate::infrastructure::metrics::{counters, MetricsSink};
use crate::infrastructure::persistence::traits::SessionStore;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Configuration for quote aggregation.
#[derive(Debug, Clone)]
pub struct QuoteEngineConfig {
    /// Overall deadline for the whole batch in milliseconds.
    pub overall_timeout_ms: u64,
    /// Deadline per provider task in milliseconds.
    pub per_provider_timeout_ms: u64,
    /// Deadline for a live-rate lookup in milliseconds; on expiry the
    /// provider keeps its card pricing.
    pub live_rate_timeout_ms: u64,
    /// Quote session TTL in seconds.
    pub session_ttl_secs: i64,
    /// Maximum options to retain after ranking.
    pub max_options: Option<usize>,
}

impl Default for QuoteEngineConfig {
    fn default() -> Self {
        Self {
            overall_timeout_ms: 10_000,
            per_provider_timeout_ms: 3_000,
            live_rate_timeout_ms: 1_500,
            session_ttl_secs: 1_800,
            max_options: None,
        }
    }
}

impl QuoteEngineConfig {
    /// Sets the per-provider deadline.
    #[must_use]
    pub fn with_per_provider_timeout(mut self, timeout_ms: u64) -> Self {
        self.per_provider_timeout_ms = timeout_ms;
        self
    }

    /// Sets the session TTL.
    #[must_use]
    pub fn with_session_ttl(mut self, ttl_secs: i64) -> Self {
        self.session_ttl_secs = ttl_secs;
        self
    }

    /// Caps the number of retained options.
    #[must_use]
    pub fn with_max_options(mut self, max: usize) -> Self {
        self.max_options = Some(max);
        self
    }
}

enum ProviderFailure {
    TimedOut,
    Excluded(String),
}

/// Engine for aggregating and ranking provider quotes.
#[derive(Debug)]
pub struct QuoteEngine {
    selector: RateCardSelector,
    registry: Arc<dyn ProviderRegistry>,
    gateways: HashMap<ProviderId, Arc<dyn CarrierGateway>>,
    sessions: Arc<dyn SessionStore>,
    ranking: Arc<dyn RankingStrategy>,
    metrics: Arc<dyn MetricsSink>,
    config: QuoteEngineConfig,
}

impl QuoteEngine {
    /// Creates a quote engine.
    #[must_use]
    pub fn new(
        selector: RateCardSelector,
        registry: Arc<dyn ProviderRegistry>,
        gateways: HashMap<ProviderId, Arc<dyn CarrierGateway>>,
        sessions: Arc<dyn SessionStore>,
        ranking: Arc<dyn RankingStrategy>,
        metrics: Arc<dyn MetricsSink>,
        config: QuoteEngineConfig,
    ) -> Self {
        Self {
            selector,
            registry,
            gateways,
            sessions,
            ranking,
            metrics,
            config,
        }
    }

    /// Returns the current configuration.
    #[must_use]
    pub fn config(&self) -> &QuoteEngineConfig {
        &self.config
    }

    /// Prices the request against every eligible provider and freezes
    /// the ranked result into a stored session.
    ///
    /// # Errors
    ///
    /// - `QuoteError::Validation` - malformed request
    /// - `QuoteError::NoProvidersAvailable` - nothing covers the zone
    /// - `QuoteError::AllProvidersFailed` - every provider was excluded
    /// - `QuoteError::Timeout` - the overall deadline elapsed
    pub async fn generate_quotes(&self, request: &ShipmentRequest) -> QuoteResult<QuoteSession> {
        request.validate()?;
        let zone = request.zone();

        let profiles = self.registry.active_for_zone(zone);
        if profiles.is_empty() {
            return Err(QuoteError::NoProvidersAvailable);
        }
        let queried = profiles.len();

        let overall = Duration::from_millis(self.config.overall_timeout_ms);
        let (options, provider_timeouts, provider_errors) =
            match timeout(overall, self.collect(profiles, request, zone)).await {
                Ok(collected) => collected,
                Err(_) => return Err(QuoteError::Timeout),
            };

        for _ in 0..(provider_timeouts.len() + provider_errors.len()) {
            self.metrics.increment(counters::QUOTE_PROVIDER_FAILURES);
        }

        if options.is_empty() {
            let mut reasons: Vec<String> = provider_errors
                .iter()
                .map(|(provider, error)| format!("{provider}: {error}"))
                .collect();
            reasons.extend(
                provider_timeouts
                    .keys()
                    .map(|provider| format!("{provider}: timed out")),
            );
            return Err(QuoteError::AllProvidersFailed(reasons));
        }

        let mut ranked = self.ranking.rank(options);
        if let Some(max) = self.config.max_options {
            ranked.truncate(max);
        }
        for _ in ranked.iter().filter(|o| o.live_rate_applied) {
            self.metrics.increment(counters::LIVE_RATES_APPLIED);
        }

        let session = QuoteSession::new(
            request.clone(),
            ranked,
            provider_timeouts,
            provider_errors,
            self.config.session_ttl_secs,
        );
        self.sessions.insert(session.clone()).await?;
        self.metrics.increment(counters::QUOTES_CREATED);

        info!(
            session = %session.id(),
            zone = %zone,
            providers_queried = queried,
            options = session.total_options(),
            "quote session created"
        );
        Ok(session)
    }

    /// Prices all providers concurrently under per-provider deadlines.
    async fn collect(
        &self,
        profiles: Vec<ProviderProfile>,
        request: &ShipmentRequest,
        zone: Zone,
    ) -> (
        Vec<QuoteOption>,
        BTreeMap<ProviderId, bool>,
        BTreeMap<ProviderId, String>,
    ) {
        let per_provider = Duration::from_millis(self.config.per_provider_timeout_ms);
        let live_rate_timeout = Duration::from_millis(self.config.live_rate_timeout_ms);

        let mut handles = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let provider = profile.provider().clone();
            let selector = self.selector.clone();
            let gateway = self.gateways.get(&provider).cloned();
            let request = request.clone();

            let handle = tokio::spawn(async move {
                let priced = timeout(
                    per_provider,
                    price_provider(selector, gateway, profile, request, zone, live_rate_timeout),
                )
                .await;
                let outcome = match priced {
                    Ok(Ok(option)) => Ok(option),
                    Ok(Err(reason)) => Err(ProviderFailure::Excluded(reason)),
                    Err(_) => Err(ProviderFailure::TimedOut),
                };
                (provider, outcome)
            });
            handles.push(handle);
        }

        let mut options = Vec::new();
        let mut provider_timeouts = BTreeMap::new();
        let mut provider_errors = BTreeMap::new();
        for joined in futures::future::join_all(handles).await {
            match joined {
                Ok((_, Ok(option))) => options.push(option),
                Ok((provider, Err(ProviderFailure::TimedOut))) => {
                    warn!(provider = %provider, "provider excluded: deadline elapsed");
                    provider_timeouts.insert(provider, true);
                }
                Ok((provider, Err(ProviderFailure::Excluded(reason)))) => {
                    warn!(provider = %provider, reason = %reason, "provider excluded");
                    provider_errors.insert(provider, reason);
                }
                Err(join_error) => {
                    warn!(error = %join_error, "provider pricing task failed");
                }
            }
        }
        (options, provider_timeouts, provider_errors)
    }
}

/// Prices one provider: resolve both cards, optionally fetch a live
/// rate, compute cost and sell breakdowns.
async fn price_provider(
    selector: RateCardSelector,
    gateway: Option<Arc<dyn CarrierGateway>>,
    profile: ProviderProfile,
    request: ShipmentRequest,
    zone: Zone,
    live_rate_timeout: Duration,
) -> Result<QuoteOption, String> {
    let provider = profile.provider().clone();

    if let Some(gw) = &gateway {
        if !gw.is_serviceable(&request).await {
            return Err("lane not serviceable".to_string());
        }
    }

    let now = Timestamp::now();
    let cost_card = selector
        .resolve(request.company_id(), &provider, RateScope::Cost, zone, now)
        .await
        .map_err(|e| e.to_string())?;
    let sell_card = selector
        .resolve(request.company_id(), &provider, RateScope::Sell, zone, now)
        .await
        .map_err(|e| e.to_string())?;

    let flag = profile.live_rate_override();
    let live: Option<Money> = if flag.is_enabled() {
        match &gateway {
            Some(gw) => match timeout(live_rate_timeout, gw.live_rate(&request)).await {
                Ok(Ok(rate)) => Some(rate),
                // Slow or failing feed: keep card pricing, stay in batch
                Ok(Err(_)) | Err(_) => None,
            },
            None => None,
        }
    } else {
        None
    };

    let dim_factor = profile.dim_factor();
    let cost = match live.filter(|_| flag.applies_to_cost()) {
        Some(rate) => calculate_pricing_with_live_freight(&cost_card, &request, dim_factor, rate),
        None => calculate_pricing(&cost_card, &request, dim_factor),
    }
    .map_err(|e| e.to_string())?;
    let sell = match live.filter(|_| flag.applies_to_sell()) {
        Some(rate) => calculate_pricing_with_live_freight(&sell_card, &request, dim_factor, rate),
        None => calculate_pricing(&sell_card, &request, dim_factor),
    }
    .map_err(|e| e.to_string())?;

    Ok(QuoteOption::new(
        provider,
        cost,
        sell,
        profile.transit_days_for(zone),
        profile.reliability_score(),
    ))
}
