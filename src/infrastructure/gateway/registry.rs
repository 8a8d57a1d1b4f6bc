//! # Provider Registry
//!
//! Operational metadata for carrier providers: dimensional factor,
//! reliability history, transit estimates, and the per-provider live-rate
//! override flag.
//!
//! The quote engine consults the registry when fanning out; providers
//! without a profile are skipped rather than defaulted.

use crate::domain::value_objects::enums::LiveRateOverride;
use crate::domain::value_objects::zone::Zone;
use crate::domain::value_objects::ProviderId;
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default dimensional divisor (cm³ per kg) used by most Indian couriers.
pub const DEFAULT_DIM_FACTOR: u32 = 5000;

/// Operational profile of one carrier provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderProfile {
    provider: ProviderId,
    dim_factor: Decimal,
    reliability_score: f64,
    transit_days: BTreeMap<Zone, u32>,
    live_rate_override: LiveRateOverride,
    serviceable_zones: Vec<Zone>,
    enabled: bool,
}

impl ProviderProfile {
    /// Creates a profile with the default dimensional factor, full zone
    /// coverage, and live rates off.
    #[must_use]
    pub fn new(provider: ProviderId, reliability_score: f64) -> Self {
        Self {
            provider,
            dim_factor: Decimal::from(DEFAULT_DIM_FACTOR),
            reliability_score: reliability_score.clamp(0.0, 1.0),
            transit_days: BTreeMap::new(),
            live_rate_override: LiveRateOverride::default(),
            serviceable_zones: Zone::ALL.to_vec(),
            enabled: true,
        }
    }

    /// Sets the dimensional divisor.
    #[must_use]
    pub fn with_dim_factor(mut self, dim_factor: Decimal) -> Self {
        self.dim_factor = dim_factor;
        self
    }

    /// Sets the transit estimate for a zone.
    #[must_use]
    pub fn with_transit_days(mut self, zone: Zone, days: u32) -> Self {
        self.transit_days.insert(zone, days);
        self
    }

    /// Sets the live-rate override flag.
    #[must_use]
    pub fn with_live_rate_override(mut self, flag: LiveRateOverride) -> Self {
        self.live_rate_override = flag;
        self
    }

    /// Restricts the serviceable zones.
    #[must_use]
    pub fn with_serviceable_zones(mut self, zones: Vec<Zone>) -> Self {
        self.serviceable_zones = zones;
        self
    }

    /// Disables the provider without removing it.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Returns the provider id.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the dimensional divisor for volumetric weight.
    #[inline]
    #[must_use]
    pub fn dim_factor(&self) -> Decimal {
        self.dim_factor
    }

    /// Returns the historical delivery success rate in `[0.0, 1.0]`.
    #[inline]
    #[must_use]
    pub fn reliability_score(&self) -> f64 {
        self.reliability_score
    }

    /// Returns the live-rate override flag.
    #[inline]
    #[must_use]
    pub fn live_rate_override(&self) -> LiveRateOverride {
        self.live_rate_override
    }

    /// Returns true if the provider accepts bookings.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the transit estimate for a zone, defaulting conservatively
    /// by zone distance when not configured.
    #[must_use]
    pub fn transit_days_for(&self, zone: Zone) -> u32 {
        self.transit_days.get(&zone).copied().unwrap_or(match zone {
            Zone::Local => 1,
            Zone::Regional | Zone::Metro => 3,
            Zone::RestOfNation => 5,
            Zone::Special => 7,
        })
    }

    /// Returns true if the provider covers the zone.
    #[must_use]
    pub fn services_zone(&self, zone: Zone) -> bool {
        self.serviceable_zones.contains(&zone)
    }
}

/// Read access to provider profiles.
pub trait ProviderRegistry: Send + Sync + std::fmt::Debug {
    /// Returns the profile for a provider, if registered.
    fn profile(&self, provider: &ProviderId) -> Option<ProviderProfile>;

    /// Returns all enabled providers covering the zone.
    fn active_for_zone(&self, zone: Zone) -> Vec<ProviderProfile>;
}

/// In-memory provider registry backed by a concurrent map.
#[derive(Debug, Default)]
pub struct InMemoryProviderRegistry {
    profiles: DashMap<ProviderId, ProviderProfile>,
}

impl InMemoryProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a provider profile.
    pub fn register(&self, profile: ProviderProfile) {
        self.profiles.insert(profile.provider().clone(), profile);
    }

    /// Removes a provider.
    pub fn remove(&self, provider: &ProviderId) {
        self.profiles.remove(provider);
    }
}

impl ProviderRegistry for InMemoryProviderRegistry {
    fn profile(&self, provider: &ProviderId) -> Option<ProviderProfile> {
        self.profiles.get(provider).map(|entry| entry.clone())
    }

    fn active_for_zone(&self, zone: Zone) -> Vec<ProviderProfile> {
        let mut profiles: Vec<ProviderProfile> = self
            .profiles
            .iter()
            .filter(|entry| entry.is_enabled() && entry.services_zone(zone))
            .map(|entry| entry.clone())
            .collect();
        profiles.sort_by(|a, b| a.provider().cmp(b.provider()));
        profiles
    }
}
