//! # Rate Simulation
//!
//! Admin-facing dry run of the pricing pipeline.
//!
//! A simulation resolves the card that would price a hypothetical
//! shipment and returns the full breakdown without touching sessions,
//! wallets, or carriers. Used to verify a card configuration before it
//! starts pricing real traffic, and to answer "why was this charged"
//! questions from the audit trail.

use crate::application::error::{SimulationError, SimulationResult};
use crate::application::services::rate_card_selector::RateCardSelector;
use crate::domain::entities::request::ShipmentRequest;
use crate::domain::services::pricing::{calculate_pricing, PricingBreakdown};
use crate::domain::value_objects::enums::RateScope;
use crate::domain::value_objects::zone::Zone;
use crate::domain::value_objects::{ProviderId, RateCardId, Timestamp};
use crate::infrastructure::gateway::registry::ProviderRegistry;
use std::sync::Arc;
use tracing::debug;

/// Result of one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// The card that priced the hypothetical shipment.
    pub card_id: RateCardId,
    /// The resolved lane zone.
    pub zone: Zone,
    /// The full pricing breakdown.
    pub breakdown: PricingBreakdown,
}

/// Dry-runs the pricing pipeline against configured cards.
#[derive(Debug)]
pub struct RateSimulator {
    selector: RateCardSelector,
    registry: Arc<dyn ProviderRegistry>,
}

impl RateSimulator {
    /// Creates a simulator.
    #[must_use]
    pub fn new(selector: RateCardSelector, registry: Arc<dyn ProviderRegistry>) -> Self {
        Self { selector, registry }
    }

    /// Prices a hypothetical shipment with the card that would be active
    /// at `as_of`.
    ///
    /// # Errors
    ///
    /// - `SimulationError::UnknownProvider` - no profile registered
    /// - `SimulationError::Selector` - no active card or zone rule
    /// - `SimulationError::Pricing` - the request cannot be priced
    pub async fn simulate(
        &self,
        provider: &ProviderId,
        scope: RateScope,
        request: &ShipmentRequest,
        as_of: Timestamp,
    ) -> SimulationResult<SimulationOutcome> {
        request.validate()?;
        let zone = request.zone();

        let profile = self
            .registry
            .profile(provider)
            .ok_or_else(|| SimulationError::UnknownProvider(provider.clone()))?;
        let card = self
            .selector
            .resolve(request.company_id(), provider, scope, zone, as_of)
            .await?;
        let breakdown = calculate_pricing(&card, request, profile.dim_factor())?;

        debug!(
            provider = %provider,
            scope = %scope,
            zone = %zone,
            total = %breakdown.total,
            "simulated pricing"
        );
        Ok(SimulationOutcome {
            card_id: card.id(),
            zone,
            breakdown,
        })
    }
}
