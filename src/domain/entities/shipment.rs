//! # Shipment Entity
//!
//! The durable record of a committed booking: the carrier waybill plus
//! the pricing snapshot re-derived at commit time and fallback audit
//! metadata.

use crate::domain::services::pricing::PricingBreakdown;
use crate::domain::value_objects::{
    CompanyId, Money, ProviderId, SessionId, ShipmentId, Timestamp, Waybill,
};
use serde::{Deserialize, Serialize};

/// Pricing captured at the moment of commitment.
///
/// Re-derived from current rate cards when the booking commits, never
/// copied from the quote, so a card change between quote and booking is
/// reflected in what is actually charged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    /// Cost-scope breakdown at commit time.
    pub cost: PricingBreakdown,
    /// Sell-scope breakdown at commit time.
    pub sell: PricingBreakdown,
    /// The sell total debited from the company wallet.
    pub committed_total: Money,
    /// When the snapshot was derived.
    pub derived_at: Timestamp,
}

impl PricingSnapshot {
    /// Captures a snapshot from freshly derived breakdowns.
    #[must_use]
    pub fn capture(cost: PricingBreakdown, sell: PricingBreakdown) -> Self {
        let committed_total = sell.total;
        Self {
            cost,
            sell,
            committed_total,
            derived_at: Timestamp::now(),
        }
    }
}

/// How the booking walk arrived at the committed provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackMetadata {
    /// 1-based attempt number that succeeded.
    pub attempt_number: u32,
    /// True if the committed provider was not the selected option.
    pub fallback_used: bool,
    /// How many options the session offered.
    pub total_options_available: usize,
}

/// A booked shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    id: ShipmentId,
    session_id: SessionId,
    company_id: CompanyId,
    provider: ProviderId,
    waybill: Waybill,
    pricing: PricingSnapshot,
    fallback: FallbackMetadata,
    booked_at: Timestamp,
}

impl Shipment {
    /// Records a committed booking.
    #[must_use]
    pub fn new(
        session_id: SessionId,
        company_id: CompanyId,
        provider: ProviderId,
        waybill: Waybill,
        pricing: PricingSnapshot,
        fallback: FallbackMetadata,
    ) -> Self {
        Self {
            id: ShipmentId::new_v4(),
            session_id,
            company_id,
            provider,
            waybill,
            pricing,
            fallback,
            booked_at: Timestamp::now(),
        }
    }

    /// Returns the shipment id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ShipmentId {
        self.id
    }

    /// Returns the quote session this booking consumed.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the booking company.
    #[inline]
    #[must_use]
    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    /// Returns the committed carrier provider.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the carrier-issued waybill.
    #[inline]
    #[must_use]
    pub fn waybill(&self) -> &Waybill {
        &self.waybill
    }

    /// Returns the commit-time pricing snapshot.
    #[inline]
    #[must_use]
    pub fn pricing(&self) -> &PricingSnapshot {
        &self.pricing
    }

    /// Returns the fallback audit metadata.
    #[inline]
    #[must_use]
    pub fn fallback(&self) -> FallbackMetadata {
        self.fallback
    }

    /// Returns when the booking committed.
    #[inline]
    #[must_use]
    pub fn booked_at(&self) -> Timestamp {
        self.booked_at
    }
}
