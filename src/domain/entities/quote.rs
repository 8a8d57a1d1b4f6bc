//! # Quote Session and Options
//!
//! A quote session freezes the ranked outcome of one multi-provider
//! pricing pass. Options are priced snapshots; the session is the unit
//! of expiry and of booking concurrency control.
//!
//! ## Session lifecycle
//!
//! ```text
//! Pending ──begin_booking──▶ Attempting ──mark_consumed──▶ Consumed
//!    ▲                           │
//!    └────────release────────────┘   (fallback exhausted, no waybill)
//! ```
//!
//! A session that reached a carrier commitment (waybill issued) is marked
//! `Consumed` even when post-commit steps fail; it can never be re-booked.

use crate::domain::entities::request::ShipmentRequest;
use crate::domain::services::pricing::PricingBreakdown;
use crate::domain::value_objects::{Money, OptionId, ProviderId, SessionId, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One bookable provider option inside a quote session.
///
/// Carries both pricing scopes: `cost` (what the carrier charges us) and
/// `sell` (what the company pays), plus the ranking outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteOption {
    /// Option identifier, unique within the session.
    pub id: OptionId,
    /// The carrier provider this option books through.
    pub provider: ProviderId,
    /// Cost-scope pricing breakdown.
    pub cost: PricingBreakdown,
    /// Sell-scope pricing breakdown.
    pub sell: PricingBreakdown,
    /// The sell total the company is quoted.
    pub total_amount: Money,
    /// Estimated delivery time in days.
    pub transit_days: u32,
    /// Historical delivery success rate in `[0.0, 1.0]`.
    pub reliability_score: f64,
    /// Position after ranking (1 = best).
    pub rank: usize,
    /// Score assigned by the ranking strategy (lower is better).
    pub score: f64,
    /// True if a live carrier rate replaced the card freight.
    pub live_rate_applied: bool,
}

impl QuoteOption {
    /// Creates an unranked option from pricing results.
    #[must_use]
    pub fn new(
        provider: ProviderId,
        cost: PricingBreakdown,
        sell: PricingBreakdown,
        transit_days: u32,
        reliability_score: f64,
    ) -> Self {
        let total_amount = sell.total;
        let live_rate_applied = sell.live_rate_applied || cost.live_rate_applied;
        Self {
            id: OptionId::new_v4(),
            provider,
            cost,
            sell,
            total_amount,
            transit_days,
            reliability_score,
            rank: 0,
            score: 0.0,
            live_rate_applied,
        }
    }

    /// Records the ranking outcome.
    #[must_use]
    pub fn with_rank(mut self, rank: usize, score: f64) -> Self {
        self.rank = rank;
        self.score = score;
        self
    }

    /// Returns the margin between sell and cost totals, floored at zero.
    #[must_use]
    pub fn margin(&self) -> Money {
        self.sell
            .total
            .safe_sub(self.cost.total)
            .unwrap_or(Money::ZERO)
    }
}

/// Booking state of a quote session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// No booking in progress; the session may be booked.
    Pending,
    /// A booking walk holds the session exclusively.
    Attempting,
    /// The session produced a waybill (or died post-commit); terminal.
    Consumed,
}

/// A frozen, ranked multi-provider quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSession {
    id: SessionId,
    request: ShipmentRequest,
    options: Vec<QuoteOption>,
    provider_timeouts: BTreeMap<ProviderId, bool>,
    provider_errors: BTreeMap<ProviderId, String>,
    state: SessionState,
    created_at: Timestamp,
    expires_at: Timestamp,
}

impl QuoteSession {
    /// Creates a session from ranked options with the given TTL.
    #[must_use]
    pub fn new(
        request: ShipmentRequest,
        options: Vec<QuoteOption>,
        provider_timeouts: BTreeMap<ProviderId, bool>,
        provider_errors: BTreeMap<ProviderId, String>,
        ttl_secs: i64,
    ) -> Self {
        let created_at = Timestamp::now();
        Self {
            id: SessionId::new_v4(),
            request,
            options,
            provider_timeouts,
            provider_errors,
            state: SessionState::Pending,
            created_at,
            expires_at: created_at.add_secs(ttl_secs),
        }
    }

    /// Returns the session id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the request this session priced.
    #[inline]
    #[must_use]
    pub fn request(&self) -> &ShipmentRequest {
        &self.request
    }

    /// Returns the ranked options, best first.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &[QuoteOption] {
        &self.options
    }

    /// Returns which providers timed out during aggregation.
    #[inline]
    #[must_use]
    pub fn provider_timeouts(&self) -> &BTreeMap<ProviderId, bool> {
        &self.provider_timeouts
    }

    /// Returns per-provider aggregation errors.
    #[inline]
    #[must_use]
    pub fn provider_errors(&self) -> &BTreeMap<ProviderId, String> {
        &self.provider_errors
    }

    /// Returns the current booking state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns when the session was created.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns when the session expires.
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Returns true if the quote TTL has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_expired()
    }

    /// Looks up an option by id.
    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&QuoteOption> {
        self.options.iter().find(|o| &o.id == id)
    }

    /// Returns the top-ranked option, if any provider quoted.
    #[must_use]
    pub fn best_option(&self) -> Option<&QuoteOption> {
        self.options.first()
    }

    /// Returns the number of quoted options.
    #[must_use]
    pub fn total_options(&self) -> usize {
        self.options.len()
    }

    /// Builds the fallback walk for a booking: the selected option first,
    /// then remaining options in rank order, capped at `max_attempts`.
    #[must_use]
    pub fn fallback_order(&self, selected: &OptionId, max_attempts: usize) -> Vec<QuoteOption> {
        let mut walk = Vec::with_capacity(max_attempts.min(self.options.len()));
        if let Some(first) = self.option(selected) {
            walk.push(first.clone());
        }
        for option in &self.options {
            if walk.len() >= max_attempts {
                break;
            }
            if &option.id != selected {
                walk.push(option.clone());
            }
        }
        walk
    }

    /// Attempts the `Pending -> Attempting` transition.
    ///
    /// Returns false if the session is already held or consumed.
    pub fn begin_booking(&mut self) -> bool {
        if self.state == SessionState::Pending {
            self.state = SessionState::Attempting;
            true
        } else {
            false
        }
    }

    /// Attempts the `Attempting -> Consumed` transition.
    pub fn mark_consumed(&mut self) -> bool {
        if self.state == SessionState::Attempting {
            self.state = SessionState::Consumed;
            true
        } else {
            false
        }
    }

    /// Attempts the `Attempting -> Pending` transition, releasing the
    /// session after an exhausted walk that issued no waybill.
    pub fn release(&mut self) -> bool {
        if self.state == SessionState::Attempting {
            self.state = SessionState::Pending;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::enums::PaymentMode;
    use crate::domain::value_objects::weight::{DimensionsCm, WeightKg};
    use crate::domain::value_objects::zone::PostalCode;
    use crate::domain::value_objects::CompanyId;
    use rust_decimal::Decimal;

    fn request() -> ShipmentRequest {
        ShipmentRequest::new(
            CompanyId::new("acme"),
            PostalCode::new("110001").unwrap(),
            PostalCode::new("400001").unwrap(),
            WeightKg::new(Decimal::new(42, 1)).unwrap(),
            DimensionsCm::new(Decimal::new(30, 0), Decimal::new(20, 0), Decimal::new(10, 0))
                .unwrap(),
            PaymentMode::Prepaid,
            Money::ZERO,
        )
    }

    fn option(provider: &str, sell_total: u64, rank: usize) -> QuoteOption {
        let sell = PricingBreakdown::flat_for_tests(Money::from_major(sell_total));
        let cost = PricingBreakdown::flat_for_tests(Money::from_major(sell_total - 20));
        QuoteOption::new(ProviderId::new(provider), cost, sell, 3, 0.95).with_rank(rank, 0.0)
    }

    fn session(options: Vec<QuoteOption>) -> QuoteSession {
        QuoteSession::new(request(), options, BTreeMap::new(), BTreeMap::new(), 1800)
    }

    #[test]
    fn margin_is_sell_minus_cost() {
        let opt = option("bluedart", 150, 1);
        assert_eq!(opt.margin(), Money::from_major(20));
    }

    #[test]
    fn option_lookup_and_best() {
        let a = option("bluedart", 150, 1);
        let b = option("delhivery", 180, 2);
        let a_id = a.id;
        let s = session(vec![a, b]);

        assert_eq!(s.total_options(), 2);
        assert_eq!(s.best_option().unwrap().id, a_id);
        assert_eq!(s.option(&a_id).unwrap().provider.as_str(), "bluedart");
        assert!(s.option(&OptionId::new_v4()).is_none());
    }

    #[test]
    fn fallback_order_starts_with_selection() {
        let a = option("bluedart", 150, 1);
        let b = option("delhivery", 180, 2);
        let c = option("dtdc", 200, 3);
        let b_id = b.id;
        let s = session(vec![a, b, c]);

        let walk = s.fallback_order(&b_id, 3);
        assert_eq!(walk.len(), 3);
        assert_eq!(walk[0].id, b_id);
        assert_eq!(walk[1].provider.as_str(), "bluedart");
        assert_eq!(walk[2].provider.as_str(), "dtdc");
    }

    #[test]
    fn fallback_order_caps_attempts() {
        let a = option("bluedart", 150, 1);
        let b = option("delhivery", 180, 2);
        let c = option("dtdc", 200, 3);
        let a_id = a.id;
        let s = session(vec![a, b, c]);

        let walk = s.fallback_order(&a_id, 2);
        assert_eq!(walk.len(), 2);
        assert_eq!(walk[0].id, a_id);
    }

    #[test]
    fn state_machine_transitions() {
        let mut s = session(vec![option("bluedart", 150, 1)]);
        assert_eq!(s.state(), SessionState::Pending);

        assert!(s.begin_booking());
        assert_eq!(s.state(), SessionState::Attempting);
        assert!(!s.begin_booking()); // already held

        assert!(s.release());
        assert_eq!(s.state(), SessionState::Pending);

        assert!(s.begin_booking());
        assert!(s.mark_consumed());
        assert_eq!(s.state(), SessionState::Consumed);
        assert!(!s.begin_booking());
        assert!(!s.release());
    }

    #[test]
    fn ttl_controls_expiry() {
        let live = session(vec![]);
        assert!(!live.is_expired());

        let dead = QuoteSession::new(request(), vec![], BTreeMap::new(), BTreeMap::new(), -1);
        assert!(dead.is_expired());
    }
}
