//! # Rate Card Entity
//!
//! Admin-configured pricing rules for one company, provider, and scope.
//!
//! A rate card holds one [`ZoneRule`] per delivery zone. Each rule carries
//! an ordered, non-overlapping slab ladder plus the surcharge knobs the
//! formula engine applies on top (extra-weight billing, COD, fuel, GST).
//!
//! Cards are validated at configuration time: slab gaps and overlaps are
//! rejected here, never computed around during pricing.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::{FuelBasis, RateScope};
use crate::domain::value_objects::zone::Zone;
use crate::domain::value_objects::{
    CompanyId, Money, ProviderId, RateCardId, Timestamp, WeightRounding,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A weight range mapped to a flat charge.
///
/// Slabs use half-open `(min, max]` semantics so adjacent slabs can share
/// a boundary without overlapping; a weight sitting exactly on `max_kg`
/// bills at this slab's charge with no extra-weight component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    min_kg: Decimal,
    max_kg: Decimal,
    charge: Money,
}

impl Slab {
    /// Creates a slab.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRateCard` if the bounds are negative
    /// or inverted.
    pub fn new(min_kg: Decimal, max_kg: Decimal, charge: Money) -> DomainResult<Self> {
        if min_kg.is_sign_negative() {
            return Err(DomainError::InvalidRateCard(format!(
                "slab min must be non-negative, got {min_kg}"
            )));
        }
        if max_kg <= min_kg {
            return Err(DomainError::InvalidRateCard(format!(
                "slab max {max_kg} must exceed min {min_kg}"
            )));
        }
        Ok(Self {
            min_kg,
            max_kg,
            charge,
        })
    }

    /// Returns the lower bound (exclusive) in kilograms.
    #[inline]
    #[must_use]
    pub fn min_kg(&self) -> Decimal {
        self.min_kg
    }

    /// Returns the upper bound (inclusive) in kilograms.
    #[inline]
    #[must_use]
    pub fn max_kg(&self) -> Decimal {
        self.max_kg
    }

    /// Returns the flat charge for this range.
    #[inline]
    #[must_use]
    pub fn charge(&self) -> Money {
        self.charge
    }

    /// Returns true if the weight falls in `(min, max]`.
    #[must_use]
    pub fn contains(&self, weight_kg: Decimal) -> bool {
        weight_kg > self.min_kg && weight_kg <= self.max_kg
    }
}

impl fmt::Display for Slab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}-{}kg @ {})", self.min_kg, self.max_kg, self.charge)
    }
}

/// How a matched COD slab charges the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodCharge {
    /// A flat amount regardless of order value.
    Flat(Money),
    /// A percentage of order value, floored at a minimum.
    Percent {
        /// Percentage of the order value.
        percent: Decimal,
        /// The minimum charge when the percentage comes out lower.
        minimum: Money,
    },
}

/// An order-value range mapped to a COD charge rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodSlab {
    min_value: Money,
    max_value: Option<Money>,
    charge: CodCharge,
}

impl CodSlab {
    /// Creates a COD slab; `max_value = None` leaves the range open-ended.
    #[must_use]
    pub fn new(min_value: Money, max_value: Option<Money>, charge: CodCharge) -> Self {
        Self {
            min_value,
            max_value,
            charge,
        }
    }

    /// Returns the charge rule.
    #[inline]
    #[must_use]
    pub fn charge(&self) -> &CodCharge {
        &self.charge
    }

    /// Returns true if the order value falls inside this slab.
    #[must_use]
    pub fn matches(&self, order_value: Money) -> bool {
        order_value >= self.min_value
            && self.max_value.is_none_or(|max| order_value <= max)
    }
}

/// Pricing rules for one zone within a rate card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRule {
    slabs: Vec<Slab>,
    rounding_unit_kg: Decimal,
    rounding_mode: WeightRounding,
    additional_per_kg: Money,
    fuel_surcharge_percent: Decimal,
    fuel_basis: FuelBasis,
    cod_slabs: Vec<CodSlab>,
    gst_percent: Decimal,
}

impl ZoneRule {
    /// Creates a zone rule with no surcharges configured.
    #[must_use]
    pub fn new(
        slabs: Vec<Slab>,
        rounding_unit_kg: Decimal,
        rounding_mode: WeightRounding,
        additional_per_kg: Money,
    ) -> Self {
        Self {
            slabs,
            rounding_unit_kg,
            rounding_mode,
            additional_per_kg,
            fuel_surcharge_percent: Decimal::ZERO,
            fuel_basis: FuelBasis::Freight,
            cod_slabs: Vec::new(),
            gst_percent: Decimal::ZERO,
        }
    }

    /// Sets the fuel surcharge.
    #[must_use]
    pub fn with_fuel_surcharge(mut self, percent: Decimal, basis: FuelBasis) -> Self {
        self.fuel_surcharge_percent = percent;
        self.fuel_basis = basis;
        self
    }

    /// Sets the COD surcharge table.
    #[must_use]
    pub fn with_cod_slabs(mut self, cod_slabs: Vec<CodSlab>) -> Self {
        self.cod_slabs = cod_slabs;
        self
    }

    /// Sets the GST percentage.
    #[must_use]
    pub fn with_gst(mut self, percent: Decimal) -> Self {
        self.gst_percent = percent;
        self
    }

    /// Returns the slab ladder.
    #[inline]
    #[must_use]
    pub fn slabs(&self) -> &[Slab] {
        &self.slabs
    }

    /// Returns the extra-weight billing unit in kilograms.
    #[inline]
    #[must_use]
    pub fn rounding_unit_kg(&self) -> Decimal {
        self.rounding_unit_kg
    }

    /// Returns the extra-weight rounding mode.
    #[inline]
    #[must_use]
    pub fn rounding_mode(&self) -> WeightRounding {
        self.rounding_mode
    }

    /// Returns the per-kilogram charge beyond the last slab.
    #[inline]
    #[must_use]
    pub fn additional_per_kg(&self) -> Money {
        self.additional_per_kg
    }

    /// Returns the fuel surcharge percentage.
    #[inline]
    #[must_use]
    pub fn fuel_surcharge_percent(&self) -> Decimal {
        self.fuel_surcharge_percent
    }

    /// Returns the base the fuel surcharge applies to.
    #[inline]
    #[must_use]
    pub fn fuel_basis(&self) -> FuelBasis {
        self.fuel_basis
    }

    /// Returns the COD surcharge table.
    #[inline]
    #[must_use]
    pub fn cod_slabs(&self) -> &[CodSlab] {
        &self.cod_slabs
    }

    /// Returns the GST percentage.
    #[inline]
    #[must_use]
    pub fn gst_percent(&self) -> Decimal {
        self.gst_percent
    }

    /// Finds the slab containing the weight, if any.
    #[must_use]
    pub fn find_slab(&self, weight_kg: Decimal) -> Option<&Slab> {
        self.slabs.iter().find(|s| s.contains(weight_kg))
    }

    /// Returns the last (heaviest) slab, if the ladder is non-empty.
    #[must_use]
    pub fn last_slab(&self) -> Option<&Slab> {
        self.slabs.last()
    }

    /// Finds the COD slab matching an order value, if any.
    #[must_use]
    pub fn find_cod_slab(&self, order_value: Money) -> Option<&CodSlab> {
        self.cod_slabs.iter().find(|s| s.matches(order_value))
    }

    /// Validates the rule structure.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRateCard` if the ladder is empty,
    /// overlapping, or gapped, or if any percentage or the rounding
    /// unit is out of range.
    pub fn validate(&self) -> DomainResult<()> {
        if self.slabs.is_empty() {
            return Err(DomainError::InvalidRateCard(
                "zone rule must have at least one slab".to_string(),
            ));
        }
        // Adjacent slabs must share their boundary exactly: (min, max]
        // semantics leave no legal reading for a gap or an overlap.
        for pair in self.slabs.windows(2) {
            if let [prev, next] = pair {
                if next.min_kg < prev.max_kg {
                    return Err(DomainError::InvalidRateCard(format!(
                        "slabs overlap: {prev} and {next}"
                    )));
                }
                if next.min_kg > prev.max_kg {
                    return Err(DomainError::InvalidRateCard(format!(
                        "slab ladder has a gap between {prev} and {next}"
                    )));
                }
            }
        }
        if self.rounding_unit_kg <= Decimal::ZERO {
            return Err(DomainError::InvalidRateCard(format!(
                "rounding unit must be positive, got {}",
                self.rounding_unit_kg
            )));
        }
        for (name, pct) in [
            ("fuel surcharge", self.fuel_surcharge_percent),
            ("gst", self.gst_percent),
        ] {
            if pct.is_sign_negative() || pct > Decimal::ONE_HUNDRED {
                return Err(DomainError::InvalidRateCard(format!(
                    "{name} percent out of range: {pct}"
                )));
            }
        }
        Ok(())
    }
}

/// An admin-configured rate card.
///
/// Scoped to a company, provider, and [`RateScope`] with a bounded
/// effective window. Long-lived; the [rate card selector] resolves the
/// single active card at quote and commit time.
///
/// [rate card selector]: crate::application::services::rate_card_selector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    id: RateCardId,
    company_id: CompanyId,
    provider: ProviderId,
    scope: RateScope,
    zone_rules: BTreeMap<Zone, ZoneRule>,
    effective_from: Timestamp,
    expires_at: Option<Timestamp>,
    created_at: Timestamp,
}

impl RateCard {
    /// Creates an empty rate card effective from the given instant.
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        provider: ProviderId,
        scope: RateScope,
        effective_from: Timestamp,
    ) -> Self {
        Self {
            id: RateCardId::new_v4(),
            company_id,
            provider,
            scope,
            zone_rules: BTreeMap::new(),
            effective_from,
            expires_at: None,
            created_at: Timestamp::now(),
        }
    }

    /// Adds or replaces the rule for a zone.
    #[must_use]
    pub fn with_zone_rule(mut self, zone: Zone, rule: ZoneRule) -> Self {
        self.zone_rules.insert(zone, rule);
        self
    }

    /// Sets an expiry instant.
    #[must_use]
    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Overrides the creation instant (for reconstruction).
    #[must_use]
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns the card id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> RateCardId {
        self.id
    }

    /// Returns the owning company.
    #[inline]
    #[must_use]
    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    /// Returns the carrier provider.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the cost/sell scope.
    #[inline]
    #[must_use]
    pub fn scope(&self) -> RateScope {
        self.scope
    }

    /// Returns the start of the effective window.
    #[inline]
    #[must_use]
    pub fn effective_from(&self) -> Timestamp {
        self.effective_from
    }

    /// Returns the expiry instant, if bounded.
    #[inline]
    #[must_use]
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// Returns when the card was configured.
    #[inline]
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Returns the rule for a zone, if configured.
    #[must_use]
    pub fn zone_rule(&self, zone: Zone) -> Option<&ZoneRule> {
        self.zone_rules.get(&zone)
    }

    /// Returns true if a rule is configured for the zone.
    #[must_use]
    pub fn has_zone(&self, zone: Zone) -> bool {
        self.zone_rules.contains_key(&zone)
    }

    /// Returns true if the card is effective and unexpired at `as_of`.
    #[must_use]
    pub fn is_active_at(&self, as_of: Timestamp) -> bool {
        !self.effective_from.is_after(&as_of)
            && self.expires_at.is_none_or(|exp| exp.is_after(&as_of))
    }

    /// Validates the card and every zone rule.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRateCard` if the card has no zone
    /// rules or any rule fails structural validation.
    pub fn validate(&self) -> DomainResult<()> {
        if self.zone_rules.is_empty() {
            return Err(DomainError::InvalidRateCard(
                "rate card must configure at least one zone".to_string(),
            ));
        }
        for rule in self.zone_rules.values() {
            rule.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    fn basic_slabs() -> Vec<Slab> {
        vec![
            Slab::new(Decimal::ZERO, dec(5, 0), Money::from_major(120)).unwrap(),
            Slab::new(dec(5, 0), dec(10, 0), Money::from_major(200)).unwrap(),
        ]
    }

    fn basic_rule() -> ZoneRule {
        ZoneRule::new(
            basic_slabs(),
            dec(5, 1),
            WeightRounding::Ceil,
            Money::from_major(20),
        )
    }

    fn card_with_rule() -> RateCard {
        RateCard::new(
            CompanyId::new("acme"),
            ProviderId::new("bluedart"),
            RateScope::Sell,
            Timestamp::now().add_secs(-3600),
        )
        .with_zone_rule(Zone::Local, basic_rule())
    }

    mod slab {
        use super::*;

        #[test]
        fn rejects_inverted_bounds() {
            assert!(Slab::new(dec(5, 0), dec(5, 0), Money::from_major(10)).is_err());
            assert!(Slab::new(dec(5, 0), dec(3, 0), Money::from_major(10)).is_err());
            assert!(Slab::new(dec(-1, 0), dec(3, 0), Money::from_major(10)).is_err());
        }

        #[test]
        fn contains_is_half_open() {
            let slab = Slab::new(Decimal::ZERO, dec(5, 0), Money::from_major(120)).unwrap();
            assert!(slab.contains(dec(42, 1)));
            assert!(slab.contains(dec(5, 0))); // max inclusive
            assert!(!slab.contains(Decimal::ZERO)); // min exclusive
            assert!(!slab.contains(dec(51, 1)));
        }
    }

    mod cod_slab {
        use super::*;

        #[test]
        fn matches_bounded_range() {
            let slab = CodSlab::new(
                Money::from_major(0),
                Some(Money::from_major(1000)),
                CodCharge::Flat(Money::from_major(30)),
            );
            assert!(slab.matches(Money::from_major(500)));
            assert!(slab.matches(Money::from_major(1000)));
            assert!(!slab.matches(Money::from_major(1001)));
        }

        #[test]
        fn open_ended_range_matches_everything_above_min() {
            let slab = CodSlab::new(
                Money::from_major(1000),
                None,
                CodCharge::Percent {
                    percent: dec(15, 1),
                    minimum: Money::from_major(40),
                },
            );
            assert!(slab.matches(Money::from_major(50_000)));
            assert!(!slab.matches(Money::from_major(999)));
        }
    }

    mod zone_rule {
        use super::*;

        #[test]
        fn valid_rule_passes() {
            assert!(basic_rule().validate().is_ok());
        }

        #[test]
        fn empty_ladder_fails() {
            let rule = ZoneRule::new(
                vec![],
                dec(5, 1),
                WeightRounding::Ceil,
                Money::from_major(20),
            );
            assert!(rule.validate().is_err());
        }

        #[test]
        fn overlapping_slabs_fail() {
            let slabs = vec![
                Slab::new(Decimal::ZERO, dec(5, 0), Money::from_major(120)).unwrap(),
                Slab::new(dec(4, 0), dec(10, 0), Money::from_major(200)).unwrap(),
            ];
            let rule = ZoneRule::new(slabs, dec(5, 1), WeightRounding::Ceil, Money::from_major(20));
            assert!(rule.validate().is_err());
        }

        #[test]
        fn validate_rejects_slab_gap() {
            let slabs = vec![
                Slab::new(Decimal::ZERO, dec(5, 0), Money::from_major(120)).unwrap(),
                Slab::new(dec(7, 0), dec(10, 0), Money::from_major(200)).unwrap(),
            ];
            let rule = ZoneRule::new(slabs, dec(5, 1), WeightRounding::Ceil, Money::from_major(20));
            let err = rule.validate().unwrap_err();
            assert!(err.to_string().contains("gap"));
        }

        #[test]
        fn zero_rounding_unit_fails() {
            let rule = ZoneRule::new(
                basic_slabs(),
                Decimal::ZERO,
                WeightRounding::Ceil,
                Money::from_major(20),
            );
            assert!(rule.validate().is_err());
        }

        #[test]
        fn out_of_range_percent_fails() {
            let rule = basic_rule().with_gst(dec(150, 0));
            assert!(rule.validate().is_err());
        }

        #[test]
        fn find_slab_picks_matching_range() {
            let rule = basic_rule();
            assert_eq!(
                rule.find_slab(dec(42, 1)).unwrap().charge(),
                Money::from_major(120)
            );
            assert_eq!(
                rule.find_slab(dec(7, 0)).unwrap().charge(),
                Money::from_major(200)
            );
            assert!(rule.find_slab(dec(11, 0)).is_none());
        }
    }

    mod rate_card {
        use super::*;

        #[test]
        fn active_window() {
            let card = card_with_rule();
            assert!(card.is_active_at(Timestamp::now()));
            assert!(!card.is_active_at(Timestamp::now().add_secs(-7200)));

            let expired = card.with_expiry(Timestamp::now().add_secs(-60));
            assert!(!expired.is_active_at(Timestamp::now()));
        }

        #[test]
        fn zone_lookup() {
            let card = card_with_rule();
            assert!(card.has_zone(Zone::Local));
            assert!(!card.has_zone(Zone::Metro));
            assert!(card.zone_rule(Zone::Local).is_some());
        }

        #[test]
        fn validate_requires_a_zone() {
            let card = RateCard::new(
                CompanyId::new("acme"),
                ProviderId::new("bluedart"),
                RateScope::Cost,
                Timestamp::now(),
            );
            assert!(card.validate().is_err());
            assert!(card_with_rule().validate().is_ok());
        }

        #[test]
        fn serde_roundtrip() {
            let card = card_with_rule();
            let json = serde_json::to_string(&card).unwrap();
            let back: RateCard = serde_json::from_str(&json).unwrap();
            assert_eq!(card, back);
        }
    }
}
