//! # Rate Formula Engine
//!
//! Pure pricing of one shipment against one rate card.
//!
//! The pipeline is deterministic and side-effect free:
//!
//! 1. chargeable weight = max(actual, volumetric)
//! 2. slab lookup in the zone's ladder; over-slab weight bills per-kg
//!    after rounding up to the configured unit
//! 3. COD surcharge from the order-value table (or the 2% / minimum
//!    fallback when no slab matches)
//! 4. fuel surcharge on the configured base
//! 5. GST on the surcharged subtotal, split CGST/SGST on intra-state
//!    lanes and billed as IGST otherwise
//!
//! Configuration holes (missing zone rule, slab gap) are errors, never
//! defaulted prices. Every intermediate lands in [`PricingBreakdown`] so
//! an invoice line can be traced back to the rule that produced it.

use crate::domain::entities::rate_card::{CodCharge, RateCard};
use crate::domain::entities::request::ShipmentRequest;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::{FuelBasis, PaymentMode, WeightBasis};
use crate::domain::value_objects::zone::Zone;
use crate::domain::value_objects::{round_to_unit, CheckedArithmetic, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// COD fallback percentage applied when no COD slab matches.
fn cod_fallback_percent() -> Decimal {
    Decimal::TWO
}

/// COD fallback minimum charge.
fn cod_fallback_minimum() -> Money {
    Money::from_major(50)
}

/// GST components, split by lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxComponents {
    /// Intra-state lane: central + state GST halves.
    IntraState {
        /// Central GST half, rounded to the smallest currency unit.
        cgst: Money,
        /// State GST half, the exact remainder.
        sgst: Money,
    },
    /// Inter-state lane: integrated GST.
    InterState {
        /// The full integrated GST amount.
        igst: Money,
    },
}

/// GST line of a pricing breakdown.
///
/// Invariant: the components always sum exactly to `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Applied GST percentage.
    pub percent: Decimal,
    /// CGST/SGST or IGST split.
    pub components: TaxComponents,
    /// Total tax billed.
    pub total: Money,
}

impl TaxBreakdown {
    fn derive(percent: Decimal, taxable: Money, intra_state: bool) -> DomainResult<Self> {
        let total = taxable.percent(percent)?;
        let components = if intra_state {
            let (cgst, sgst) = total.split_even()?;
            TaxComponents::IntraState { cgst, sgst }
        } else {
            TaxComponents::InterState { igst: total }
        };
        Ok(Self {
            percent,
            components,
            total,
        })
    }
}

/// Fully itemized pricing of one shipment against one rate card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    /// Resolved delivery zone.
    pub zone: Zone,
    /// Payment mode the price was derived for.
    pub payment_mode: PaymentMode,
    /// Declared actual weight in kilograms.
    pub actual_weight_kg: Decimal,
    /// Computed volumetric weight in kilograms.
    pub volumetric_weight_kg: Decimal,
    /// Billing weight, `max(actual, volumetric)`.
    pub chargeable_weight_kg: Decimal,
    /// Which weight won.
    pub weight_basis: WeightBasis,
    /// Flat charge of the matched (or last) slab.
    pub slab_charge: Money,
    /// Raw weight beyond the last slab, zero when a slab matched.
    pub extra_weight_kg: Decimal,
    /// Extra weight after rounding to the billing unit.
    pub billed_extra_kg: Decimal,
    /// Per-kg charge on the billed extra weight.
    pub extra_weight_charge: Money,
    /// Freight actually billed; equals slab + extra unless a live
    /// carrier rate replaced it.
    pub freight: Money,
    /// True if a live carrier rate replaced the card freight.
    pub live_rate_applied: bool,
    /// COD surcharge, zero for prepaid.
    pub cod_charge: Money,
    /// The base the fuel surcharge was computed on.
    pub fuel_basis: FuelBasis,
    /// Fuel surcharge amount.
    pub fuel_surcharge: Money,
    /// GST line.
    pub tax: TaxBreakdown,
    /// Grand total: freight + COD + fuel + tax.
    pub total: Money,
}

impl PricingBreakdown {
    /// Builds a breakdown with the given total and no itemization, for
    /// tests that only care about totals.
    #[cfg(test)]
    #[must_use]
    pub fn flat_for_tests(total: Money) -> Self {
        Self {
            zone: Zone::Local,
            payment_mode: PaymentMode::Prepaid,
            actual_weight_kg: Decimal::ONE,
            volumetric_weight_kg: Decimal::ONE,
            chargeable_weight_kg: Decimal::ONE,
            weight_basis: WeightBasis::Actual,
            slab_charge: total,
            extra_weight_kg: Decimal::ZERO,
            billed_extra_kg: Decimal::ZERO,
            extra_weight_charge: Money::ZERO,
            freight: total,
            live_rate_applied: false,
            cod_charge: Money::ZERO,
            fuel_basis: FuelBasis::Freight,
            fuel_surcharge: Money::ZERO,
            tax: TaxBreakdown {
                percent: Decimal::ZERO,
                components: TaxComponents::InterState { igst: Money::ZERO },
                total: Money::ZERO,
            },
            total,
        }
    }
}

/// Prices a shipment against a rate card using card freight.
///
/// `dim_factor` is the provider's dimensional divisor for volumetric
/// weight (e.g. 5000 for cm³/kg).
///
/// # Errors
///
/// Returns a validation error for malformed input, a configuration error
/// when the card has no rule for the lane's zone or the ladder has a gap,
/// or an arithmetic error on overflow.
pub fn calculate_pricing(
    card: &RateCard,
    request: &ShipmentRequest,
    dim_factor: Decimal,
) -> DomainResult<PricingBreakdown> {
    price(card, request, dim_factor, None)
}

/// Prices a shipment with a live carrier rate replacing the card freight.
///
/// The slab machinery still runs so the breakdown shows what the card
/// would have charged; COD, fuel, and GST are derived from the live
/// freight.
///
/// # Errors
///
/// Same failure modes as [`calculate_pricing`].
pub fn calculate_pricing_with_live_freight(
    card: &RateCard,
    request: &ShipmentRequest,
    dim_factor: Decimal,
    live_freight: Money,
) -> DomainResult<PricingBreakdown> {
    price(card, request, dim_factor, Some(live_freight))
}

fn price(
    card: &RateCard,
    request: &ShipmentRequest,
    dim_factor: Decimal,
    live_freight: Option<Money>,
) -> DomainResult<PricingBreakdown> {
    request.validate()?;

    let zone = request.zone();
    let rule = card
        .zone_rule(zone)
        .ok_or_else(|| DomainError::MissingZoneRule {
            card: card.id().to_string(),
            zone,
        })?;

    let volumetric_weight_kg = request.dimensions().volumetric_weight(dim_factor)?;
    let (chargeable, weight_basis) = request.weight().chargeable(request.dimensions(), dim_factor)?;
    let weight = chargeable.get();

    let (slab_charge, extra_weight_kg, billed_extra_kg, extra_weight_charge) =
        match rule.find_slab(weight) {
            Some(slab) => (slab.charge(), Decimal::ZERO, Decimal::ZERO, Money::ZERO),
            None => {
                let last = rule.last_slab().ok_or_else(|| {
                    DomainError::InvalidRateCard(format!("zone {zone} has an empty slab ladder"))
                })?;
                if weight > last.max_kg() {
                    let extra = weight.safe_sub(last.max_kg())?;
                    let billed =
                        round_to_unit(extra, rule.rounding_unit_kg(), rule.rounding_mode())?;
                    let charge = rule.additional_per_kg().safe_mul(billed)?.rounded();
                    (last.charge(), extra, billed, charge)
                } else {
                    return Err(DomainError::SlabGap { zone, weight });
                }
            }
        };

    let card_freight = slab_charge.safe_add(extra_weight_charge)?;
    let (freight, live_rate_applied) = match live_freight {
        Some(live) => (live.rounded(), true),
        None => (card_freight, false),
    };

    let cod_charge = if request.payment_mode().is_cod() {
        match rule.find_cod_slab(request.order_value()) {
            Some(slab) => match slab.charge() {
                CodCharge::Flat(amount) => *amount,
                CodCharge::Percent { percent, minimum } => {
                    request.order_value().percent(*percent)?.max(*minimum)
                }
            },
            None => request
                .order_value()
                .percent(cod_fallback_percent())?
                .max(cod_fallback_minimum()),
        }
    } else {
        Money::ZERO
    };

    let fuel_base = match rule.fuel_basis() {
        FuelBasis::Freight => freight,
        FuelBasis::FreightCod => freight.safe_add(cod_charge)?,
    };
    let fuel_surcharge = fuel_base.percent(rule.fuel_surcharge_percent())?;

    let taxable = freight.safe_add(cod_charge)?.safe_add(fuel_surcharge)?;
    let tax = TaxBreakdown::derive(rule.gst_percent(), taxable, request.is_intra_state())?;
    let total = taxable.safe_add(tax.total)?;

    Ok(PricingBreakdown {
        zone,
        payment_mode: request.payment_mode(),
        actual_weight_kg: request.weight().get(),
        volumetric_weight_kg,
        chargeable_weight_kg: weight,
        weight_basis,
        slab_charge,
        extra_weight_kg,
        billed_extra_kg,
        extra_weight_charge,
        freight,
        live_rate_applied,
        cod_charge,
        fuel_basis: rule.fuel_basis(),
        fuel_surcharge,
        tax,
        total,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::entities::rate_card::{CodSlab, Slab, ZoneRule};
    use crate::domain::value_objects::enums::RateScope;
    use crate::domain::value_objects::weight::{DimensionsCm, WeightKg};
    use crate::domain::value_objects::zone::PostalCode;
    use crate::domain::value_objects::{CompanyId, ProviderId, Timestamp, WeightRounding};
    use proptest::prelude::*;

    const DIM_FACTOR: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

    fn dec(value: i64, scale: u32) -> Decimal {
        Decimal::new(value, scale)
    }

    fn basic_rule() -> ZoneRule {
        ZoneRule::new(
            vec![Slab::new(Decimal::ZERO, dec(5, 0), Money::from_major(120)).unwrap()],
            dec(5, 1),
            WeightRounding::Ceil,
            Money::from_major(20),
        )
    }

    fn card_for(zone: Zone, rule: ZoneRule) -> RateCard {
        RateCard::new(
            CompanyId::new("acme"),
            ProviderId::new("bluedart"),
            RateScope::Sell,
            Timestamp::now().add_secs(-60),
        )
        .with_zone_rule(zone, rule)
    }

    fn request_for(
        origin: &str,
        destination: &str,
        weight_kg: Decimal,
        mode: PaymentMode,
        order_value: Money,
    ) -> ShipmentRequest {
        ShipmentRequest::new(
            CompanyId::new("acme"),
            PostalCode::new(origin).unwrap(),
            PostalCode::new(destination).unwrap(),
            WeightKg::new(weight_kg).unwrap(),
            DimensionsCm::new(dec(30, 0), dec(20, 0), dec(10, 0)).unwrap(),
            mode,
            order_value,
        )
    }

    // 110001 -> 110045 is same-district Delhi: Local, intra-state.
    fn local_request(weight_kg: Decimal, mode: PaymentMode, order_value: Money) -> ShipmentRequest {
        request_for("110001", "110045", weight_kg, mode, order_value)
    }

    mod slab_resolution {
        use super::*;

        #[test]
        fn in_slab_weight_bills_flat_charge() {
            let card = card_for(Zone::Local, basic_rule());
            let req = local_request(dec(42, 1), PaymentMode::Prepaid, Money::ZERO);

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.freight, Money::from_major(120));
            assert_eq!(breakdown.total, Money::from_major(120));
            assert_eq!(breakdown.extra_weight_charge, Money::ZERO);
            assert_eq!(breakdown.weight_basis, WeightBasis::Actual);
        }

        #[test]
        fn over_slab_weight_rounds_up_to_unit() {
            // extra 1.3 kg rounds up to 1.5 at a 0.5 unit: 120 + 1.5*20 = 150
            let card = card_for(Zone::Local, basic_rule());
            let req = local_request(dec(63, 1), PaymentMode::Prepaid, Money::ZERO);

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.extra_weight_kg, dec(13, 1));
            assert_eq!(breakdown.billed_extra_kg, dec(15, 1));
            assert_eq!(breakdown.extra_weight_charge, Money::from_major(30));
            assert_eq!(breakdown.total, Money::from_major(150));
        }

        #[test]
        fn exact_slab_boundary_has_no_extra_charge() {
            let card = card_for(Zone::Local, basic_rule());
            let req = local_request(dec(5, 0), PaymentMode::Prepaid, Money::ZERO);

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.freight, Money::from_major(120));
            assert_eq!(breakdown.billed_extra_kg, Decimal::ZERO);
        }

        #[test]
        fn slab_gap_is_an_error_not_a_default() {
            let rule = ZoneRule::new(
                vec![
                    Slab::new(Decimal::ZERO, dec(5, 0), Money::from_major(120)).unwrap(),
                    Slab::new(dec(6, 0), dec(10, 0), Money::from_major(200)).unwrap(),
                ],
                dec(5, 1),
                WeightRounding::Ceil,
                Money::from_major(20),
            );
            let card = card_for(Zone::Local, rule);
            let req = local_request(dec(55, 1), PaymentMode::Prepaid, Money::ZERO);

            let err = calculate_pricing(&card, &req, DIM_FACTOR).unwrap_err();
            assert!(matches!(err, DomainError::SlabGap { .. }));
            assert!(err.is_configuration());
        }

        #[test]
        fn missing_zone_rule_is_an_error() {
            let card = card_for(Zone::Metro, basic_rule());
            let req = local_request(dec(42, 1), PaymentMode::Prepaid, Money::ZERO);

            let err = calculate_pricing(&card, &req, DIM_FACTOR).unwrap_err();
            assert!(matches!(err, DomainError::MissingZoneRule { .. }));
        }

        #[test]
        fn volumetric_weight_wins_when_bulkier() {
            let card = card_for(Zone::Local, basic_rule());
            let req = ShipmentRequest::new(
                CompanyId::new("acme"),
                PostalCode::new("110001").unwrap(),
                PostalCode::new("110045").unwrap(),
                WeightKg::new(dec(1, 0)).unwrap(),
                // 50*40*25 / 5000 = 10 kg volumetric
                DimensionsCm::new(dec(50, 0), dec(40, 0), dec(25, 0)).unwrap(),
                PaymentMode::Prepaid,
                Money::ZERO,
            );

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.weight_basis, WeightBasis::Volumetric);
            assert_eq!(breakdown.chargeable_weight_kg, dec(10, 0));
            // 10 kg is 5 kg over the slab: 120 + 5*20 = 220
            assert_eq!(breakdown.total, Money::from_major(220));
        }
    }

    mod cod {
        use super::*;

        #[test]
        fn fallback_applies_percent_with_floor() {
            // 2% of 2000 = 40, floored at 50
            let card = card_for(Zone::Local, basic_rule());
            let req = local_request(dec(42, 1), PaymentMode::Cod, Money::from_major(2000));

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.cod_charge, Money::from_major(50));
            assert_eq!(breakdown.total, Money::from_major(170));
        }

        #[test]
        fn fallback_percent_exceeds_floor_on_large_orders() {
            // 2% of 10000 = 200 > 50
            let card = card_for(Zone::Local, basic_rule());
            let req = local_request(dec(42, 1), PaymentMode::Cod, Money::from_major(10_000));

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.cod_charge, Money::from_major(200));
        }

        #[test]
        fn matched_flat_slab_overrides_fallback() {
            let rule = basic_rule().with_cod_slabs(vec![CodSlab::new(
                Money::ZERO,
                Some(Money::from_major(5000)),
                CodCharge::Flat(Money::from_major(30)),
            )]);
            let card = card_for(Zone::Local, rule);
            let req = local_request(dec(42, 1), PaymentMode::Cod, Money::from_major(2000));

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.cod_charge, Money::from_major(30));
        }

        #[test]
        fn matched_percent_slab_respects_minimum() {
            let rule = basic_rule().with_cod_slabs(vec![CodSlab::new(
                Money::ZERO,
                None,
                CodCharge::Percent {
                    percent: dec(15, 1), // 1.5%
                    minimum: Money::from_major(60),
                },
            )]);
            let card = card_for(Zone::Local, rule);
            // 1.5% of 2000 = 30, floored at 60
            let req = local_request(dec(42, 1), PaymentMode::Cod, Money::from_major(2000));

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.cod_charge, Money::from_major(60));
        }

        #[test]
        fn prepaid_pays_no_cod() {
            let card = card_for(Zone::Local, basic_rule());
            let req = local_request(dec(42, 1), PaymentMode::Prepaid, Money::from_major(2000));

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert_eq!(breakdown.cod_charge, Money::ZERO);
        }

        #[test]
        fn cod_with_zero_order_value_is_rejected() {
            let card = card_for(Zone::Local, basic_rule());
            let req = local_request(dec(42, 1), PaymentMode::Cod, Money::ZERO);

            let err = calculate_pricing(&card, &req, DIM_FACTOR).unwrap_err();
            assert!(err.is_validation());
        }
    }

    mod fuel {
        use super::*;

        #[test]
        fn freight_basis_excludes_cod() {
            let rule = basic_rule().with_fuel_surcharge(dec(10, 0), FuelBasis::Freight);
            let card = card_for(Zone::Local, rule);
            let req = local_request(dec(42, 1), PaymentMode::Cod, Money::from_major(2000));

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            // 10% of 120 freight only
            assert_eq!(breakdown.fuel_surcharge, Money::from_major(12));
            assert_eq!(breakdown.total, Money::from_major(182));
        }

        #[test]
        fn freight_cod_basis_includes_cod() {
            let rule = basic_rule().with_fuel_surcharge(dec(10, 0), FuelBasis::FreightCod);
            let card = card_for(Zone::Local, rule);
            let req = local_request(dec(42, 1), PaymentMode::Cod, Money::from_major(2000));

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            // 10% of (120 + 50)
            assert_eq!(breakdown.fuel_surcharge, Money::from_major(17));
            assert_eq!(breakdown.total, Money::from_major(187));
        }
    }

    mod gst {
        use super::*;

        #[test]
        fn intra_state_splits_cgst_sgst_exactly() {
            let rule = basic_rule().with_gst(dec(18, 0));
            let card = card_for(Zone::Local, rule);
            let req = local_request(dec(42, 1), PaymentMode::Prepaid, Money::ZERO);

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            // 18% of 120 = 21.60
            assert_eq!(breakdown.tax.total, Money::from_minor(2160));
            match breakdown.tax.components {
                TaxComponents::IntraState { cgst, sgst } => {
                    assert_eq!(cgst, Money::from_minor(1080));
                    assert_eq!(cgst.safe_add(sgst).unwrap(), breakdown.tax.total);
                }
                TaxComponents::InterState { .. } => panic!("expected intra-state split"),
            }
            assert_eq!(breakdown.total, Money::from_minor(14_160));
        }

        #[test]
        fn intra_state_split_handles_odd_paisa() {
            // Force an odd tax amount: 18% of 120.05 = 21.609 -> 21.61
            let rule = ZoneRule::new(
                vec![Slab::new(Decimal::ZERO, dec(5, 0), Money::from_minor(12_005)).unwrap()],
                dec(5, 1),
                WeightRounding::Ceil,
                Money::from_major(20),
            )
            .with_gst(dec(18, 0));
            let card = card_for(Zone::Local, rule);
            let req = local_request(dec(42, 1), PaymentMode::Prepaid, Money::ZERO);

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            match breakdown.tax.components {
                TaxComponents::IntraState { cgst, sgst } => {
                    assert_eq!(cgst.safe_add(sgst).unwrap(), breakdown.tax.total);
                    assert_ne!(cgst, sgst); // odd paisa lands on one half
                }
                TaxComponents::InterState { .. } => panic!("expected intra-state split"),
            }
        }

        #[test]
        fn inter_state_bills_igst() {
            let rule = basic_rule().with_gst(dec(18, 0));
            let card = card_for(Zone::Metro, rule);
            // Delhi -> Kolkata: both metro, different states
            let req = request_for("110001", "700001", dec(42, 1), PaymentMode::Prepaid, Money::ZERO);

            let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
            assert!(matches!(
                breakdown.tax.components,
                TaxComponents::InterState { igst } if igst == breakdown.tax.total
            ));
        }
    }

    mod live_rate {
        use super::*;

        #[test]
        fn live_freight_replaces_card_freight() {
            let rule = basic_rule().with_gst(dec(18, 0));
            let card = card_for(Zone::Local, rule);
            let req = local_request(dec(42, 1), PaymentMode::Prepaid, Money::ZERO);

            let breakdown =
                calculate_pricing_with_live_freight(&card, &req, DIM_FACTOR, Money::from_major(100))
                    .unwrap();
            assert!(breakdown.live_rate_applied);
            assert_eq!(breakdown.freight, Money::from_major(100));
            // Card slab charge still reported for audit
            assert_eq!(breakdown.slab_charge, Money::from_major(120));
            // GST follows the live freight: 18% of 100
            assert_eq!(breakdown.tax.total, Money::from_major(18));
        }
    }

    mod properties {
        use super::*;

        proptest! {
            #[test]
            fn pricing_is_deterministic(
                weight_centi in 1i64..=20_000,
                side_a in 1i64..=120,
                side_b in 1i64..=120,
                side_c in 1i64..=120,
            ) {
                let rule = basic_rule()
                    .with_fuel_surcharge(dec(10, 0), FuelBasis::Freight)
                    .with_gst(dec(18, 0));
                let card = card_for(Zone::Local, rule);
                let req = ShipmentRequest::new(
                    CompanyId::new("acme"),
                    PostalCode::new("110001").unwrap(),
                    PostalCode::new("110045").unwrap(),
                    WeightKg::new(Decimal::new(weight_centi, 2)).unwrap(),
                    DimensionsCm::new(
                        Decimal::from(side_a),
                        Decimal::from(side_b),
                        Decimal::from(side_c),
                    )
                    .unwrap(),
                    PaymentMode::Prepaid,
                    Money::ZERO,
                );

                let first = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
                let second = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
                prop_assert_eq!(&first, &second);
                prop_assert!(first.chargeable_weight_kg >= first.actual_weight_kg);
            }

            #[test]
            fn tax_components_always_reconstruct_total(
                weight_centi in 1i64..=500,
                slab_minor in 1u64..=1_000_000,
            ) {
                let rule = ZoneRule::new(
                    vec![Slab::new(Decimal::ZERO, dec(5, 0), Money::from_minor(slab_minor)).unwrap()],
                    dec(5, 1),
                    WeightRounding::Ceil,
                    Money::from_major(20),
                )
                .with_gst(dec(18, 0));
                let card = card_for(Zone::Local, rule);
                let req = local_request(Decimal::new(weight_centi, 2), PaymentMode::Prepaid, Money::ZERO);

                let breakdown = calculate_pricing(&card, &req, DIM_FACTOR).unwrap();
                if let TaxComponents::IntraState { cgst, sgst } = breakdown.tax.components {
                    prop_assert_eq!(cgst.safe_add(sgst).unwrap(), breakdown.tax.total);
                }
            }
        }
    }
}
