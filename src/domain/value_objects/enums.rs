//! # Domain Enums
//!
//! Closed vocabularies shared across the pricing and booking flow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the consignee pays for the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    /// Paid online at order time.
    Prepaid,
    /// Cash on delivery; attracts a COD surcharge.
    Cod,
}

impl PaymentMode {
    /// Returns true for cash-on-delivery orders.
    #[inline]
    #[must_use]
    pub fn is_cod(&self) -> bool {
        matches!(self, Self::Cod)
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prepaid => write!(f, "PREPAID"),
            Self::Cod => write!(f, "COD"),
        }
    }
}

/// Whether a rate card prices what the carrier charges us (cost) or what
/// we charge the company (sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateScope {
    /// Carrier-billed cost rates.
    Cost,
    /// Customer-facing sell rates.
    Sell,
}

impl fmt::Display for RateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cost => write!(f, "COST"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// The base the fuel surcharge percentage applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelBasis {
    /// Freight (slab + extra-weight charge) only.
    Freight,
    /// Freight plus the COD surcharge.
    FreightCod,
}

impl fmt::Display for FuelBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Freight => write!(f, "FREIGHT"),
            Self::FreightCod => write!(f, "FREIGHT_COD"),
        }
    }
}

/// Which weight won the chargeable-weight comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightBasis {
    /// The scale weight was billed.
    Actual,
    /// The volumetric weight was billed.
    Volumetric,
}

impl fmt::Display for WeightBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Actual => write!(f, "ACTUAL"),
            Self::Volumetric => write!(f, "VOLUMETRIC"),
        }
    }
}

/// Which breakdown a provider's live rate feed overrides.
///
/// The source material is ambiguous on whether a live rate replaces the
/// sell price, the cost price, or both, so the target is an explicit
/// per-provider configuration flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiveRateOverride {
    /// No live feed configured; card rates only.
    #[default]
    Off,
    /// The live rate replaces the sell freight.
    SellOnly,
    /// The live rate replaces the cost freight.
    CostOnly,
    /// The live rate replaces both freights.
    Both,
}

impl LiveRateOverride {
    /// Returns true if a live feed should be consulted at all.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Returns true if the sell breakdown takes the live rate.
    #[inline]
    #[must_use]
    pub fn applies_to_sell(&self) -> bool {
        matches!(self, Self::SellOnly | Self::Both)
    }

    /// Returns true if the cost breakdown takes the live rate.
    #[inline]
    #[must_use]
    pub fn applies_to_cost(&self) -> bool {
        matches!(self, Self::CostOnly | Self::Both)
    }
}

impl fmt::Display for LiveRateOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => write!(f, "OFF"),
            Self::SellOnly => write!(f, "SELL_ONLY"),
            Self::CostOnly => write!(f, "COST_ONLY"),
            Self::Both => write!(f, "BOTH"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn payment_mode_cod_predicate() {
        assert!(PaymentMode::Cod.is_cod());
        assert!(!PaymentMode::Prepaid.is_cod());
    }

    #[test]
    fn display_values() {
        assert_eq!(PaymentMode::Cod.to_string(), "COD");
        assert_eq!(RateScope::Sell.to_string(), "SELL");
        assert_eq!(FuelBasis::FreightCod.to_string(), "FREIGHT_COD");
        assert_eq!(WeightBasis::Volumetric.to_string(), "VOLUMETRIC");
        assert_eq!(LiveRateOverride::SellOnly.to_string(), "SELL_ONLY");
    }

    #[test]
    fn live_rate_override_targets() {
        assert!(!LiveRateOverride::Off.is_enabled());
        assert!(LiveRateOverride::SellOnly.applies_to_sell());
        assert!(!LiveRateOverride::SellOnly.applies_to_cost());
        assert!(LiveRateOverride::Both.applies_to_sell());
        assert!(LiveRateOverride::Both.applies_to_cost());
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&FuelBasis::FreightCod).unwrap();
        assert_eq!(json, "\"FREIGHT_COD\"");
        let json = serde_json::to_string(&LiveRateOverride::Off).unwrap();
        assert_eq!(json, "\"OFF\"");
    }
}
