//! # Domain Services
//!
//! Stateless business logic operating on domain entities.

pub mod pricing;

pub use pricing::{
    calculate_pricing, calculate_pricing_with_live_freight, PricingBreakdown, TaxBreakdown,
    TaxComponents,
};
