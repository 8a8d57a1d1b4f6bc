//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`SessionId`], [`OptionId`], [`ShipmentId`], [`RateCardId`]: UUID-based identifiers
//! - [`CompanyId`], [`ProviderId`], [`Waybill`]: String-based identifiers
//! - [`IdempotencyKey`]: Deterministic per-attempt key
//!
//! ## Numeric Types
//!
//! - [`Money`]: Decimal amount with checked arithmetic
//! - [`weight::WeightKg`], [`weight::DimensionsCm`]: Physical attributes
//!
//! ## Arithmetic
//!
//! - [`ArithmeticError`]: Error type for arithmetic failures
//! - [`CheckedArithmetic`]: Trait for safe arithmetic operations
//! - [`WeightRounding`]: Explicit rounding mode for billed weight
//!
//! ## Routing
//!
//! - [`zone::PostalCode`], [`zone::Zone`]: Lane classification

pub mod arithmetic;
pub mod enums;
pub mod ids;
pub mod money;
pub mod timestamp;
pub mod weight;
pub mod zone;

pub use arithmetic::{round_to_unit, ArithmeticError, ArithmeticResult, CheckedArithmetic, WeightRounding};
pub use enums::{FuelBasis, LiveRateOverride, PaymentMode, RateScope, WeightBasis};
pub use ids::{
    CompanyId, IdempotencyKey, OptionId, ProviderId, RateCardId, SessionId, ShipmentId, Waybill,
};
pub use money::Money;
pub use timestamp::Timestamp;
pub use weight::{DimensionsCm, WeightKg};
pub use zone::{PostalCode, Zone};
