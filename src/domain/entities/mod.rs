//! # Domain Entities
//!
//! Core business entities of the quoting and booking engine.
//!
//! - [`rate_card`]: admin-configured pricing rules per company, provider,
//!   scope, and zone
//! - [`request`]: the normalized shipment input
//! - [`quote`]: frozen ranked quote sessions and their options
//! - [`shipment`]: committed bookings with pricing snapshots
//! - [`booking`]: per-attempt audit records of the fallback walk

pub mod booking;
pub mod quote;
pub mod rate_card;
pub mod request;
pub mod shipment;

pub use booking::{AttemptOutcome, BookingAttempt, FailureCategory};
pub use quote::{QuoteOption, QuoteSession, SessionState};
pub use rate_card::{CodCharge, CodSlab, RateCard, Slab, ZoneRule};
pub use request::ShipmentRequest;
pub use shipment::{FallbackMetadata, PricingSnapshot, Shipment};
