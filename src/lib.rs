//! # courier-quote
//!
//! Multi-carrier shipment pricing and booking engine.
//!
//! The engine prices a shipment against configurable slab-based rate
//! cards for every eligible carrier, ranks the resulting quotes, and
//! books the chosen option with automatic fallback to the next-ranked
//! carrier when an attempt fails before any waybill is issued.
//!
//! ## Architecture
//!
//! The crate follows a layered design:
//!
//! - [`domain`]: validated value objects, entities, and the pure rate
//!   formula engine (chargeable weight, slabs, COD, fuel, GST)
//! - [`application`]: the use cases - card selection, concurrent quote
//!   aggregation, ranking, booking orchestration, and simulation
//! - [`infrastructure`]: ports and adapters - carrier gateways, the
//!   provider registry, the company wallet, persistence, and metrics
//!
//! ## Booking safety
//!
//! A carrier waybill is the commitment point. Before one exists every
//! failure is recoverable: the wallet debit is reversed and the walk
//! moves to the next candidate. After one exists the booking is locked
//! to that carrier; post-commit failures are compensated and surfaced,
//! never retried elsewhere.
//!
//! ## Example
//!
//! ```no_run
//! use courier_quote::application::QuoteEngine;
//! # async fn example(engine: QuoteEngine, request: courier_quote::domain::entities::ShipmentRequest) {
//! let session = engine.generate_quotes(&request).await.unwrap();
//! for option in session.options() {
//!     println!("{}: {} ({} days)", option.provider, option.total_amount, option.transit_days);
//! }
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::{
    BookingConfig, BookingError, BookingOrchestrator, BookingSuccess, QuoteEngine,
    QuoteEngineConfig, QuoteError, RateCardSelector, RateSimulator,
};
pub use domain::value_objects::{Money, PaymentMode, RateScope, Timestamp, Zone};
pub use infrastructure::{CarrierGateway, CreateShipmentOutcome};
