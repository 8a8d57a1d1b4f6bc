//! # Application Services
//!
//! Use cases of the quoting and booking engine:
//!
//! - [`RateCardSelector`]: resolves the active card for a pricing tuple
//! - [`QuoteEngine`]: concurrent multi-provider quote aggregation
//! - [`RankingStrategy`]: pluggable quote ordering
//! - [`BookingOrchestrator`]: booking with safe provider fallback
//! - [`RateSimulator`]: admin dry run of the pricing pipeline

pub mod booking_orchestrator;
pub mod quote_engine;
pub mod ranking;
pub mod rate_card_selector;
pub mod simulation;

pub use booking_orchestrator::{BookingConfig, BookingOrchestrator, BookingSuccess};
pub use quote_engine::{QuoteEngine, QuoteEngineConfig};
pub use ranking::{CheapestFirst, RankingStrategy, ReliabilityWeighted};
pub use rate_card_selector::RateCardSelector;
pub use simulation::{RateSimulator, SimulationOutcome};
