//! # Application Layer
//!
//! Orchestrates domain logic and infrastructure into the engine's use
//! cases: quote generation, booking with fallback, card selection, and
//! pricing simulation.

pub mod error;
pub mod services;

pub use error::{
    BookingError, BookingResult, QuoteError, QuoteResult, SelectorError, SelectorResult,
    SimulationError, SimulationResult,
};
pub use services::{
    BookingConfig, BookingOrchestrator, BookingSuccess, CheapestFirst, QuoteEngine,
    QuoteEngineConfig, RankingStrategy, RateCardSelector, RateSimulator, ReliabilityWeighted,
    SimulationOutcome,
};
