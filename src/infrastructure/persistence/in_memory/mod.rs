//! # In-Memory Persistence
//!
//! Map-backed implementations of the repository traits, used in tests
//! and by the simulation service.

pub mod attempt_log;
pub mod rate_card_repository;
pub mod session_store;
pub mod shipment_repository;

pub use attempt_log::InMemoryAttemptLog;
pub use rate_card_repository::InMemoryRateCardRepository;
pub use session_store::InMemorySessionStore;
pub use shipment_repository::InMemoryShipmentRepository;
