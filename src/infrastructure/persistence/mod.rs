//! # Persistence
//!
//! Repository ports and their in-memory implementations.

pub mod in_memory;
pub mod traits;

pub use traits::{
    BookingAttemptLog, RateCardRepository, RepositoryError, RepositoryResult, SessionStore,
    ShipmentRepository,
};
