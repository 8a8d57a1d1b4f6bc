//! # Repository Traits
//!
//! Persistence ports for the engine's aggregates.
//!
//! The session store owns the booking concurrency guard: state
//! transitions are compare-and-swap operations that return whether the
//! swap happened, so two concurrent booking calls for one session can
//! never both proceed.

use crate::domain::entities::booking::BookingAttempt;
use crate::domain::entities::quote::QuoteSession;
use crate::domain::entities::rate_card::RateCard;
use crate::domain::entities::shipment::Shipment;
use crate::domain::value_objects::enums::RateScope;
use crate::domain::value_objects::{
    CompanyId, ProviderId, RateCardId, SessionId, ShipmentId, Waybill,
};
use async_trait::async_trait;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Entity kind (for diagnostics).
        entity: &'static str,
        /// The missing identifier (display form).
        id: String,
    },

    /// A uniqueness or state constraint was violated.
    #[error("repository conflict: {0}")]
    Conflict(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Creates a not-found error.
    #[must_use]
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true for a missing-record error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Persistence port for rate cards.
#[async_trait]
pub trait RateCardRepository: Send + Sync + std::fmt::Debug {
    /// Stores a rate card. Implementations reject structurally invalid
    /// cards, so a stored card always passes [`RateCard::validate`].
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a card with the same id
    /// already exists or the card fails validation.
    async fn insert(&self, card: RateCard) -> RepositoryResult<()>;

    /// Fetches a card by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent.
    async fn get(&self, id: RateCardId) -> RepositoryResult<RateCard>;

    /// Returns all cards for a company, provider, and scope, in no
    /// particular order. Selection among them is the selector's job.
    async fn find_for(
        &self,
        company: &CompanyId,
        provider: &ProviderId,
        scope: RateScope,
    ) -> RepositoryResult<Vec<RateCard>>;

    /// Deletes a card.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent.
    async fn remove(&self, id: RateCardId) -> RepositoryResult<()>;
}

/// Persistence port for quote sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug {
    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on duplicate id.
    async fn insert(&self, session: QuoteSession) -> RepositoryResult<()>;

    /// Fetches a session by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent.
    async fn get(&self, id: SessionId) -> RepositoryResult<QuoteSession>;

    /// Atomically moves `Pending -> Attempting`. Returns false if the
    /// session was already held or consumed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent.
    async fn begin_booking(&self, id: SessionId) -> RepositoryResult<bool>;

    /// Atomically moves `Attempting -> Consumed`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent.
    async fn mark_consumed(&self, id: SessionId) -> RepositoryResult<bool>;

    /// Atomically moves `Attempting -> Pending`, releasing the session
    /// after an exhausted walk.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent.
    async fn release(&self, id: SessionId) -> RepositoryResult<bool>;

    /// Removes expired sessions; returns how many were purged.
    async fn purge_expired(&self) -> RepositoryResult<usize>;
}

/// Persistence port for booked shipments.
#[async_trait]
pub trait ShipmentRepository: Send + Sync + std::fmt::Debug {
    /// Stores a shipment.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on duplicate id or waybill.
    async fn insert(&self, shipment: Shipment) -> RepositoryResult<()>;

    /// Fetches a shipment by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if absent.
    async fn get(&self, id: ShipmentId) -> RepositoryResult<Shipment>;

    /// Looks up a shipment by carrier waybill.
    async fn find_by_waybill(&self, waybill: &Waybill) -> RepositoryResult<Option<Shipment>>;

    /// Returns the shipment booked from a session, if any.
    async fn find_by_session(&self, session: SessionId) -> RepositoryResult<Option<Shipment>>;
}

/// Append-only log of booking attempts.
#[async_trait]
pub trait BookingAttemptLog: Send + Sync + std::fmt::Debug {
    /// Records an attempt.
    async fn record(&self, attempt: BookingAttempt) -> RepositoryResult<()>;

    /// Returns all attempts for a session, in recording order.
    async fn attempts_for(&self, session: SessionId) -> RepositoryResult<Vec<BookingAttempt>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_classification() {
        let err = RepositoryError::not_found("session", SessionId::new_v4());
        assert!(err.is_not_found());
        assert!(err.to_string().contains("session"));

        let err = RepositoryError::Conflict("duplicate".to_string());
        assert!(!err.is_not_found());
    }
}
