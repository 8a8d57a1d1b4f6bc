//! # Application Errors
//!
//! Error taxonomy for the quoting and booking use cases.
//!
//! Recoverable provider errors (timeouts, rejections) never surface from
//! these types directly: the quote engine absorbs them into per-provider
//! diagnostics and the booking orchestrator absorbs them into the
//! fallback walk. What callers see is the aggregate outcome.

use crate::domain::errors::DomainError;
use crate::domain::value_objects::enums::RateScope;
use crate::domain::value_objects::zone::Zone;
use crate::domain::value_objects::{CompanyId, OptionId, ProviderId, SessionId, Waybill};
use crate::infrastructure::persistence::traits::RepositoryError;
use crate::infrastructure::wallet::WalletError;
use thiserror::Error;

/// Error type for rate card selection.
///
/// Always a configuration fault: the fix is an admin action, never a
/// retry.
#[derive(Debug, Clone, Error)]
pub enum SelectorError {
    /// No card is active for the tuple at the requested instant.
    #[error("no active {scope} rate card for company {company}, provider {provider}")]
    NoActiveCard {
        /// The requesting company.
        company: CompanyId,
        /// The carrier provider.
        provider: ProviderId,
        /// The pricing scope.
        scope: RateScope,
    },

    /// The active card has no rule for the lane's zone.
    #[error("active rate card for provider {provider} has no rule for zone {zone}")]
    MissingZoneRule {
        /// The carrier provider.
        provider: ProviderId,
        /// The unconfigured zone.
        zone: Zone,
    },

    /// The card store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for selector operations.
pub type SelectorResult<T> = Result<T, SelectorError>;

/// Error type for quote generation.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// No enabled provider services the lane's zone.
    #[error("no providers available for zone")]
    NoProvidersAvailable,

    /// Every provider was excluded by an error or timeout.
    #[error("all providers failed: {}", .0.join("; "))]
    AllProvidersFailed(Vec<String>),

    /// The overall aggregation deadline elapsed.
    #[error("quote aggregation timed out")]
    Timeout,

    /// The request failed validation before any provider call.
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The session store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result type for quote operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Error type for rate card simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The provider has no registered profile.
    #[error("no profile registered for provider {0}")]
    UnknownProvider(ProviderId),

    /// No usable card or zone rule for the hypothetical lane.
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// The hypothetical request could not be priced.
    #[error(transparent)]
    Pricing(#[from] DomainError),
}

/// Result type for simulation operations.
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Error type for booking.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The session does not exist.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The quote TTL elapsed before booking.
    #[error("session {0} has expired")]
    SessionExpired(SessionId),

    /// The session is already being booked or was consumed.
    #[error("session {0} is already consumed or being booked")]
    SessionAlreadyConsumed(SessionId),

    /// The selected option is not part of the session.
    #[error("option {option} not found in session {session}")]
    OptionNotFound {
        /// The session being booked.
        session: SessionId,
        /// The missing option.
        option: OptionId,
    },

    /// Every candidate in the walk failed recoverably.
    #[error("all providers exhausted after {attempts} attempts")]
    AllProvidersExhausted {
        /// How many attempts were made.
        attempts: u32,
    },

    /// A waybill was issued but a post-commit step failed. The booking
    /// is locked to that carrier; compensation state is reported for
    /// manual reconciliation.
    #[error("booking committed to waybill {waybill} but failed afterwards: {message}")]
    NonRecoverable {
        /// The issued waybill.
        waybill: Waybill,
        /// Whether the wallet debit was reversed.
        compensation_applied: bool,
        /// What failed after commitment.
        message: String,
    },

    /// The wallet refused the booking charge.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The session or shipment store failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BookingError {
    /// Returns true if retrying the same call later could succeed.
    ///
    /// Expired, consumed, and non-recoverable outcomes are terminal for
    /// this session; exhaustion and wallet refusals are not.
    #[must_use]
    pub fn is_terminal_for_session(&self) -> bool {
        matches!(
            self,
            Self::SessionExpired(_) | Self::NonRecoverable { .. }
        )
    }
}

/// Result type for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_recoverable_is_terminal() {
        let err = BookingError::NonRecoverable {
            waybill: Waybill::new("AWB1"),
            compensation_applied: true,
            message: "persistence failed".to_string(),
        };
        assert!(err.is_terminal_for_session());
        assert!(err.to_string().contains("AWB1"));
    }

    #[test]
    fn exhaustion_is_not_terminal() {
        let err = BookingError::AllProvidersExhausted { attempts: 3 };
        assert!(!err.is_terminal_for_session());
    }

    #[test]
    fn selector_error_displays_tuple() {
        let err = SelectorError::NoActiveCard {
            company: CompanyId::new("acme"),
            provider: ProviderId::new("bluedart"),
            scope: RateScope::Sell,
        };
        let text = err.to_string();
        assert!(text.contains("acme"));
        assert!(text.contains("bluedart"));
    }
}
