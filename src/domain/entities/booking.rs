//! # Booking Attempts
//!
//! Audit records for the fallback walk. Every attempt against a carrier
//! is logged with its classified outcome, whether or not it succeeded.

use crate::domain::value_objects::{
    IdempotencyKey, OptionId, ProviderId, SessionId, Timestamp, Waybill,
};
use serde::{Deserialize, Serialize};

/// Why a booking attempt failed without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureCategory {
    /// The carrier did not answer within the attempt deadline.
    Timeout,
    /// The carrier explicitly declined the shipment.
    Rejection,
    /// The carrier answered with a server-side fault.
    ServerError,
    /// Our own configuration was unusable (bad card, missing rule).
    Configuration,
}

/// Classified result of one booking attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptOutcome {
    /// The carrier issued a waybill and every post-commit step succeeded.
    Succeeded {
        /// The issued waybill.
        waybill: Waybill,
    },
    /// The attempt failed before any waybill was issued; the walk may
    /// move to the next provider.
    Recoverable {
        /// Failure classification.
        category: FailureCategory,
        /// Carrier or engine detail for the audit trail.
        message: String,
    },
    /// A waybill was issued but a post-commit step failed. Terminal: no
    /// alternate provider may be tried.
    PostCommit {
        /// The waybill that locks the booking to this provider.
        waybill: Waybill,
        /// What failed after commitment.
        message: String,
    },
}

impl AttemptOutcome {
    /// Returns true for a fully successful attempt.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Returns true if the walk may continue past this attempt.
    #[must_use]
    pub fn allows_fallback(&self) -> bool {
        matches!(self, Self::Recoverable { .. })
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded { .. } => "succeeded",
            Self::Recoverable { .. } => "recoverable",
            Self::PostCommit { .. } => "post_commit_failure",
        }
    }
}

/// One logged attempt in a booking walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingAttempt {
    session_id: SessionId,
    option_id: OptionId,
    provider: ProviderId,
    attempt_number: u32,
    idempotency_key: IdempotencyKey,
    outcome: AttemptOutcome,
    recorded_at: Timestamp,
}

impl BookingAttempt {
    /// Records an attempt outcome.
    #[must_use]
    pub fn new(
        session_id: SessionId,
        option_id: OptionId,
        provider: ProviderId,
        attempt_number: u32,
        idempotency_key: IdempotencyKey,
        outcome: AttemptOutcome,
    ) -> Self {
        Self {
            session_id,
            option_id,
            provider,
            attempt_number,
            idempotency_key,
            outcome,
            recorded_at: Timestamp::now(),
        }
    }

    /// Returns the session being booked.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns the option this attempt targeted.
    #[inline]
    #[must_use]
    pub fn option_id(&self) -> OptionId {
        self.option_id
    }

    /// Returns the provider called.
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &ProviderId {
        &self.provider
    }

    /// Returns the 1-based position in the walk.
    #[inline]
    #[must_use]
    pub fn attempt_number(&self) -> u32 {
        self.attempt_number
    }

    /// Returns the idempotency key presented to the carrier and wallet.
    #[inline]
    #[must_use]
    pub fn idempotency_key(&self) -> &IdempotencyKey {
        &self.idempotency_key
    }

    /// Returns the classified outcome.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &AttemptOutcome {
        &self.outcome
    }

    /// Returns when the attempt was recorded.
    #[inline]
    #[must_use]
    pub fn recorded_at(&self) -> Timestamp {
        self.recorded_at
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn outcome_classification() {
        let ok = AttemptOutcome::Succeeded {
            waybill: Waybill::new("AWB1"),
        };
        assert!(ok.is_success());
        assert!(!ok.allows_fallback());

        let retry = AttemptOutcome::Recoverable {
            category: FailureCategory::Timeout,
            message: "no response in 10s".to_string(),
        };
        assert!(!retry.is_success());
        assert!(retry.allows_fallback());

        let stuck = AttemptOutcome::PostCommit {
            waybill: Waybill::new("AWB2"),
            message: "shipment persistence failed".to_string(),
        };
        assert!(!stuck.is_success());
        assert!(!stuck.allows_fallback());
        assert_eq!(stuck.label(), "post_commit_failure");
    }

    #[test]
    fn attempt_captures_walk_position() {
        let session = SessionId::new_v4();
        let option = OptionId::new_v4();
        let key = IdempotencyKey::derive(&session, &option, 2);
        let attempt = BookingAttempt::new(
            session,
            option,
            ProviderId::new("dtdc"),
            2,
            key.clone(),
            AttemptOutcome::Recoverable {
                category: FailureCategory::Rejection,
                message: "pincode not serviceable".to_string(),
            },
        );
        assert_eq!(attempt.attempt_number(), 2);
        assert_eq!(attempt.idempotency_key(), &key);
        assert!(attempt.outcome().allows_fallback());
    }

    #[test]
    fn serde_tags_outcomes() {
        let retry = AttemptOutcome::Recoverable {
            category: FailureCategory::ServerError,
            message: "502".to_string(),
        };
        let json = serde_json::to_string(&retry).unwrap();
        assert!(json.contains("\"outcome\":\"RECOVERABLE\""));
        assert!(json.contains("SERVER_ERROR"));
    }
}
