//! # Identifier Types
//!
//! Typed identifiers for entities and external references.
//!
//! UUID-backed ids identify engine-owned records (sessions, options,
//! shipments, rate cards). String-backed ids identify externally
//! configured parties (companies, carrier providers) and carrier-issued
//! artifacts (waybills).

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID (for reconstruction).
            #[must_use]
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Returns the underlying UUID.
            #[inline]
            #[must_use]
            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[inline]
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id! {
    /// Identifier of a quote session.
    SessionId
}

uuid_id! {
    /// Identifier of a single quote option inside a session.
    OptionId
}

uuid_id! {
    /// Identifier of a booked shipment.
    ShipmentId
}

uuid_id! {
    /// Identifier of a configured rate card.
    RateCardId
}

string_id! {
    /// Identifier of a shipping company (our customer).
    CompanyId
}

string_id! {
    /// Identifier of a carrier provider.
    ProviderId
}

string_id! {
    /// A carrier-issued air waybill number.
    ///
    /// Existence of a waybill marks the irreversible commitment point:
    /// once issued, no alternate-provider retry is permitted.
    Waybill
}

/// Idempotency key for a booking attempt.
///
/// Derived deterministically from `(session, option, attempt number)` so a
/// replayed attempt presents the same key to the carrier gateway and to
/// the wallet, and can never create a second shipment or a second debit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Derives the key for a booking attempt.
    #[must_use]
    pub fn derive(session: &SessionId, option: &OptionId, attempt_number: u32) -> Self {
        Self(format!("{session}:{option}:{attempt_number}"))
    }

    /// Returns the key as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the reference under which a reversal of this attempt's
    /// ledger debit is recorded.
    #[must_use]
    pub fn reversal_reference(&self) -> String {
        format!("{}:reversal", self.0)
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
