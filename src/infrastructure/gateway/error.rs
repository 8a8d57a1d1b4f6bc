//! # Gateway Errors
//!
//! Error types for carrier gateway operations.
//!
//! Recoverability drives the booking walk: a recoverable error lets the
//! orchestrator move to the next-ranked provider, a non-recoverable one
//! stops the attempt chain for that provider's class of fault.
//!
//! # Examples
//!
//! ```
//! use courier_quote::infrastructure::gateway::error::GatewayError;
//!
//! let error = GatewayError::timeout("no response after 10000ms");
//! assert!(error.is_recoverable());
//!
//! let error = GatewayError::invalid_request("missing consignee phone");
//! assert!(!error.is_recoverable());
//! ```

use crate::domain::entities::booking::FailureCategory;
use crate::domain::value_objects::ProviderId;
use thiserror::Error;

/// Error type for carrier gateway operations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The carrier did not respond within the deadline.
    #[error("carrier timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds, if known.
        timeout_ms: Option<u64>,
    },

    /// Network or connection failure.
    #[error("carrier connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The carrier explicitly declined the shipment.
    #[error("carrier rejected shipment: {message}")]
    Rejected {
        /// Error message.
        message: String,
        /// Carrier-specific rejection code.
        rejection_code: Option<String>,
    },

    /// The carrier answered with a server-side fault.
    #[error("carrier server error: {message}")]
    ServerError {
        /// Error message.
        message: String,
    },

    /// The lane is not serviceable by this carrier.
    #[error("carrier {provider} does not service this lane: {message}")]
    NotServiceable {
        /// The declining provider.
        provider: ProviderId,
        /// Error message.
        message: String,
    },

    /// The request was malformed from the carrier's perspective.
    #[error("carrier invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Live rate lookup is unsupported or failed.
    #[error("live rate unavailable: {message}")]
    LiveRateUnavailable {
        /// Error message.
        message: String,
    },

    /// Authentication with the carrier API failed.
    #[error("carrier authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },
}

impl GatewayError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a rejection error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            rejection_code: None,
        }
    }

    /// Creates a rejection error with a carrier code.
    #[must_use]
    pub fn rejected_with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            rejection_code: Some(code.into()),
        }
    }

    /// Creates a server error.
    #[must_use]
    pub fn server_error(message: impl Into<String>) -> Self {
        Self::ServerError {
            message: message.into(),
        }
    }

    /// Creates a not-serviceable error.
    #[must_use]
    pub fn not_serviceable(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::NotServiceable {
            provider,
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a live-rate unavailable error.
    #[must_use]
    pub fn live_rate_unavailable(message: impl Into<String>) -> Self {
        Self::LiveRateUnavailable {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Returns true if a booking walk may continue to another provider
    /// after this error.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. }
                | Self::Connection { .. }
                | Self::Rejected { .. }
                | Self::ServerError { .. }
                | Self::NotServiceable { .. }
        )
    }

    /// Maps the error into the attempt-audit failure category.
    #[must_use]
    pub fn failure_category(&self) -> FailureCategory {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => FailureCategory::Timeout,
            Self::Rejected { .. } | Self::NotServiceable { .. } => FailureCategory::Rejection,
            Self::ServerError { .. } | Self::LiveRateUnavailable { .. } => {
                FailureCategory::ServerError
            }
            Self::InvalidRequest { .. } | Self::Authentication { .. } => {
                FailureCategory::Configuration
            }
        }
    }

    /// Returns the carrier rejection code, if any.
    #[must_use]
    pub fn rejection_code(&self) -> Option<&str> {
        match self {
            Self::Rejected { rejection_code, .. } => rejection_code.as_deref(),
            _ => None,
        }
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;
