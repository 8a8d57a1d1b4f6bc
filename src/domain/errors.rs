//! # Domain Errors
//!
//! Error types for pricing and rate card rule violations.
//!
//! Configuration errors (missing zone rule, slab gaps) are fatal and never
//! retried; the engine refuses to synthesize a default price. Validation
//! errors reject malformed input before any external call.

use crate::domain::value_objects::zone::Zone;
use crate::domain::value_objects::ArithmeticError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Error type for domain rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Shipment weight was zero or negative.
    #[error("weight must be positive, got {0} kg")]
    NonPositiveWeight(Decimal),

    /// A physical attribute failed validation.
    #[error("invalid physical attributes: {0}")]
    InvalidAttributes(String),

    /// The rate card has no rule set for the resolved zone.
    ///
    /// This is a configuration error: the card must be fixed, the price
    /// is never defaulted.
    #[error("rate card {card} has no rule for zone {zone}")]
    MissingZoneRule {
        /// The offending rate card id (display form).
        card: String,
        /// The zone that could not be resolved.
        zone: Zone,
    },

    /// No slab covers the chargeable weight and it does not exceed the
    /// last slab (a gap in the slab ladder).
    #[error("no slab covers {weight} kg in zone {zone} (slab gap)")]
    SlabGap {
        /// The zone whose ladder has the gap.
        zone: Zone,
        /// The uncovered chargeable weight.
        weight: Decimal,
    },

    /// A rate card failed structural validation.
    #[error("invalid rate card: {0}")]
    InvalidRateCard(String),

    /// Arithmetic failure inside a pricing formula.
    #[error("pricing arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Returns true if the error stems from rate configuration rather
    /// than the request. Configuration errors are fatal and never retried.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingZoneRule { .. } | Self::SlabGap { .. } | Self::InvalidRateCard(_)
        )
    }

    /// Returns true if the error rejects the caller's input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::NonPositiveWeight(_) | Self::InvalidAttributes(_))
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_classification() {
        let err = DomainError::MissingZoneRule {
            card: "rc-1".to_string(),
            zone: Zone::Metro,
        };
        assert!(err.is_configuration());
        assert!(!err.is_validation());

        let err = DomainError::SlabGap {
            zone: Zone::Local,
            weight: Decimal::new(75, 1),
        };
        assert!(err.is_configuration());
    }

    #[test]
    fn validation_classification() {
        let err = DomainError::NonPositiveWeight(Decimal::ZERO);
        assert!(err.is_validation());
        assert!(!err.is_configuration());
    }

    #[test]
    fn display_includes_detail() {
        let err = DomainError::SlabGap {
            zone: Zone::Regional,
            weight: Decimal::new(75, 1),
        };
        let text = err.to_string();
        assert!(text.contains("7.5"));
        assert!(text.contains("REGIONAL"));
    }
}
