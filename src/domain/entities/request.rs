//! # Shipment Request
//!
//! The normalized quote/booking input: lane, physical attributes, and
//! payment terms for one parcel.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::enums::PaymentMode;
use crate::domain::value_objects::weight::{DimensionsCm, WeightKg};
use crate::domain::value_objects::zone::{PostalCode, Zone};
use crate::domain::value_objects::{CompanyId, Money};
use serde::{Deserialize, Serialize};

/// A request to price (and later book) one shipment.
///
/// All fields are validated value objects, so a constructed request is
/// structurally sound; [`validate`](Self::validate) checks the remaining
/// cross-field rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    company_id: CompanyId,
    origin: PostalCode,
    destination: PostalCode,
    weight: WeightKg,
    dimensions: DimensionsCm,
    payment_mode: PaymentMode,
    order_value: Money,
}

impl ShipmentRequest {
    /// Creates a shipment request.
    #[must_use]
    pub fn new(
        company_id: CompanyId,
        origin: PostalCode,
        destination: PostalCode,
        weight: WeightKg,
        dimensions: DimensionsCm,
        payment_mode: PaymentMode,
        order_value: Money,
    ) -> Self {
        Self {
            company_id,
            origin,
            destination,
            weight,
            dimensions,
            payment_mode,
            order_value,
        }
    }

    /// Returns the requesting company.
    #[inline]
    #[must_use]
    pub fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    /// Returns the pickup postal code.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &PostalCode {
        &self.origin
    }

    /// Returns the delivery postal code.
    #[inline]
    #[must_use]
    pub fn destination(&self) -> &PostalCode {
        &self.destination
    }

    /// Returns the declared actual weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> WeightKg {
        self.weight
    }

    /// Returns the parcel dimensions.
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> &DimensionsCm {
        &self.dimensions
    }

    /// Returns the payment mode.
    #[inline]
    #[must_use]
    pub fn payment_mode(&self) -> PaymentMode {
        self.payment_mode
    }

    /// Returns the declared order value.
    #[inline]
    #[must_use]
    pub fn order_value(&self) -> Money {
        self.order_value
    }

    /// Resolves the delivery zone for this lane.
    #[must_use]
    pub fn zone(&self) -> Zone {
        Zone::resolve(&self.origin, &self.destination)
    }

    /// Returns true if origin and destination share a state prefix.
    ///
    /// Decides the GST split: intra-state lanes bill CGST + SGST,
    /// inter-state lanes bill IGST.
    #[must_use]
    pub fn is_intra_state(&self) -> bool {
        self.origin.same_state(&self.destination)
    }

    /// Checks cross-field rules.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAttributes` for a COD shipment with a
    /// zero order value.
    pub fn validate(&self) -> DomainResult<()> {
        if self.payment_mode.is_cod() && self.order_value == Money::ZERO {
            return Err(DomainError::InvalidAttributes(
                "COD shipment requires a positive order value".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request(mode: PaymentMode, order_value: Money) -> ShipmentRequest {
        ShipmentRequest::new(
            CompanyId::new("acme"),
            PostalCode::new("110001").unwrap(),
            PostalCode::new("400001").unwrap(),
            WeightKg::new(Decimal::new(42, 1)).unwrap(),
            DimensionsCm::new(Decimal::new(30, 0), Decimal::new(20, 0), Decimal::new(10, 0))
                .unwrap(),
            mode,
            order_value,
        )
    }

    #[test]
    fn zone_resolution_uses_lane() {
        let req = request(PaymentMode::Prepaid, Money::ZERO);
        assert_eq!(req.zone(), Zone::Metro);
        assert!(!req.is_intra_state());
    }

    #[test]
    fn cod_requires_order_value() {
        assert!(request(PaymentMode::Cod, Money::ZERO).validate().is_err());
        assert!(request(PaymentMode::Cod, Money::from_major(2000))
            .validate()
            .is_ok());
        assert!(request(PaymentMode::Prepaid, Money::ZERO).validate().is_ok());
    }

    #[test]
    fn serde_roundtrip() {
        let req = request(PaymentMode::Cod, Money::from_major(1500));
        let json = serde_json::to_string(&req).unwrap();
        let back: ShipmentRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req, back);
    }
}
