//! # Weight and Dimensions
//!
//! Physical attributes of a shipment and the chargeable-weight rule.
//!
//! Carriers bill the greater of actual and volumetric weight. Volumetric
//! weight divides the parcel volume by a carrier-specific dimensional
//! factor, so the same parcel can be billed differently per provider.
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::value_objects::weight::{DimensionsCm, WeightKg};
//! use rust_decimal::Decimal;
//!
//! let actual = WeightKg::new(Decimal::new(42, 1)).unwrap(); // 4.2 kg
//! let dims = DimensionsCm::new(
//!     Decimal::new(30, 0),
//!     Decimal::new(20, 0),
//!     Decimal::new(10, 0),
//! ).unwrap();
//!
//! // 30*20*10 / 5000 = 1.2 kg volumetric; actual wins
//! let (chargeable, basis) = actual.chargeable(&dims, Decimal::new(5000, 0)).unwrap();
//! assert_eq!(chargeable.get(), Decimal::new(42, 1));
//! ```

use crate::domain::value_objects::arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic,
};
use crate::domain::value_objects::enums::WeightBasis;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strictly positive weight in kilograms.
///
/// Zero and negative weights are rejected at construction, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightKg(Decimal);

impl WeightKg {
    /// Creates a weight.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the value is zero or
    /// negative.
    pub fn new(value: Decimal) -> ArithmeticResult<Self> {
        if value <= Decimal::ZERO {
            return Err(ArithmeticError::InvalidValue("weight must be positive"));
        }
        Ok(Self(value))
    }

    /// Returns the underlying decimal value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Resolves the chargeable weight against a dimensional factor.
    ///
    /// Chargeable weight is `max(actual, volumetric)`; the returned basis
    /// records which side won, for audit display.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error if the dimensional factor is invalid.
    pub fn chargeable(
        &self,
        dimensions: &DimensionsCm,
        dim_factor: Decimal,
    ) -> ArithmeticResult<(Self, WeightBasis)> {
        let volumetric = dimensions.volumetric_weight(dim_factor)?;
        if volumetric > self.0 {
            Ok((Self(volumetric), WeightBasis::Volumetric))
        } else {
            Ok((*self, WeightBasis::Actual))
        }
    }
}

impl fmt::Display for WeightKg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kg", self.0)
    }
}

/// Parcel dimensions in centimetres.
///
/// # Invariants
///
/// - Every side is strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DimensionsCm {
    length: Decimal,
    width: Decimal,
    height: Decimal,
}

impl DimensionsCm {
    /// Creates parcel dimensions.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if any side is zero or
    /// negative.
    pub fn new(length: Decimal, width: Decimal, height: Decimal) -> ArithmeticResult<Self> {
        for side in [length, width, height] {
            if side <= Decimal::ZERO {
                return Err(ArithmeticError::InvalidValue(
                    "dimension sides must be positive",
                ));
            }
        }
        Ok(Self {
            length,
            width,
            height,
        })
    }

    /// Returns the length in centimetres.
    #[inline]
    #[must_use]
    pub fn length(&self) -> Decimal {
        self.length
    }

    /// Returns the width in centimetres.
    #[inline]
    #[must_use]
    pub fn width(&self) -> Decimal {
        self.width
    }

    /// Returns the height in centimetres.
    #[inline]
    #[must_use]
    pub fn height(&self) -> Decimal {
        self.height
    }

    /// Computes the volumetric weight for a carrier dimensional factor.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the factor is not
    /// strictly positive, or an overflow error on extreme inputs.
    pub fn volumetric_weight(&self, dim_factor: Decimal) -> ArithmeticResult<Decimal> {
        if dim_factor <= Decimal::ZERO {
            return Err(ArithmeticError::InvalidValue(
                "dimensional factor must be positive",
            ));
        }
        self.length
            .safe_mul(self.width)?
            .safe_mul(self.height)?
            .safe_div(dim_factor)
    }
}

impl fmt::Display for DimensionsCm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{} cm", self.length, self.width, self.height)
    }
}
