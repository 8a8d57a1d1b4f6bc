//! # Money Value Object
//!
//! Non-negative monetary amount with checked arithmetic.
//!
//! All billing amounts in the engine are [`Money`] values. Amounts are
//! carried at full decimal precision and rounded to the smallest currency
//! unit (two decimal places, half-up) wherever a charge component is
//! materialized, so computed totals match carrier billing exactly.
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::value_objects::money::Money;
//! use rust_decimal::Decimal;
//!
//! let freight = Money::from_major(120);
//! let fuel = freight.percent(Decimal::new(10, 0)).unwrap();
//! assert_eq!(fuel, Money::from_major(12));
//! ```

use crate::domain::value_objects::arithmetic::{
    ArithmeticError, ArithmeticResult, CheckedArithmetic,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A non-negative monetary amount.
///
/// # Invariants
///
/// - Never negative
/// - Arithmetic never panics; overflow and underflow surface as errors
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a monetary amount from a decimal value.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` if the value is negative.
    pub fn new(value: Decimal) -> ArithmeticResult<Self> {
        if value.is_sign_negative() {
            return Err(ArithmeticError::InvalidValue("amount must be non-negative"));
        }
        Ok(Self(value))
    }

    /// Creates an amount from whole currency units.
    #[must_use]
    pub fn from_major(units: u64) -> Self {
        Self(Decimal::from(units))
    }

    /// Creates an amount from minor currency units (e.g. paise).
    #[must_use]
    pub fn from_minor(units: u64) -> Self {
        Self(Decimal::new(units as i64, 2))
    }

    /// Returns the underlying decimal value.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Decimal {
        self.0
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds to the smallest currency unit (two decimal places, half-up).
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Adds another amount.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    pub fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        Ok(Self(self.0.safe_add(rhs.0)?))
    }

    /// Subtracts another amount.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would be negative.
    pub fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        let value = self.0.safe_sub(rhs.0)?;
        if value.is_sign_negative() {
            return Err(ArithmeticError::Underflow);
        }
        Ok(Self(value))
    }

    /// Multiplies by a non-negative decimal factor.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` for a negative factor and
    /// `ArithmeticError::Overflow` if the result would overflow.
    pub fn safe_mul(self, factor: Decimal) -> ArithmeticResult<Self> {
        if factor.is_sign_negative() {
            return Err(ArithmeticError::InvalidValue("factor must be non-negative"));
        }
        Ok(Self(self.0.safe_mul(factor)?))
    }

    /// Returns the given percentage of this amount, rounded to the
    /// smallest currency unit.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::InvalidValue` for a negative percentage.
    pub fn percent(self, percent: Decimal) -> ArithmeticResult<Self> {
        let factor = percent.safe_div(Decimal::ONE_HUNDRED)?;
        Ok(self.safe_mul(factor)?.rounded())
    }

    /// Splits the amount evenly in two so the halves sum exactly back.
    ///
    /// The first half is rounded to the smallest currency unit; the second
    /// half is the exact remainder. Used for intra-state tax splits, where
    /// the two components must reconstruct the combined amount to the paisa.
    ///
    /// # Errors
    ///
    /// Propagates arithmetic failures from the underlying operations.
    pub fn split_even(self) -> ArithmeticResult<(Self, Self)> {
        let first = Self(self.0.safe_div(Decimal::TWO)?).rounded();
        let second = self.safe_sub(first)?;
        Ok((first, second))
    }

    /// Returns the larger of two amounts.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self.0 >= other.0 { self } else { other }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
