//! # Checked Arithmetic
//!
//! Traits and utilities for safe arithmetic operations.
//!
//! This module provides:
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic operations
//! - [`WeightRounding`] - Enum for explicit weight rounding modes
//! - [`round_to_unit`] - Helper for rounding a value to a billing unit
//!
//! # Examples
//!
//! ```
//! use courier_quote::domain::value_objects::arithmetic::CheckedArithmetic;
//! use rust_decimal::Decimal;
//!
//! let a = Decimal::new(100, 0);
//! let b = Decimal::new(3, 0);
//! let result = a.safe_div(b);
//! assert!(result.is_ok());
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error type for arithmetic operations.
///
/// Represents failures that can occur during checked arithmetic,
/// including overflow, underflow, division by zero, and invalid values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Arithmetic operation resulted in overflow.
    #[error("arithmetic overflow")]
    Overflow,

    /// Arithmetic operation resulted in underflow.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division by zero attempted.
    #[error("division by zero")]
    DivisionByZero,

    /// Invalid value provided (e.g., negative when positive required).
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}

/// Result type for arithmetic operations.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Rounding mode for billed weight.
///
/// Rate cards bill over-slab weight in fixed unit steps (e.g. 0.5 kg).
/// The mode controls how a partial step is charged.
///
/// # Examples
///
/// ```
/// use courier_quote::domain::value_objects::arithmetic::{round_to_unit, WeightRounding};
/// use rust_decimal::Decimal;
///
/// let extra = Decimal::new(13, 1); // 1.3 kg
/// let unit = Decimal::new(5, 1);   // 0.5 kg steps
///
/// let up = round_to_unit(extra, unit, WeightRounding::Ceil).unwrap();
/// assert_eq!(up, Decimal::new(15, 1)); // 1.5 kg
///
/// let down = round_to_unit(extra, unit, WeightRounding::Floor).unwrap();
/// assert_eq!(down, Decimal::new(10, 1)); // 1.0 kg
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightRounding {
    /// Any non-zero remainder rounds up to the next unit.
    Ceil,
    /// Remainders are discarded.
    Floor,
    /// Round to the closest unit; exact midpoints round up.
    NearestHalfUp,
}

impl fmt::Display for WeightRounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ceil => write!(f, "ceil"),
            Self::Floor => write!(f, "floor"),
            Self::NearestHalfUp => write!(f, "nearest"),
        }
    }
}

/// Rounds `value` to a multiple of `unit` using the given mode.
///
/// # Arguments
///
/// * `value` - The value to round (must be non-negative)
/// * `unit` - The unit step (must be positive)
/// * `mode` - The rounding mode to apply
///
/// # Errors
///
/// Returns `ArithmeticError::DivisionByZero` if `unit` is zero and
/// `ArithmeticError::InvalidValue` if `value` or `unit` is negative.
///
/// # Examples
///
/// ```
/// use courier_quote::domain::value_objects::arithmetic::{round_to_unit, WeightRounding};
/// use rust_decimal::Decimal;
///
/// let result = round_to_unit(
///     Decimal::new(13, 1),
///     Decimal::new(5, 1),
///     WeightRounding::Ceil,
/// ).unwrap();
/// assert_eq!(result, Decimal::new(15, 1));
/// ```
pub fn round_to_unit(
    value: Decimal,
    unit: Decimal,
    mode: WeightRounding,
) -> ArithmeticResult<Decimal> {
    if unit.is_zero() {
        return Err(ArithmeticError::DivisionByZero);
    }
    if unit.is_sign_negative() {
        return Err(ArithmeticError::InvalidValue("unit must be positive"));
    }
    if value.is_sign_negative() {
        return Err(ArithmeticError::InvalidValue("value must be non-negative"));
    }

    let steps = value.safe_div(unit)?;
    let rounded_steps = match mode {
        WeightRounding::Ceil => steps.ceil(),
        WeightRounding::Floor => steps.floor(),
        WeightRounding::NearestHalfUp => {
            steps.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
    };

    rounded_steps.safe_mul(unit)
}

/// Trait for checked arithmetic operations.
///
/// Provides safe arithmetic methods that return `Result` instead of
/// panicking on overflow, underflow, or division by zero.
///
/// # Implementation Notes
///
/// Implementors should ensure that:
/// - No operation panics
/// - Overflow returns `Err(ArithmeticError::Overflow)`
/// - Underflow returns `Err(ArithmeticError::Underflow)`
/// - Division by zero returns `Err(ArithmeticError::DivisionByZero)`
pub trait CheckedArithmetic: Sized {
    /// Safely add two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely subtract two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Underflow` if the result would underflow.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely multiply two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::Overflow` if the result would overflow.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// Safely divide two values.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticError::DivisionByZero` if the divisor is zero.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}
