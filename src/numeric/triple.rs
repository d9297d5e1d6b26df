// ============================================================================
// Rounded Triple
// Exact (sign, significand, exponent) result of a rounding operation
// ============================================================================

use super::exact::{decimal_digits, pow10};
use super::quarters::{QuarterRepr, Sign};
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::Zero;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The value `sign * significand * 10^exponent`.
///
/// # Example
/// ```
/// use rounder::numeric::{RoundedTriple, Sign};
///
/// let triple = RoundedTriple::new(Sign::Positive, 27u32.into(), -1);
/// assert_eq!(triple.to_string(), "27e-1");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundedTriple {
    sign: Sign,
    significand: BigUint,
    exponent: i32,
}

impl RoundedTriple {
    pub fn new(sign: Sign, significand: BigUint, exponent: i32) -> Self {
        Self {
            sign,
            significand,
            exponent,
        }
    }

    /// Positive zero at the given exponent.
    pub fn zero(exponent: i32) -> Self {
        Self::new(Sign::Positive, BigUint::zero(), exponent)
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn significand(&self) -> &BigUint {
        &self.significand
    }

    #[inline]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.significand.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    /// Number of decimal digits in the significand.
    pub fn digit_count(&self) -> u32 {
        decimal_digits(&self.significand)
    }

    /// Decimal exponent of the leading significand digit.
    pub fn adjusted_exponent(&self) -> i64 {
        i64::from(self.exponent) + i64::from(self.digit_count()) - 1
    }

    /// Undo a carry out of the top digit.
    ///
    /// Rounding `9.995` up to three figures yields significand `1000`; this
    /// rewrites it as `100` one place higher so the significand is back to
    /// `figures` digits. Triples that did not carry are returned unchanged.
    pub fn normalize_carry(self, figures: u32) -> Self {
        if figures > 0 && self.significand == pow10(figures) {
            Self::new(self.sign, pow10(figures - 1), self.exponent + 1)
        } else {
            self
        }
    }

    /// Split into sign, significand and exponent.
    pub fn into_parts(self) -> (Sign, BigUint, i32) {
        (self.sign, self.significand, self.exponent)
    }

    /// Exact value as a big rational (zero loses its sign).
    pub fn to_rational(&self) -> BigRational {
        let magnitude = BigInt::from(self.significand.clone());
        let magnitude = if self.sign.is_negative() {
            -magnitude
        } else {
            magnitude
        };
        let scale = BigInt::from(pow10(self.exponent.unsigned_abs()));
        if self.exponent >= 0 {
            BigRational::from_integer(magnitude * scale)
        } else {
            BigRational::new(magnitude, scale)
        }
    }
}

impl From<&RoundedTriple> for QuarterRepr {
    /// The triple is exact, so its quarter count is four times the significand.
    fn from(triple: &RoundedTriple) -> Self {
        QuarterRepr::from_units(triple.sign, triple.exponent, triple.significand.clone())
    }
}

impl fmt::Display for RoundedTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}e{}", self.significand, self.exponent)
    }
}

impl fmt::Debug for RoundedTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RoundedTriple({}, {}, {})",
            if self.sign.is_negative() { "-" } else { "+" },
            self.significand,
            self.exponent
        )
    }
}

impl Default for RoundedTriple {
    fn default() -> Self {
        Self::zero(0)
    }
}
