// ============================================================================
// Exact Values
// Exact rational magnitudes and their conversion onto the quarter grid
// ============================================================================
//
// Every built-in source type is reduced to an ExactValue first:
// - binary floats become their exact dyadic value m * 2^k
// - decimals keep their digits and exponent apart, m * 10^s
// - integers and rationals map over directly
//
// From there a single division places the value on the quarter grid, with
// round-to-odd recording whether anything was discarded. The decimal
// exponent is only multiplied out against the target exponent, so a value
// far below the grid costs nothing to place.

use super::errors::{RoundingError, RoundingResult};
use super::quarters::{QuarterRepr, Sign};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Compute 10^n as a big integer.
pub fn pow10(n: u32) -> BigUint {
    BigUint::from(10u32).pow(n)
}

/// Number of decimal digits in `n` (zero has one digit).
pub fn decimal_digits(n: &BigUint) -> u32 {
    if n.is_zero() {
        return 1;
    }
    // bits * log10(2) lands on the digit count or one above it
    let mut digits = ((n.bits() as f64) * std::f64::consts::LOG10_2).floor() as u32 + 1;
    while *n >= pow10(digits) {
        digits += 1;
    }
    while digits > 1 && *n < pow10(digits - 1) {
        digits -= 1;
    }
    digits
}

/// An exact signed rational magnitude `sign * numer / denom * 10^exp10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactValue {
    sign: Sign,
    numer: BigUint,
    denom: BigUint,
    exp10: i32,
}

impl ExactValue {
    /// Create from a numerator and nonzero denominator.
    pub fn new(sign: Sign, numer: BigUint, denom: BigUint) -> Self {
        debug_assert!(!denom.is_zero(), "ExactValue denominator must be nonzero");
        Self {
            sign,
            numer,
            denom,
            exp10: 0,
        }
    }

    /// `sign * magnitude`.
    pub fn from_integer(sign: Sign, magnitude: BigUint) -> Self {
        Self::new(sign, magnitude, BigUint::one())
    }

    /// `sign * mantissa * 10^exp10`, without multiplying the power out.
    ///
    /// # Errors
    /// Returns `ExponentOutOfRange` if `exp10` does not fit an `i32`.
    pub fn from_scaled(sign: Sign, mantissa: BigUint, exp10: i64) -> RoundingResult<Self> {
        let exp10 = i32::try_from(exp10).map_err(|_| RoundingError::ExponentOutOfRange(exp10))?;
        Ok(Self {
            exp10,
            ..Self::from_integer(sign, mantissa)
        })
    }

    /// `sign * mantissa * 2^exp2`.
    pub fn from_dyadic(sign: Sign, mantissa: u64, exp2: i32) -> Self {
        let mantissa = BigUint::from(mantissa);
        if exp2 >= 0 {
            Self::from_integer(sign, mantissa << exp2.unsigned_abs())
        } else {
            Self::new(sign, mantissa, BigUint::one() << exp2.unsigned_abs())
        }
    }

    /// Exact value of a binary64 float.
    ///
    /// # Errors
    /// Returns `NonFiniteValue` for infinities and NaN.
    pub fn from_f64(value: f64) -> RoundingResult<Self> {
        if !value.is_finite() {
            return Err(RoundingError::NonFiniteValue);
        }
        let bits = value.to_bits();
        let sign = Sign::from_negative(bits >> 63 == 1);
        let biased = ((bits >> 52) & 0x7ff) as i32;
        let fraction = bits & ((1u64 << 52) - 1);
        Ok(if biased == 0 {
            Self::from_dyadic(sign, fraction, -1074)
        } else {
            Self::from_dyadic(sign, fraction | (1u64 << 52), biased - 1075)
        })
    }

    /// Exact value of a binary32 float.
    ///
    /// # Errors
    /// Returns `NonFiniteValue` for infinities and NaN.
    pub fn from_f32(value: f32) -> RoundingResult<Self> {
        if !value.is_finite() {
            return Err(RoundingError::NonFiniteValue);
        }
        let bits = value.to_bits();
        let sign = Sign::from_negative(bits >> 31 == 1);
        let biased = ((bits >> 23) & 0xff) as i32;
        let fraction = u64::from(bits & ((1u32 << 23) - 1));
        Ok(if biased == 0 {
            Self::from_dyadic(sign, fraction, -149)
        } else {
            Self::from_dyadic(sign, fraction | (1u64 << 23), biased - 150)
        })
    }

    pub fn from_bigint(value: &BigInt) -> Self {
        Self::from_integer(Sign::from_negative(value.is_negative()), value.magnitude().clone())
    }

    pub fn from_rational(value: &BigRational) -> Self {
        Self::new(
            Sign::from_negative(value.is_negative()),
            value.numer().magnitude().clone(),
            value.denom().magnitude().clone(),
        )
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// Power of ten the digits are scaled by; zero unless built with
    /// [`ExactValue::from_scaled`].
    #[inline]
    pub fn exp10(&self) -> i32 {
        self.exp10
    }

    /// Place the value on the quarter grid of `10^exponent`.
    ///
    /// Computes `|value| / (10^exponent / 4)`; a nonzero remainder forces the
    /// quotient odd and marks it inexact.
    pub fn to_quarters(&self, exponent: i32) -> QuarterRepr {
        // Both exponents are i32, so the shift always fits a u32 magnitude
        let shift = i64::from(self.exp10) - i64::from(exponent);
        let magnitude = shift.unsigned_abs() as u32;
        if self.numer.is_zero() {
            return QuarterRepr::from_truncated(self.sign, exponent, BigUint::zero(), true);
        }
        let numer = &self.numer << 2u32;

        if shift >= 0 {
            let (quotient, remainder) = (numer * pow10(magnitude)).div_rem(&self.denom);
            return QuarterRepr::from_truncated(self.sign, exponent, quotient, remainder.is_zero());
        }
        if digit_bound(&numer) <= u64::from(magnitude) {
            // 4 * numer < 10^-shift <= denom * 10^-shift: under one quarter
            return QuarterRepr::from_truncated(self.sign, exponent, BigUint::zero(), false);
        }
        let (quotient, remainder) = numer.div_rem(&(&self.denom * pow10(magnitude)));
        QuarterRepr::from_truncated(self.sign, exponent, quotient, remainder.is_zero())
    }

    /// The value as a signed big rational.
    pub fn to_rational(&self) -> BigRational {
        let scale = pow10(self.exp10.unsigned_abs());
        let (numer, denom) = if self.exp10 >= 0 {
            (&self.numer * scale, self.denom.clone())
        } else {
            (self.numer.clone(), &self.denom * scale)
        };
        let numer = BigInt::from(numer);
        let numer = if self.sign.is_negative() { -numer } else { numer };
        BigRational::new(numer, BigInt::from(denom))
    }
}

/// Upper bound on the decimal digit count of `n`, with one digit of slack
/// for the float estimate.
#[inline]
fn digit_bound(n: &BigUint) -> u64 {
    (n.bits() as f64 * std::f64::consts::LOG10_2) as u64 + 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Exactness;

    #[test]
    fn test_decimal_digits() {
        assert_eq!(decimal_digits(&BigUint::zero()), 1);
        assert_eq!(decimal_digits(&BigUint::from(9u32)), 1);
        assert_eq!(decimal_digits(&BigUint::from(10u32)), 2);
        assert_eq!(decimal_digits(&BigUint::from(99u32)), 2);
        assert_eq!(decimal_digits(&BigUint::from(100u32)), 3);
        assert_eq!(decimal_digits(&pow10(100)), 101);
        assert_eq!(decimal_digits(&(pow10(100) - 1u32)), 100);
    }

    #[test]
    fn test_f64_is_exact_binary_value() {
        // 2.8 is stored as 2.79999999999999982236431605997495353221893310546875
        let exact = ExactValue::from_f64(2.8).unwrap();
        let q = exact.to_quarters(-1);
        // 28 units would be 112 quarters; the true value sits just below
        assert_eq!(q.quarter_count(), &BigUint::from(111u32));
        assert_eq!(q.exactness(), Exactness::Inexact);
    }

    #[test]
    fn test_exact_quarters() {
        let exact = ExactValue::from_f64(1.25).unwrap();
        let q = exact.to_quarters(0);
        assert_eq!(q.quarter_count(), &BigUint::from(5u32));
        assert!(q.is_exact());

        let q = exact.to_quarters(-2);
        assert_eq!(q.quarter_count(), &BigUint::from(500u32));
        assert!(q.is_exact());
    }

    #[test]
    fn test_round_to_odd_on_inexact() {
        // 1/3 at exponent 0: 4/3 -> quotient 1, remainder nonzero
        let third = ExactValue::new(Sign::Positive, BigUint::one(), BigUint::from(3u32));
        let q = third.to_quarters(0);
        assert_eq!(q.quarter_count(), &BigUint::one());
        assert!(!q.is_exact());

        // 2/3 at exponent 0: 8/3 -> quotient 2 (even), forced to 3
        let two_thirds = ExactValue::new(Sign::Positive, BigUint::from(2u32), BigUint::from(3u32));
        let q = two_thirds.to_quarters(0);
        assert_eq!(q.quarter_count(), &BigUint::from(3u32));
        assert!(!q.is_exact());
    }

    #[test]
    fn test_positive_exponent() {
        let value = ExactValue::from_integer(Sign::Positive, BigUint::from(123_456u32));
        let q = value.to_quarters(2);
        // 123456 / 25 = 4938.24
        assert_eq!(q.quarter_count(), &BigUint::from(4939u32));
        assert!(!q.is_exact());
    }

    #[test]
    fn test_subnormal_and_signed_zero() {
        let tiny = ExactValue::from_f64(f64::from_bits(1)).unwrap();
        assert_eq!(tiny.denom, BigUint::one() << 1074u32);
        assert_eq!(tiny.numer, BigUint::one());

        let neg_zero = ExactValue::from_f64(-0.0).unwrap();
        assert!(neg_zero.is_zero());
        assert!(neg_zero.sign().is_negative());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(ExactValue::from_f64(f64::NAN), Err(RoundingError::NonFiniteValue));
        assert_eq!(ExactValue::from_f64(f64::INFINITY), Err(RoundingError::NonFiniteValue));
        assert_eq!(ExactValue::from_f32(f32::NEG_INFINITY), Err(RoundingError::NonFiniteValue));
    }

    #[test]
    fn test_f32_decoding() {
        let exact = ExactValue::from_f32(0.5).unwrap();
        assert_eq!(exact.to_rational(), BigRational::new(1.into(), 2.into()));
        let exact = ExactValue::from_f32(-3.0).unwrap();
        assert_eq!(exact.to_rational(), BigRational::from_integer((-3).into()));
    }

    #[test]
    fn test_from_scaled() {
        let value = ExactValue::from_scaled(Sign::Negative, BigUint::from(4277u32), -4).unwrap();
        assert_eq!(value.to_rational(), BigRational::new((-4277).into(), 10_000.into()));
        let value = ExactValue::from_scaled(Sign::Positive, BigUint::from(3u32), 2).unwrap();
        assert_eq!(value.to_rational(), BigRational::from_integer(300.into()));
        assert_eq!(value.exp10(), 2);

        assert_eq!(
            ExactValue::from_scaled(Sign::Positive, BigUint::one(), 1 << 40),
            Err(RoundingError::ExponentOutOfRange(1 << 40))
        );
    }

    #[test]
    fn test_scaled_quarters() {
        // 4277e-4 on the grid of 10^-3: 1710.8 quarters
        let value = ExactValue::from_scaled(Sign::Negative, BigUint::from(4277u32), -4).unwrap();
        let q = value.to_quarters(-3);
        assert_eq!(q.quarter_count(), &BigUint::from(1711u32));
        assert!(!q.is_exact());
        assert!(q.sign().is_negative());

        // 3e2 on the grid of 10^1: exactly 120 quarters
        let value = ExactValue::from_scaled(Sign::Positive, BigUint::from(3u32), 2).unwrap();
        let q = value.to_quarters(1);
        assert_eq!(q.quarter_count(), &BigUint::from(120u32));
        assert!(q.is_exact());
    }

    #[test]
    fn test_far_below_grid_is_inexact_zero() {
        // Placing these must not build 10^999999999
        let tiny = ExactValue::from_scaled(Sign::Positive, BigUint::from(999u32), -999_999_999).unwrap();
        let q = tiny.to_quarters(0);
        assert!(!q.is_zero());
        assert_eq!(q.unit(), BigUint::zero());
        assert_eq!(q.exactness(), Exactness::Inexact);

        let q = tiny.to_quarters(-1_000_000_001);
        assert_eq!(q.unit(), BigUint::from(99_900u32));
        assert!(q.is_exact());

        let zero = ExactValue::from_scaled(Sign::Negative, BigUint::zero(), -999_999_999).unwrap();
        assert!(zero.to_quarters(0).is_zero());
    }

    #[test]
    fn test_just_below_grid_boundary() {
        // 24e-2 = 0.96 quarters at exponent 0, 25e-2 = 1 quarter exactly
        let below = ExactValue::from_scaled(Sign::Positive, BigUint::from(24u32), -2).unwrap();
        let q = below.to_quarters(0);
        assert_eq!(q.quarter_count(), &BigUint::one());
        assert!(!q.is_exact());

        let exact = ExactValue::from_scaled(Sign::Positive, BigUint::from(25u32), -2).unwrap();
        let q = exact.to_quarters(0);
        assert_eq!(q.quarter_count(), &BigUint::one());
        assert!(q.is_exact());
    }
}
