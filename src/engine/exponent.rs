// ============================================================================
// Exponent Selection
// Decimal exponent to round to, from a precision policy and the value's
// exact magnitude
// ============================================================================
//
// The magnitude is found with the source converter itself rather than a
// logarithm: placing a value on the grid of 10^e yields floor(|v| / 10^e) as
// the unit count, and the digit count of that integer pins the leading decade
// exactly, including at powers of ten.

use crate::domain::PrecisionPolicy;
use crate::interfaces::SourceConverter;
use crate::numeric::{decimal_digits, RoundingError, RoundingResult};
use num_traits::Zero;
use std::any::Any;

/// Outcome of searching for a value's magnitude down to a floor exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Magnitude {
    Zero,
    Decade(i32),
    /// Nonzero, but below `10^floor`
    BelowFloor,
}

/// Exponent of the leading decimal digit of `value`, or `None` for zero.
///
/// Values of at least one are read off a single conversion at exponent 0.
/// Smaller values are tried at exponents -1, -2, -4, ... until a whole
/// unit appears, never going below `-max_magnitude`.
///
/// # Errors
/// Returns `ExponentOutOfRange` if the value is nonzero but smaller than
/// `10^-max_magnitude`, plus any error from the source converter.
pub fn decade(
    source: &dyn SourceConverter,
    value: &dyn Any,
    max_magnitude: u32,
) -> RoundingResult<Option<i32>> {
    let floor = -i64::from(max_magnitude);
    match search_decade(source, value, floor)? {
        Magnitude::Zero => Ok(None),
        Magnitude::Decade(found) => Ok(Some(found)),
        Magnitude::BelowFloor => Err(RoundingError::ExponentOutOfRange(floor - 1)),
    }
}

/// Exponent `value` is rounded at under `policy`, searching for its decade only
/// as deep as the policy needs.
///
/// Under `Hybrid(n, min)` every value whose leading decade lies below
/// `min + n - 1` rounds at `min`, so the search stops there and such values
/// are accepted however far below `10^-max_magnitude` they sit.
///
/// # Errors
/// Returns `InvalidPolicy` for a zero digit count, and `ExponentOutOfRange`
/// when the decade the policy needs lies below `10^-max_magnitude`.
pub fn policy_exponent(
    source: &dyn SourceConverter,
    value: &dyn Any,
    policy: PrecisionPolicy,
    zero_decade: i32,
    max_magnitude: u32,
) -> RoundingResult<i32> {
    policy.validate()?;
    match policy {
        PrecisionPolicy::FixedExponent(exponent) => Ok(exponent),
        PrecisionPolicy::SignificantDigits(_) => {
            select_exponent(decade(source, value, max_magnitude)?, policy, zero_decade)
        }
        PrecisionPolicy::Hybrid(figures, min_exponent) => {
            let bound = -i64::from(max_magnitude);
            let crossover = i64::from(min_exponent) + i64::from(figures) - 1;
            match search_decade(source, value, crossover.max(bound))? {
                Magnitude::Zero => select_exponent(None, policy, zero_decade),
                Magnitude::Decade(found) => select_exponent(Some(found), policy, zero_decade),
                Magnitude::BelowFloor if crossover >= bound => Ok(min_exponent),
                Magnitude::BelowFloor => Err(RoundingError::ExponentOutOfRange(bound - 1)),
            }
        }
    }
}

fn search_decade(source: &dyn SourceConverter, value: &dyn Any, floor: i64) -> RoundingResult<Magnitude> {
    let quarters = source.to_quarters(value, 0)?;
    if quarters.is_zero() {
        return Ok(Magnitude::Zero);
    }
    let unit = quarters.unit();
    if !unit.is_zero() {
        return Ok(Magnitude::Decade(leading_decade(0, decimal_digits(&unit))));
    }
    if floor >= 0 {
        return Ok(Magnitude::BelowFloor);
    }

    let mut step: i64 = 1;
    loop {
        let exponent = (-step).max(floor);
        let exponent = i32::try_from(exponent)
            .map_err(|_| RoundingError::ExponentOutOfRange(exponent))?;
        let unit = source.to_quarters(value, exponent)?.unit();
        if !unit.is_zero() {
            let found = leading_decade(exponent, decimal_digits(&unit));
            tracing::trace!(exponent, decade = found, "located leading decade");
            return Ok(Magnitude::Decade(found));
        }
        if i64::from(exponent) <= floor {
            return Ok(Magnitude::BelowFloor);
        }
        step *= 2;
    }
}

#[inline]
fn leading_decade(exponent: i32, digits: u32) -> i32 {
    exponent + digits as i32 - 1
}

/// Exponent the value is rounded at under `policy`.
///
/// `decade` is the value's leading decade (`None` for zero); zero is treated
/// as lying in `zero_decade`.
///
/// # Errors
/// Returns `InvalidPolicy` for a zero digit count and `ExponentOutOfRange`
/// when the result does not fit an `i32`.
pub fn select_exponent(
    decade: Option<i32>,
    policy: PrecisionPolicy,
    zero_decade: i32,
) -> RoundingResult<i32> {
    policy.validate()?;
    match policy {
        PrecisionPolicy::FixedExponent(exponent) => Ok(exponent),
        PrecisionPolicy::SignificantDigits(figures) => {
            significant_exponent(decade.unwrap_or(zero_decade), figures)
        }
        PrecisionPolicy::Hybrid(figures, min_exponent) => {
            let exponent = significant_exponent(decade.unwrap_or(zero_decade), figures)?;
            Ok(exponent.max(min_exponent))
        }
    }
}

/// `decade - figures + 1`
fn significant_exponent(decade: i32, figures: u32) -> RoundingResult<i32> {
    let exponent = i64::from(decade) - i64::from(figures) + 1;
    i32::try_from(exponent).map_err(|_| RoundingError::ExponentOutOfRange(exponent))
}
