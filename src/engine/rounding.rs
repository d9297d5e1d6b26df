// ============================================================================
// Rounding Engine
// Reduces a quarter representation to an exact rounded triple
// ============================================================================
//
// With u = quarters div 4 and f = quarters mod 4 the value lies in
// [u, u + 1) units, and f together with the exactness flag says where:
//
//   f = 0, exact     on u, nothing to round
//   f = 0 / 1        below the midpoint (0 only when exact)
//   f = 2, exact     exactly halfway
//   f = 3            above the midpoint
//
// Inexact counts are always odd, so an inexact value can never look like a
// tie or like an exact unit.

use crate::domain::{Direction, RoundingMode};
use crate::numeric::{QuarterRepr, RoundedTriple};
use num_integer::Integer;

/// Where the value sits between its two candidate units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    OnUnit,
    BelowHalf,
    Half,
    AboveHalf,
}

impl Position {
    fn of(quarters: &QuarterRepr) -> Self {
        match (quarters.fraction(), quarters.is_exact()) {
            (0, true) => Position::OnUnit,
            (0, false) | (1, _) => Position::BelowHalf,
            (2, true) => Position::Half,
            // An inexact 2 cannot occur; it would already have been made odd
            _ => Position::AboveHalf,
        }
    }
}

/// Round a quarter representation under `mode`.
///
/// The result keeps the input's sign and exponent, so rounding a negative
/// value to zero yields a negative-signed zero.
///
/// # Example
/// ```
/// use num_bigint::BigUint;
/// use rounder::engine::round_quarters;
/// use rounder::numeric::{Exactness, QuarterRepr, Sign};
/// use rounder::RoundingMode;
///
/// // 1.5 at exponent 0 is exactly six quarters: a tie
/// let q = QuarterRepr::new(Sign::Positive, 0, BigUint::from(6u32), Exactness::Exact);
/// let even = round_quarters(&q, RoundingMode::NearestTiesToEven);
/// assert_eq!(even.significand(), &BigUint::from(2u32));
/// let truncated = round_quarters(&q, RoundingMode::TowardZero);
/// assert_eq!(truncated.significand(), &BigUint::from(1u32));
/// ```
pub fn round_quarters(quarters: &QuarterRepr, mode: RoundingMode) -> RoundedTriple {
    let unit = quarters.unit();
    let position = Position::of(quarters);

    let round_up = match position {
        Position::OnUnit => false,
        _ if !mode.is_nearest() => {
            breaks_up(mode.direction(), quarters.sign().is_negative(), unit.is_odd())
        }
        Position::BelowHalf => false,
        Position::AboveHalf => true,
        Position::Half => {
            breaks_up(mode.direction(), quarters.sign().is_negative(), unit.is_odd())
        }
    };

    let significand = if round_up { unit + 1u32 } else { unit };
    RoundedTriple::new(quarters.sign(), significand, quarters.exponent())
}

/// Whether `direction` moves the magnitude up to the next unit.
#[inline]
fn breaks_up(direction: Direction, negative: bool, unit_is_odd: bool) -> bool {
    match direction {
        Direction::TowardZero => false,
        Direction::AwayFromZero => true,
        Direction::Floor => negative,
        Direction::Ceiling => !negative,
        Direction::Even => unit_is_odd,
        Direction::Odd => !unit_is_odd,
    }
}
