// ============================================================================
// Quarter Representation
// Exact value on a grid four times finer than the target rounding unit
// ============================================================================

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sign of a value. Zero carries a sign too, so `-0.0` survives the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    /// Sign from a "negative" flag.
    #[inline]
    pub const fn from_negative(negative: bool) -> Self {
        if negative {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        matches!(self, Sign::Negative)
    }

    /// The opposite sign.
    #[inline]
    pub const fn flip(self) -> Self {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// Whether a quarter count is the exact value or a round-to-odd stand-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Exactness {
    /// The value is exactly `quarter_count` quarter-units
    Exact,
    /// The value lies strictly between `quarter_count` and `quarter_count + 1`
    Inexact,
}

/// Magnitude `quarter_count * 10^exponent / 4` with a sign.
///
/// Invariant: an `Inexact` quarter count is always odd. Together with the
/// explicit exactness flag this keeps "below a tie", "on a tie" and "above a
/// tie" distinguishable for every rounding mode.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct QuarterRepr {
    sign: Sign,
    exponent: i32,
    quarter_count: BigUint,
    exactness: Exactness,
}

impl QuarterRepr {
    /// Create a quarter representation.
    ///
    /// An even count marked `Inexact` is moved up to the next odd count; both
    /// describe a value strictly inside the same quarter interval pair for
    /// rounding purposes.
    pub fn new(sign: Sign, exponent: i32, quarter_count: BigUint, exactness: Exactness) -> Self {
        let quarter_count = match exactness {
            Exactness::Inexact if quarter_count.is_even() => quarter_count + 1u32,
            _ => quarter_count,
        };
        Self {
            sign,
            exponent,
            quarter_count,
            exactness,
        }
    }

    /// Build from a truncated quotient, applying round-to-odd when a nonzero
    /// remainder was discarded.
    pub fn from_truncated(
        sign: Sign,
        exponent: i32,
        truncated: BigUint,
        remainder_is_zero: bool,
    ) -> Self {
        let exactness = if remainder_is_zero {
            Exactness::Exact
        } else {
            Exactness::Inexact
        };
        Self::new(sign, exponent, truncated, exactness)
    }

    /// Exact representation of `units * 10^exponent`.
    pub fn from_units(sign: Sign, exponent: i32, units: BigUint) -> Self {
        Self::new(sign, exponent, units << 2u32, Exactness::Exact)
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    #[inline]
    pub fn quarter_count(&self) -> &BigUint {
        &self.quarter_count
    }

    #[inline]
    pub fn exactness(&self) -> Exactness {
        self.exactness
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        self.exactness == Exactness::Exact
    }

    /// True only for an exact zero.
    pub fn is_zero(&self) -> bool {
        self.is_exact() && self.quarter_count.is_zero()
    }

    /// Whole units of `10^exponent` below the value (`quarter_count div 4`).
    pub fn unit(&self) -> BigUint {
        &self.quarter_count >> 2u32
    }

    /// Remaining quarter-units, 0..=3 (`quarter_count mod 4`).
    pub fn fraction(&self) -> u8 {
        let low = &self.quarter_count & BigUint::from(3u32);
        if low.is_zero() {
            0
        } else if low.is_one() {
            1
        } else if low == BigUint::from(2u32) {
            2
        } else {
            3
        }
    }
}

impl fmt::Debug for QuarterRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QuarterRepr({}{} quarters @ 1e{}, {:?})",
            if self.sign.is_negative() { "-" } else { "+" },
            self.quarter_count,
            self.exponent,
            self.exactness
        )
    }
}
