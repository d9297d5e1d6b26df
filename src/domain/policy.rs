// ============================================================================
// Precision Policies
// Which decimal place a value is rounded to
// ============================================================================

use crate::numeric::{RoundingError, RoundingResult};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selects the decimal exponent to round to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PrecisionPolicy {
    /// Round to a multiple of `10^e`
    FixedExponent(i32),

    /// Keep `n` significant digits (n >= 1)
    SignificantDigits(u32),

    /// Keep `n` significant digits but never round finer than `10^min_exponent`
    /// (e.g. `Hybrid(17, -324)` for shortest-safe binary64 output)
    Hybrid(u32, i32),
}

impl PrecisionPolicy {
    /// Round to `places` digits after the decimal point; negative `places`
    /// round to tens, hundreds and so on.
    #[inline]
    pub const fn decimal_places(places: i32) -> Self {
        PrecisionPolicy::FixedExponent(-places)
    }

    /// Number of significant figures the policy asks for, if any.
    #[inline]
    pub const fn figures(self) -> Option<u32> {
        match self {
            PrecisionPolicy::FixedExponent(_) => None,
            PrecisionPolicy::SignificantDigits(n) | PrecisionPolicy::Hybrid(n, _) => Some(n),
        }
    }

    /// Reject policies that cannot produce a result.
    ///
    /// # Errors
    /// Returns `InvalidPolicy` for zero significant digits.
    pub fn validate(self) -> RoundingResult<()> {
        match self.figures() {
            Some(0) => Err(RoundingError::InvalidPolicy(
                "significant digits must be at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl Default for PrecisionPolicy {
    fn default() -> Self {
        PrecisionPolicy::FixedExponent(0)
    }
}

impl fmt::Display for PrecisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecisionPolicy::FixedExponent(e) => write!(f, "fixed(1e{})", e),
            PrecisionPolicy::SignificantDigits(n) => write!(f, "significant({})", n),
            PrecisionPolicy::Hybrid(n, min) => write!(f, "hybrid({}, 1e{})", n, min),
        }
    }
}
