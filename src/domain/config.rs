// ============================================================================
// Rounding Configuration
// Default mode, precision policy and resource bounds for a Rounder
// ============================================================================

use super::mode::RoundingMode;
use super::policy::PrecisionPolicy;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest exponent magnitude accepted by default.
///
/// Bounds the size of the `10^|e|` factors built during conversion.
pub const DEFAULT_MAX_EXPONENT_MAGNITUDE: u32 = 100_000;

/// Largest exponent magnitude a configuration may allow at all.
pub const HARD_MAX_EXPONENT_MAGNITUDE: u32 = 10_000_000;

// ============================================================================
// Complete Rounding Configuration
// ============================================================================

/// Configuration for a rounding engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundingConfig {
    /// Mode used when a call does not name one
    pub mode: RoundingMode,

    /// Policy used when a call does not name one
    pub policy: PrecisionPolicy,

    /// Decade assigned to zero by significant-digit policies.
    /// With the default of 0, `SignificantDigits(n)` rounds zero at `10^(1-n)`.
    pub zero_decade: i32,

    /// Largest |exponent| the pipeline will compute with
    pub max_exponent_magnitude: u32,
}

impl RoundingConfig {
    /// Create a new configuration with required parameters
    pub fn new(mode: RoundingMode, policy: PrecisionPolicy) -> Self {
        Self {
            mode,
            policy,
            zero_decade: 0,
            max_exponent_magnitude: DEFAULT_MAX_EXPONENT_MAGNITUDE,
        }
    }

    /// Builder method: Set the decade used for zero
    pub fn with_zero_decade(mut self, decade: i32) -> Self {
        self.zero_decade = decade;
        self
    }

    /// Builder method: Set the exponent magnitude bound
    pub fn with_max_exponent_magnitude(mut self, magnitude: u32) -> Self {
        self.max_exponent_magnitude = magnitude;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_exponent_magnitude == 0 {
            return Err("Maximum exponent magnitude must be positive".to_string());
        }
        if self.max_exponent_magnitude > HARD_MAX_EXPONENT_MAGNITUDE {
            return Err(format!(
                "Maximum exponent magnitude cannot exceed {}",
                HARD_MAX_EXPONENT_MAGNITUDE
            ));
        }
        if self.zero_decade.unsigned_abs() > self.max_exponent_magnitude {
            return Err("Zero decade lies outside the exponent bound".to_string());
        }

        match self.policy {
            PrecisionPolicy::SignificantDigits(0) | PrecisionPolicy::Hybrid(0, _) => {
                return Err("Significant digits must be at least 1".to_string());
            }
            PrecisionPolicy::FixedExponent(e) | PrecisionPolicy::Hybrid(_, e) => {
                if e.unsigned_abs() > self.max_exponent_magnitude {
                    return Err(format!("Exponent {} lies outside the exponent bound", e));
                }
            }
            PrecisionPolicy::SignificantDigits(_) => {}
        }

        Ok(())
    }
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self::new(RoundingMode::NearestTiesToEven, PrecisionPolicy::FixedExponent(0))
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl RoundingConfig {
    /// Binary64 round-trip configuration
    /// - Round half to even
    /// - 17 significant digits, never finer than 1e-324
    pub fn float_repr() -> Self {
        Self::new(
            RoundingMode::NearestTiesToEven,
            PrecisionPolicy::Hybrid(17, -324),
        )
    }

    /// Currency configuration
    /// - Round half to even (banker's rounding)
    /// - Two decimal places
    pub fn currency() -> Self {
        Self::new(RoundingMode::NearestTiesToEven, PrecisionPolicy::decimal_places(2))
    }

    /// Significant-figures configuration
    /// - Round half to even
    /// - `figures` significant digits
    pub fn significant(figures: u32) -> Self {
        Self::new(
            RoundingMode::NearestTiesToEven,
            PrecisionPolicy::SignificantDigits(figures),
        )
    }
}
