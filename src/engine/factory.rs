// ============================================================================
// Rounder Factory
// Creates rounders with validated configuration
// ============================================================================

use crate::domain::{PrecisionPolicy, RoundingConfig, RoundingMode};
use crate::engine::Rounder;
use crate::numeric::RoundingResult;
use crate::registry::TypeRegistry;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a rounder from configuration
///
/// # Arguments
/// * `config` - Rounding configuration
/// * `registry` - Registry the rounder resolves type tags in
///
/// # Returns
/// * `RoundingResult<Rounder>` - Configured rounder or `InvalidConfig`
///
/// # Example
/// ```
/// use rounder::prelude::*;
/// use rounder::engine::factory::create_from_config;
///
/// let rounder = create_from_config(RoundingConfig::currency(), TypeRegistry::global()).unwrap();
/// assert_eq!(rounder.config().policy, PrecisionPolicy::FixedExponent(-2));
/// ```
pub fn create_from_config(
    config: RoundingConfig,
    registry: Arc<TypeRegistry>,
) -> RoundingResult<Rounder> {
    Rounder::new(config, registry)
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating rounders with fluent API
///
/// # Example
/// ```
/// use rounder::prelude::*;
/// use rounder::engine::factory::RounderBuilder;
///
/// let rounder = RounderBuilder::new()
///     .with_mode(RoundingMode::Floor)
///     .decimal_places(1)
///     .build()
///     .unwrap();
/// let triple = rounder.round_default(&2.8f64).unwrap();
/// assert_eq!(triple.to_string(), "27e-1");
/// ```
#[derive(Debug, Clone)]
pub struct RounderBuilder {
    config: RoundingConfig,
    registry: Option<Arc<TypeRegistry>>,
}

impl RounderBuilder {
    /// Create a new builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: RoundingConfig::default(),
            registry: None,
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: RoundingConfig) -> Self {
        Self {
            config,
            registry: None,
        }
    }

    // ========================================================================
    // Rounding Configuration
    // ========================================================================

    /// Set the default rounding mode
    pub fn with_mode(mut self, mode: RoundingMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Set the default precision policy
    pub fn with_policy(mut self, policy: PrecisionPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Round to `figures` significant digits by default
    pub fn significant_digits(self, figures: u32) -> Self {
        self.with_policy(PrecisionPolicy::SignificantDigits(figures))
    }

    /// Round to `places` digits after the decimal point by default
    pub fn decimal_places(self, places: i32) -> Self {
        self.with_policy(PrecisionPolicy::decimal_places(places))
    }

    /// Set the decade significant-digit policies assign to zero
    pub fn with_zero_decade(mut self, decade: i32) -> Self {
        self.config.zero_decade = decade;
        self
    }

    /// Set the largest exponent magnitude the rounder accepts
    pub fn with_max_exponent_magnitude(mut self, magnitude: u32) -> Self {
        self.config.max_exponent_magnitude = magnitude;
        self
    }

    // ========================================================================
    // Registry
    // ========================================================================

    /// Resolve types in `registry` instead of the global one
    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the rounder
    pub fn build(self) -> RoundingResult<Rounder> {
        let registry = self.registry.unwrap_or_else(TypeRegistry::global);
        create_from_config(self.config, registry)
    }
}

impl Default for RounderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
