// ============================================================================
// Rounder
// Source value -> exponent -> quarters -> rounded triple -> target value
// ============================================================================

use super::exponent::policy_exponent;
use super::rounding::round_quarters;
use crate::domain::{PrecisionPolicy, RoundingConfig, RoundingMode};
use crate::format::parse_spec;
use crate::interfaces::{RegisteredType, SourceConverter, TypeTag};
use crate::numeric::{QuarterRepr, RoundedTriple, RoundingError, RoundingResult};
use crate::registry::TypeRegistry;
use std::any::Any;
use std::sync::{Arc, OnceLock};

/// Rounding pipeline bound to a configuration and a type registry.
///
/// Every operation is a pure function of its arguments, the configuration
/// and the (append-only) registry, so a `Rounder` can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct Rounder {
    config: RoundingConfig,
    registry: Arc<TypeRegistry>,
}

static GLOBAL_ROUNDER: OnceLock<Rounder> = OnceLock::new();

impl Rounder {
    /// Create a rounder over `registry`.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn new(config: RoundingConfig, registry: Arc<TypeRegistry>) -> RoundingResult<Self> {
        config.validate().map_err(RoundingError::InvalidConfig)?;
        tracing::debug!(
            mode = %config.mode,
            policy = %config.policy,
            types = registry.len(),
            "created rounder"
        );
        Ok(Self { config, registry })
    }

    /// The process-wide rounder: default configuration over the global registry.
    pub fn global() -> &'static Rounder {
        GLOBAL_ROUNDER.get_or_init(|| Rounder {
            config: RoundingConfig::default(),
            registry: TypeRegistry::global(),
        })
    }

    #[inline]
    pub fn config(&self) -> &RoundingConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    // ========================================================================
    // Pipeline Stages
    // ========================================================================

    /// Place `value` on the quarter grid of `10^exponent`.
    ///
    /// # Errors
    /// `UnsupportedType` for an unregistered tag, `ExponentOutOfRange` when
    /// `exponent` or the value's own decimal exponent is past the configured
    /// bound, or the converter's own error.
    pub fn convert_to_quarters(
        &self,
        value: &dyn Any,
        source_type: &TypeTag,
        exponent: i32,
    ) -> RoundingResult<QuarterRepr> {
        self.check_exponent(exponent)?;
        let entry = self.registry.require(source_type)?;
        self.check_source(entry.source(), value)?;
        entry.source().to_quarters(value, exponent)
    }

    /// Exponent `value` is rounded at under `policy`.
    pub fn select_exponent(
        &self,
        value: &dyn Any,
        source_type: &TypeTag,
        policy: PrecisionPolicy,
    ) -> RoundingResult<i32> {
        let entry = self.registry.require(source_type)?;
        self.exponent_for(entry.source(), value, policy)
    }

    fn exponent_for(
        &self,
        source: &dyn SourceConverter,
        value: &dyn Any,
        policy: PrecisionPolicy,
    ) -> RoundingResult<i32> {
        self.check_source(source, value)?;
        let exponent = policy_exponent(
            source,
            value,
            policy,
            self.config.zero_decade,
            self.config.max_exponent_magnitude,
        )?;
        self.check_exponent(exponent)?;
        tracing::trace!(exponent, %policy, "selected exponent");
        Ok(exponent)
    }

    fn check_exponent(&self, exponent: i32) -> RoundingResult<()> {
        if exponent.unsigned_abs() > self.config.max_exponent_magnitude {
            return Err(RoundingError::ExponentOutOfRange(i64::from(exponent)));
        }
        Ok(())
    }

    /// Refuse decimal sources scaled past the bound; placing them on any grid
    /// in range would multiply out that many digits.
    fn check_source(&self, source: &dyn SourceConverter, value: &dyn Any) -> RoundingResult<()> {
        match source.decimal_exponent(value)? {
            Some(exp10) if exp10 > i64::from(self.config.max_exponent_magnitude) => {
                Err(RoundingError::ExponentOutOfRange(exp10))
            }
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Rounding
    // ========================================================================

    /// Round a value of the type registered under `source_type`.
    ///
    /// The value is read exactly, placed on the quarter grid of the selected
    /// exponent and rounded once. Under a significant-digit policy a carry
    /// out of the top digit (`9.995` to three figures) is renormalised so the
    /// significand keeps exactly `n` digits.
    pub fn round_to(
        &self,
        value: &dyn Any,
        source_type: &TypeTag,
        mode: RoundingMode,
        policy: PrecisionPolicy,
    ) -> RoundingResult<RoundedTriple> {
        let entry = self.registry.require(source_type)?;
        let exponent = self.exponent_for(entry.source(), value, policy)?;

        let quarters = entry.source().to_quarters(value, exponent)?;
        tracing::trace!(tag = %source_type, ?quarters, "converted to quarters");

        let triple = round_quarters(&quarters, mode);
        let triple = match policy.figures() {
            Some(figures) => triple.normalize_carry(figures),
            None => triple,
        };
        tracing::trace!(%mode, ?triple, "rounded");
        Ok(triple)
    }

    /// Typed form of [`Rounder::round_to`].
    pub fn round<T: RegisteredType>(
        &self,
        value: &T,
        mode: RoundingMode,
        policy: PrecisionPolicy,
    ) -> RoundingResult<RoundedTriple> {
        self.round_to(value, &T::TAG, mode, policy)
    }

    /// Round with the configured mode and policy.
    pub fn round_default<T: RegisteredType>(&self, value: &T) -> RoundingResult<RoundedTriple> {
        self.round(value, self.config.mode, self.config.policy)
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Convert a triple to the type registered under `target_type`.
    pub fn convert_from_triple(
        &self,
        triple: &RoundedTriple,
        target_type: &TypeTag,
    ) -> RoundingResult<Box<dyn Any + Send>> {
        let entry = self.registry.require(target_type)?;
        entry.target().from_triple(triple)
    }

    /// Convert a triple to `T`.
    pub fn format_as<T: RegisteredType>(&self, triple: &RoundedTriple) -> RoundingResult<T> {
        let boxed = self.convert_from_triple(triple, &T::TAG)?;
        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| RoundingError::TypeMismatch {
                expected: T::TAG.to_string(),
            })
    }

    /// Round a value and convert the result back to its own type.
    pub fn round_value<T: RegisteredType>(
        &self,
        value: &T,
        mode: RoundingMode,
        policy: PrecisionPolicy,
    ) -> RoundingResult<T> {
        let triple = self.round(value, mode, policy)?;
        self.format_as::<T>(&triple)
    }

    /// Round to `places` digits after the decimal point.
    pub fn round_to_places<T: RegisteredType>(
        &self,
        value: &T,
        places: i32,
        mode: RoundingMode,
    ) -> RoundingResult<T> {
        let policy = PrecisionPolicy::FixedExponent(places.checked_neg().ok_or_else(|| {
            RoundingError::ExponentOutOfRange(-i64::from(places))
        })?);
        self.round_value(value, mode, policy)
    }

    /// Round to `figures` significant digits.
    pub fn round_to_figures<T: RegisteredType>(
        &self,
        value: &T,
        figures: u32,
        mode: RoundingMode,
    ) -> RoundingResult<T> {
        self.round_value(value, mode, PrecisionPolicy::SignificantDigits(figures))
    }

    /// Round and render `value` under a format specification such as
    /// `".3Mf"` or `"+012,.2f"`.
    ///
    /// A mode letter in the spec overrides the configured mode.
    pub fn format_value<T: RegisteredType>(&self, value: &T, spec: &str) -> RoundingResult<String> {
        let spec = parse_spec(spec)?;
        let triple = self.round(value, spec.mode_or(self.config.mode), spec.policy())?;
        Ok(spec.render(&triple))
    }
}
