// ============================================================================
// Converter Interfaces
// The two capabilities a numeric type registers: produce quarters, consume
// a rounded triple
// ============================================================================

use super::type_tag::TypeTag;
use crate::numeric::{QuarterRepr, RoundedTriple, RoundingError, RoundingResult};
use std::any::{type_name, Any};
use std::marker::PhantomData;

/// Places a value of one numeric type on the quarter grid of `10^exponent`.
///
/// Implementations must be exact: either the returned count is the exact
/// number of quarter-units, or it is the truncated count forced odd and
/// marked inexact (see [`QuarterRepr::from_truncated`]).
pub trait SourceConverter: Send + Sync {
    fn to_quarters(&self, value: &dyn Any, exponent: i32) -> RoundingResult<QuarterRepr>;

    /// Power of ten the value's digits are scaled by, for decimal types that
    /// carry an exponent apart from their digits (`1e300000` reports
    /// `300000`). Types without one report `None`.
    ///
    /// The rounder refuses values whose exponent exceeds its bound before
    /// placing them on any grid.
    fn decimal_exponent(&self, value: &dyn Any) -> RoundingResult<Option<i64>> {
        let _ = value;
        Ok(None)
    }
}

/// Rebuilds a value of one numeric type from an exact rounded triple.
pub trait TargetConverter: Send + Sync {
    fn from_triple(&self, triple: &RoundedTriple) -> RoundingResult<Box<dyn Any + Send>>;
}

impl<F> SourceConverter for F
where
    F: Fn(&dyn Any, i32) -> RoundingResult<QuarterRepr> + Send + Sync,
{
    fn to_quarters(&self, value: &dyn Any, exponent: i32) -> RoundingResult<QuarterRepr> {
        self(value, exponent)
    }
}

impl<F> TargetConverter for F
where
    F: Fn(&RoundedTriple) -> RoundingResult<Box<dyn Any + Send>> + Send + Sync,
{
    fn from_triple(&self, triple: &RoundedTriple) -> RoundingResult<Box<dyn Any + Send>> {
        self(triple)
    }
}

/// Associates a Rust type with the tag it is registered under, so typed entry
/// points can find its converters without an explicit tag.
pub trait RegisteredType: Any + Send + Sync {
    const TAG: TypeTag;
}

// ============================================================================
// Typed Adapters
// ============================================================================

/// Source converter written against a concrete type.
pub struct TypedSource<T, F> {
    convert: F,
    _marker: PhantomData<fn(&T)>,
}

impl<T, F> SourceConverter for TypedSource<T, F>
where
    T: Any,
    F: Fn(&T, i32) -> RoundingResult<QuarterRepr> + Send + Sync,
{
    fn to_quarters(&self, value: &dyn Any, exponent: i32) -> RoundingResult<QuarterRepr> {
        let value = value
            .downcast_ref::<T>()
            .ok_or_else(|| RoundingError::TypeMismatch {
                expected: type_name::<T>().to_string(),
            })?;
        (self.convert)(value, exponent)
    }
}

/// Target converter written against a concrete type.
pub struct TypedTarget<T, F> {
    convert: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> TargetConverter for TypedTarget<T, F>
where
    T: Any + Send,
    F: Fn(&RoundedTriple) -> RoundingResult<T> + Send + Sync,
{
    fn from_triple(&self, triple: &RoundedTriple) -> RoundingResult<Box<dyn Any + Send>> {
        let value = (self.convert)(triple)?;
        Ok(Box::new(value))
    }
}

/// Wrap a `Fn(&T, exponent)` as a [`SourceConverter`] that downcasts first.
///
/// # Example
/// ```
/// use rounder::interfaces::typed_source;
/// use rounder::numeric::{ExactValue, Sign};
///
/// let cents = typed_source(|value: &u64, exponent| {
///     Ok(ExactValue::from_scaled(Sign::Positive, (*value).into(), -2)?.to_quarters(exponent))
/// });
/// # let _ = cents;
/// ```
pub fn typed_source<T, F>(convert: F) -> TypedSource<T, F>
where
    T: Any,
    F: Fn(&T, i32) -> RoundingResult<QuarterRepr> + Send + Sync,
{
    TypedSource {
        convert,
        _marker: PhantomData,
    }
}

/// Wrap a `Fn(&RoundedTriple) -> T` as a [`TargetConverter`].
pub fn typed_target<T, F>(convert: F) -> TypedTarget<T, F>
where
    T: Any + Send,
    F: Fn(&RoundedTriple) -> RoundingResult<T> + Send + Sync,
{
    TypedTarget {
        convert,
        _marker: PhantomData,
    }
}
