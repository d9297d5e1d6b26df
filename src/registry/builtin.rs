// ============================================================================
// Built-in Numeric Types
// Converters preloaded into every registry built with `with_builtins`
// ============================================================================
//
// Sources reduce each value to its exact rational value (floats bit-exactly)
// and place it on the quarter grid. Targets rebuild a native value from the
// exact triple and refuse, rather than approximate, when the target cannot
// hold it:
// - f64 / f32: correctly rounded, Overflow past the finite range
// - i64 / BigInt: PrecisionLoss on discarded fractional digits
// - Decimal: Overflow past 96 bits, PrecisionLoss past scale 28
// - BigRational / BigDecimal / String: always exact
//
// BigDecimal and decimal literals keep their exponent apart from their
// digits and report it, so the rounder can refuse `1e999999999` before
// anything is multiplied out.

use super::type_registry::TypeRegistry;
use crate::format::{render, RenderStyle};
use crate::interfaces::{
    tags, typed_source, typed_target, RegisteredType, SourceConverter, TypeTag,
};
use crate::numeric::{
    pow10, ExactValue, QuarterRepr, RoundedTriple, RoundingError, RoundingResult, Sign,
};
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;
use std::any::Any;
use std::str::FromStr;

/// Largest scale a `rust_decimal::Decimal` supports.
const DECIMAL_MAX_SCALE: i32 = 28;

impl RegisteredType for f64 {
    const TAG: TypeTag = tags::F64;
}

impl RegisteredType for f32 {
    const TAG: TypeTag = tags::F32;
}

impl RegisteredType for i64 {
    const TAG: TypeTag = tags::I64;
}

impl RegisteredType for BigInt {
    const TAG: TypeTag = tags::BIG_INT;
}

impl RegisteredType for BigRational {
    const TAG: TypeTag = tags::RATIONAL;
}

impl RegisteredType for Decimal {
    const TAG: TypeTag = tags::DECIMAL;
}

impl RegisteredType for BigDecimal {
    const TAG: TypeTag = tags::BIG_DECIMAL;
}

impl RegisteredType for String {
    const TAG: TypeTag = tags::STRING;
}

/// Populate `registry` with the built-in types.
pub(crate) fn register_builtins(registry: &TypeRegistry) {
    let results = [
        registry.register_type::<f64>(
            typed_source(|value: &f64, exponent| Ok(ExactValue::from_f64(*value)?.to_quarters(exponent))),
            typed_target(|triple: &RoundedTriple| float_from_triple::<f64>(triple)),
        ),
        registry.register_type::<f32>(
            typed_source(|value: &f32, exponent| Ok(ExactValue::from_f32(*value)?.to_quarters(exponent))),
            typed_target(|triple: &RoundedTriple| float_from_triple::<f32>(triple)),
        ),
        registry.register_type::<i64>(
            typed_source(|value: &i64, exponent| {
                let exact = ExactValue::from_integer(
                    Sign::from_negative(*value < 0),
                    BigUint::from(value.unsigned_abs()),
                );
                Ok(exact.to_quarters(exponent))
            }),
            typed_target(|triple: &RoundedTriple| {
                integer_from_triple(triple)?
                    .to_i64()
                    .ok_or(RoundingError::Overflow)
            }),
        ),
        registry.register_type::<BigInt>(
            typed_source(|value: &BigInt, exponent| Ok(ExactValue::from_bigint(value).to_quarters(exponent))),
            typed_target(integer_from_triple),
        ),
        registry.register_type::<BigRational>(
            typed_source(|value: &BigRational, exponent| {
                Ok(ExactValue::from_rational(value).to_quarters(exponent))
            }),
            typed_target(|triple: &RoundedTriple| Ok(triple.to_rational())),
        ),
        registry.register_type::<Decimal>(
            typed_source(decimal_to_quarters),
            typed_target(decimal_from_triple),
        ),
        registry.register_type::<BigDecimal>(
            ScaledSource(|value: &dyn Any| {
                let value = value.downcast_ref::<BigDecimal>().ok_or_else(|| {
                    RoundingError::TypeMismatch {
                        expected: tags::BIG_DECIMAL.to_string(),
                    }
                })?;
                big_decimal_value(value)
            }),
            typed_target(big_decimal_from_triple),
        ),
        registry.register_type::<String>(
            ScaledSource(|value: &dyn Any| {
                if let Some(text) = value.downcast_ref::<String>() {
                    parse_literal(text)
                } else if let Some(text) = value.downcast_ref::<&'static str>() {
                    parse_literal(text)
                } else {
                    Err(RoundingError::TypeMismatch {
                        expected: tags::STRING.to_string(),
                    })
                }
            }),
            typed_target(|triple: &RoundedTriple| Ok(render(triple, &RenderStyle::default()))),
        ),
    ];

    for result in results {
        // Only reachable if a caller pre-registered a built-in tag
        if let Err(err) = result {
            tracing::warn!(error = %err, "built-in type not registered");
        }
    }
}

// ============================================================================
// Binary Floats
// ============================================================================

/// Correctly rounded (ties-to-even) float nearest the triple's exact value.
///
/// Goes through the standard library's decimal parser, which rounds exactly
/// once from the full digit string.
fn float_from_triple<F>(triple: &RoundedTriple) -> RoundingResult<F>
where
    F: FromStr + FloatLike,
{
    let literal = format!(
        "{}{}e{}",
        if triple.is_negative() { "-" } else { "" },
        triple.significand(),
        triple.exponent()
    );
    let value: F = literal.parse().map_err(|_| RoundingError::PrecisionLoss)?;
    if value.is_infinite() {
        return Err(RoundingError::Overflow);
    }
    Ok(value)
}

/// The bit of float behaviour `float_from_triple` needs.
trait FloatLike {
    fn is_infinite(&self) -> bool;
}

impl FloatLike for f64 {
    fn is_infinite(&self) -> bool {
        f64::is_infinite(*self)
    }
}

impl FloatLike for f32 {
    fn is_infinite(&self) -> bool {
        f32::is_infinite(*self)
    }
}

// ============================================================================
// Integers
// ============================================================================

/// The triple as an integer; fractional digits must all be zero.
fn integer_from_triple(triple: &RoundedTriple) -> RoundingResult<BigInt> {
    let magnitude = if triple.exponent() >= 0 {
        triple.significand() * pow10(triple.exponent().unsigned_abs())
    } else {
        let (quotient, remainder) = triple
            .significand()
            .div_rem(&pow10(triple.exponent().unsigned_abs()));
        if !remainder.is_zero() {
            return Err(RoundingError::PrecisionLoss);
        }
        quotient
    };
    let value = BigInt::from(magnitude);
    Ok(if triple.is_negative() { -value } else { value })
}

// ============================================================================
// rust_decimal::Decimal
// ============================================================================

fn decimal_to_quarters(value: &Decimal, exponent: i32) -> RoundingResult<QuarterRepr> {
    let mantissa = BigUint::from(value.mantissa().unsigned_abs());
    let exact = ExactValue::from_scaled(
        Sign::from_negative(value.is_sign_negative()),
        mantissa,
        -i64::from(value.scale()),
    )?;
    Ok(exact.to_quarters(exponent))
}

fn decimal_from_triple(triple: &RoundedTriple) -> RoundingResult<Decimal> {
    let (sign, mut significand, mut exponent) = triple.clone().into_parts();

    if exponent > 0 {
        if significand.is_zero() {
            exponent = 0;
        } else if exponent > DECIMAL_MAX_SCALE + 1 {
            return Err(RoundingError::Overflow);
        } else {
            significand *= pow10(exponent.unsigned_abs());
            exponent = 0;
        }
    }

    let ten = BigUint::from(10u32);
    while exponent < -DECIMAL_MAX_SCALE {
        let (quotient, remainder) = significand.div_rem(&ten);
        if !remainder.is_zero() {
            return Err(RoundingError::PrecisionLoss);
        }
        significand = quotient;
        exponent += 1;
    }

    // 96-bit mantissa
    if significand.bits() > 96 {
        return Err(RoundingError::Overflow);
    }
    let mantissa = significand.to_i128().ok_or(RoundingError::Overflow)?;
    let mut decimal = Decimal::try_from_i128_with_scale(mantissa, exponent.unsigned_abs())
        .map_err(|_| RoundingError::Overflow)?;
    decimal.set_sign_negative(sign.is_negative());
    Ok(decimal)
}

// ============================================================================
// Scaled Decimal Sources
// ============================================================================

/// Source for decimal types whose exponent is stored apart from the digits.
struct ScaledSource<F>(F);

impl<F> SourceConverter for ScaledSource<F>
where
    F: Fn(&dyn Any) -> RoundingResult<ExactValue> + Send + Sync,
{
    fn to_quarters(&self, value: &dyn Any, exponent: i32) -> RoundingResult<QuarterRepr> {
        Ok((self.0)(value)?.to_quarters(exponent))
    }

    fn decimal_exponent(&self, value: &dyn Any) -> RoundingResult<Option<i64>> {
        Ok(Some(i64::from((self.0)(value)?.exp10())))
    }
}

// ============================================================================
// bigdecimal::BigDecimal
// ============================================================================

fn big_decimal_value(value: &BigDecimal) -> RoundingResult<ExactValue> {
    let (digits, scale) = value.as_bigint_and_exponent();
    ExactValue::from_scaled(
        Sign::from_negative(digits.is_negative()),
        digits.magnitude().clone(),
        -scale,
    )
}

fn big_decimal_from_triple(triple: &RoundedTriple) -> RoundingResult<BigDecimal> {
    let digits = BigInt::from(triple.significand().clone());
    let digits = if triple.is_negative() { -digits } else { digits };
    Ok(BigDecimal::new(digits, -i64::from(triple.exponent())))
}

// ============================================================================
// Decimal Literals
// ============================================================================

/// Parse a decimal literal such as `-0.4277`, `+12` or `1.5e-3`.
///
/// The sign is read separately so `-0` keeps its sign.
fn parse_literal(literal: &str) -> RoundingResult<ExactValue> {
    let text = literal.trim();
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let lowered = unsigned.to_ascii_lowercase();
    if matches!(lowered.as_str(), "inf" | "infinity" | "nan") {
        return Err(RoundingError::NonFiniteValue);
    }
    if unsigned.is_empty() || unsigned.starts_with(&['+', '-'][..]) {
        return Err(RoundingError::InvalidLiteral(literal.to_string()));
    }

    let parsed = BigDecimal::from_str(unsigned)
        .map_err(|_| RoundingError::InvalidLiteral(literal.to_string()))?;
    let (digits, scale) = parsed.as_bigint_and_exponent();
    ExactValue::from_scaled(
        Sign::from_negative(negative),
        digits.magnitude().clone(),
        -scale,
    )
}
