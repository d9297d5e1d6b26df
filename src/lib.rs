// ============================================================================
// Rounder Library
// Correctly rounded conversion of exact and inexact numbers to decimal
// ============================================================================

//! # Rounder
//!
//! Rounds values of any registered numeric type to a decimal place, under
//! any of twelve rounding modes, with a single provably correct rounding step.
//!
//! ## Features
//!
//! - **Exact inputs**: binary floats are read bit-exactly, never through
//!   their printed approximation, so `2.8_f64` floors to `2.7`
//! - **Twelve rounding modes**: six directed, six to-nearest with tie-breaks
//! - **Precision policies**: fixed exponent, significant digits, or both
//! - **Pluggable types**: `f64`, `f32`, `i64`, `BigInt`, `BigRational`,
//!   `rust_decimal::Decimal`, `BigDecimal` and decimal strings built in;
//!   other types register a converter pair
//! - **Format strings** with a rounding-mode letter (`".3Mf"`)
//!
//! ## Example
//!
//! ```rust
//! use rounder::prelude::*;
//!
//! // The double nearest 2.8 is just below it
//! let triple = rounder::round(&2.8f64, RoundingMode::Floor, PrecisionPolicy::FixedExponent(-1))
//!     .unwrap();
//! assert_eq!(triple.to_string(), "27e-1");
//!
//! // Ties to even, back to the source type
//! let rounded = rounder::round_value(
//!     &2.5f64,
//!     RoundingMode::NearestTiesToEven,
//!     PrecisionPolicy::FixedExponent(0),
//! )
//! .unwrap();
//! assert_eq!(rounded, 2.0);
//!
//! // Format with a floor-rounding mode letter
//! let text = rounder::format_value(&rust_decimal::Decimal::new(-4277, 4), ".3Mf").unwrap();
//! assert_eq!(text, "-0.428");
//! ```

pub mod domain;
pub mod engine;
pub mod format;
pub mod interfaces;
pub mod numeric;
pub mod registry;
pub mod utils;

pub use domain::{PrecisionPolicy, RoundingConfig, RoundingMode};
pub use engine::Rounder;
pub use numeric::{RoundedTriple, RoundingError, RoundingResult};

use interfaces::{RegisteredType, SourceConverter, TargetConverter, TypeTag};
use registry::TypeRegistry;
use std::any::Any;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        PrecisionPolicy, RoundingConfig, RoundingMode, DEFAULT_MAX_EXPONENT_MAGNITUDE,
    };
    pub use crate::engine::{create_from_config, round_quarters, Rounder, RounderBuilder};
    pub use crate::format::{parse_spec, render, FormatSpec, Notation, RenderStyle, SignStyle};
    pub use crate::interfaces::{
        tags, typed_source, typed_target, RegisteredType, SourceConverter, TargetConverter,
        TypeTag,
    };
    pub use crate::numeric::{
        ExactValue, Exactness, QuarterRepr, RoundedTriple, RoundingError, RoundingResult, Sign,
    };
    pub use crate::registry::TypeRegistry;
}

// ============================================================================
// Process-wide Entry Points
// Default configuration over the global registry
// ============================================================================

/// Round `value`, registered under `source_type`, to an exact triple.
pub fn round_to(
    value: &dyn Any,
    source_type: &TypeTag,
    mode: RoundingMode,
    policy: PrecisionPolicy,
) -> RoundingResult<RoundedTriple> {
    Rounder::global().round_to(value, source_type, mode, policy)
}

/// Round a value of a registered Rust type to an exact triple.
pub fn round<T: RegisteredType>(
    value: &T,
    mode: RoundingMode,
    policy: PrecisionPolicy,
) -> RoundingResult<RoundedTriple> {
    Rounder::global().round(value, mode, policy)
}

/// Convert a triple to the type registered under `target_type`.
pub fn format(
    triple: &RoundedTriple,
    target_type: &TypeTag,
) -> RoundingResult<Box<dyn Any + Send>> {
    Rounder::global().convert_from_triple(triple, target_type)
}

/// Convert a triple to `T`.
pub fn format_as<T: RegisteredType>(triple: &RoundedTriple) -> RoundingResult<T> {
    Rounder::global().format_as(triple)
}

/// Round a value and convert the result back to its own type.
pub fn round_value<T: RegisteredType>(
    value: &T,
    mode: RoundingMode,
    policy: PrecisionPolicy,
) -> RoundingResult<T> {
    Rounder::global().round_value(value, mode, policy)
}

/// Round to `places` digits after the decimal point.
pub fn round_to_places<T: RegisteredType>(
    value: &T,
    places: i32,
    mode: RoundingMode,
) -> RoundingResult<T> {
    Rounder::global().round_to_places(value, places, mode)
}

/// Round to `figures` significant digits.
pub fn round_to_figures<T: RegisteredType>(
    value: &T,
    figures: u32,
    mode: RoundingMode,
) -> RoundingResult<T> {
    Rounder::global().round_to_figures(value, figures, mode)
}

/// Round and render `value` under a format specification.
pub fn format_value<T: RegisteredType>(value: &T, spec: &str) -> RoundingResult<String> {
    Rounder::global().format_value(value, spec)
}

/// Register a numeric type with the global registry.
///
/// # Errors
/// Returns `DuplicateType` if `type_tag` is already registered.
pub fn register_type(
    type_tag: impl Into<TypeTag>,
    source: impl SourceConverter + 'static,
    target: impl TargetConverter + 'static,
) -> RoundingResult<()> {
    TypeRegistry::global().register(type_tag, source, target)
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use bigdecimal::BigDecimal;
    use num_bigint::{BigInt, BigUint};
    use num_rational::BigRational;
    use num_traits::One;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Arc;

    fn triple(sign: Sign, significand: u64, exponent: i32) -> RoundedTriple {
        RoundedTriple::new(sign, BigUint::from(significand), exponent)
    }

    fn assert_floats_identical(actual: f64, expected: f64) {
        assert_eq!(
            actual.to_bits(),
            expected.to_bits(),
            "{:?} is not identical to {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_halfway_scenarios() {
        let even = RoundingMode::NearestTiesToEven;
        let units = PrecisionPolicy::FixedExponent(0);
        assert_eq!(
            crate::round_to(&0.5f64, &tags::F64, even, units).unwrap(),
            triple(Sign::Positive, 0, 0)
        );
        assert_eq!(
            crate::round_to(&1.5f64, &tags::F64, even, units).unwrap(),
            triple(Sign::Positive, 2, 0)
        );
        assert_eq!(
            crate::round_to(&2.8f64, &tags::F64, RoundingMode::Floor, PrecisionPolicy::FixedExponent(-1))
                .unwrap(),
            triple(Sign::Positive, 27, -1)
        );
    }

    #[test]
    fn test_quarter_integers_against_std() {
        let units = PrecisionPolicy::FixedExponent(0);
        for k in -8i32..=8 {
            let x = f64::from(k) / 4.0;
            let round = |mode| crate::round_value(&x, mode, units).unwrap();

            assert_floats_identical(round(RoundingMode::Floor), x.floor());
            assert_floats_identical(round(RoundingMode::Ceiling), x.ceil());
            assert_floats_identical(round(RoundingMode::TowardZero), x.trunc());
            assert_floats_identical(
                round(RoundingMode::AwayFromZero),
                x.abs().ceil().copysign(x),
            );
            assert_floats_identical(round(RoundingMode::NearestTiesAwayFromZero), x.round());
            assert_floats_identical(round(RoundingMode::NearestTiesToEven), x.round_ties_even());
        }
    }

    #[test]
    fn test_negative_ties() {
        let units = PrecisionPolicy::FixedExponent(0);
        let cases = [
            (-2.5, RoundingMode::NearestTiesTowardZero, -2.0),
            (-2.5, RoundingMode::NearestTiesAwayFromZero, -3.0),
            (-2.5, RoundingMode::NearestTiesTowardPositive, -2.0),
            (-2.5, RoundingMode::NearestTiesTowardNegative, -3.0),
            (-2.5, RoundingMode::NearestTiesToEven, -2.0),
            (-2.5, RoundingMode::NearestTiesToOdd, -3.0),
            (-3.5, RoundingMode::NearestTiesTowardZero, -3.0),
            (-3.5, RoundingMode::NearestTiesAwayFromZero, -4.0),
            (-3.5, RoundingMode::NearestTiesTowardPositive, -3.0),
            (-3.5, RoundingMode::NearestTiesTowardNegative, -4.0),
            (-3.5, RoundingMode::NearestTiesToEven, -4.0),
            (-3.5, RoundingMode::NearestTiesToOdd, -3.0),
        ];
        for (value, mode, expected) in cases {
            let actual: f64 = crate::round_value(&value, mode, units).unwrap();
            assert_floats_identical(actual, expected);
        }
    }

    #[test]
    fn test_signed_zero_preserved() {
        let rounded: f64 = crate::round_value(
            &-0.4f64,
            RoundingMode::NearestTiesToEven,
            PrecisionPolicy::FixedExponent(0),
        )
        .unwrap();
        assert_floats_identical(rounded, -0.0);
    }

    #[test]
    fn test_hybrid_cap_on_smallest_subnormal() {
        let smallest = f64::from_bits(1);
        let capped = crate::round(
            &smallest,
            RoundingMode::NearestTiesToEven,
            PrecisionPolicy::Hybrid(17, -324),
        )
        .unwrap();
        assert_eq!(capped, triple(Sign::Positive, 5, -324));

        let uncapped = crate::round(
            &smallest,
            RoundingMode::NearestTiesToEven,
            PrecisionPolicy::SignificantDigits(17),
        )
        .unwrap();
        assert_eq!(uncapped.exponent(), -340);
        assert_eq!(uncapped.digit_count(), 17);

        let back: f64 = crate::format_as(&capped).unwrap();
        assert_floats_identical(back, smallest);
    }

    #[test]
    fn test_round_finite_to_overflow() {
        for mode in RoundingMode::NEAREST {
            for value in [1.7e308f64, -1.7e308] {
                assert_eq!(
                    crate::round_value(&value, mode, PrecisionPolicy::FixedExponent(308)),
                    Err(RoundingError::Overflow)
                );
            }
        }
        for figures in 1..=3 {
            assert_eq!(
                crate::round_to_figures(&1.797e308f64, figures, RoundingMode::NearestTiesToEven),
                Err(RoundingError::Overflow)
            );
        }
    }

    #[test]
    fn test_special_floats_rejected() {
        for mode in RoundingMode::ALL {
            for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                assert_eq!(
                    crate::round(&value, mode, PrecisionPolicy::FixedExponent(0)),
                    Err(RoundingError::NonFiniteValue)
                );
            }
        }
    }

    #[test]
    fn test_round_integers() {
        let even = RoundingMode::NearestTiesToEven;
        let cases = [
            (1000, 123_456),
            (2, 123_456),
            (0, 123_456),
            (-1, 123_460),
            (-2, 123_500),
            (-3, 123_000),
            (-5, 100_000),
            (-6, 0),
            (-7, 0),
            (-1000, 0),
        ];
        for (places, expected) in cases {
            assert_eq!(
                crate::round_to_places(&123_456i64, places, even).unwrap(),
                expected,
                "places {}",
                places
            );
        }
    }

    #[test]
    fn test_round_huge_integers() {
        let huge = BigInt::from(2).pow(1025u32);
        let units = PrecisionPolicy::FixedExponent(0);
        assert_eq!(
            crate::round_value(&huge, RoundingMode::NearestTiesAwayFromZero, units).unwrap(),
            huge
        );
        assert_eq!(crate::round_value(&-&huge, RoundingMode::ToOdd, units).unwrap(), -&huge);

        let googol = BigInt::from(10).pow(100u32);
        for k in -10i32..10 {
            let value = &googol + k;
            for mode in RoundingMode::NEAREST {
                assert_eq!(crate::round_value(&value, mode, units).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_round_fractions() {
        let value = BigRational::new(10000.into(), 7.into());
        let decimal = |text: &str| -> BigRational {
            let parsed = BigDecimal::from_str(text).unwrap();
            let (digits, scale) = parsed.as_bigint_and_exponent();
            BigRational::new(digits, BigInt::from(10).pow(scale as u32))
        };

        let even = RoundingMode::NearestTiesToEven;
        let zero = RoundingMode::TowardZero;
        let cases = [
            (even, -1000, "0"),
            (even, -2, "1400"),
            (even, -1, "1430"),
            (even, 0, "1429"),
            (even, 1, "1428.6"),
            (even, 2, "1428.57"),
            (zero, -2, "1400"),
            (zero, -1, "1420"),
            (zero, 0, "1428"),
            (zero, 1, "1428.5"),
            (zero, 2, "1428.57"),
            (zero, 3, "1428.571"),
            (zero, 50, "1428.57142857142857142857142857142857142857142857142857"),
        ];
        for (mode, places, expected) in cases {
            assert_eq!(
                crate::round_to_places(&value, places, mode).unwrap(),
                decimal(expected),
                "{} at {} places",
                mode,
                places
            );
        }

        let half = BigRational::new(1.into(), 2.into());
        let units = PrecisionPolicy::FixedExponent(0);
        assert_eq!(crate::round_value(&half, RoundingMode::NearestTiesToEven, units).unwrap(), BigRational::from_integer(0.into()));
        assert_eq!(
            crate::round_value(&half, RoundingMode::NearestTiesAwayFromZero, units).unwrap(),
            BigRational::one()
        );
        let minus_three_halves = BigRational::new((-3).into(), 2.into());
        assert_eq!(
            crate::round_value(&minus_three_halves, RoundingMode::NearestTiesToEven, units).unwrap(),
            BigRational::from_integer((-2).into())
        );
    }

    #[test]
    fn test_round_to_figures_floats() {
        let even = RoundingMode::NearestTiesToEven;
        let cases = [
            (1, 1.0),
            (2, 1.2),
            (3, 1.23),
            (4, 1.235),
            (5, 1.2346),
            (6, 1.23456),
            (7, 1.23456),
            (8, 1.23456),
            (2000, 1.23456),
        ];
        for (figures, expected) in cases {
            let actual = crate::round_to_figures(&1.23456f64, figures, even).unwrap();
            assert_floats_identical(actual, expected);
        }
        assert_floats_identical(crate::round_to_figures(&-1.23456f64, 3, even).unwrap(), -1.23);
        assert_floats_identical(
            crate::round_to_figures(&123_456.0f64, 3, even).unwrap(),
            123_000.0,
        );
        assert!(matches!(
            crate::round_to_figures(&1.23456f64, 0, even),
            Err(RoundingError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn test_round_to_figures_modes() {
        use RoundingMode::*;
        let cases = [
            (1.25, NearestTiesToEven, 1.2),
            (1.75, NearestTiesToEven, 1.8),
            (-1.25, NearestTiesToEven, -1.2),
            (-1.75, NearestTiesToEven, -1.8),
            (1.25, NearestTiesToOdd, 1.3),
            (1.75, NearestTiesToOdd, 1.7),
            (-1.25, NearestTiesToOdd, -1.3),
            (-1.75, NearestTiesToOdd, -1.7),
            (1.25, NearestTiesAwayFromZero, 1.3),
            (-1.75, NearestTiesAwayFromZero, -1.8),
            (1.25, NearestTiesTowardZero, 1.2),
            (-1.75, NearestTiesTowardZero, -1.7),
            (1.25, NearestTiesTowardPositive, 1.3),
            (-1.25, NearestTiesTowardPositive, -1.2),
            (1.25, NearestTiesTowardNegative, 1.2),
            (-1.25, NearestTiesTowardNegative, -1.3),
        ];
        for (value, mode, expected) in cases {
            let actual = crate::round_to_figures(&value, 2, mode).unwrap();
            assert_floats_identical(actual, expected);
        }
    }

    #[test]
    fn test_round_to_figures_decade_extremes() {
        // Smallest and largest double of each decade
        let even = RoundingMode::NearestTiesToEven;
        for decade in -300i32..300 {
            let low = 10f64.powi(decade);
            let candidates = [low, f64::from_bits(low.to_bits() - 1), f64::from_bits(low.to_bits() + 1)];
            for x in candidates {
                for figures in [1u32, 7, 17] {
                    let triple = crate::round(&x, even, PrecisionPolicy::SignificantDigits(figures))
                        .unwrap();
                    assert_eq!(triple.digit_count(), figures, "{:e} to {} figures", x, figures);
                }
            }
        }
    }

    #[test]
    fn test_round_to_figures_ints() {
        let even = RoundingMode::NearestTiesToEven;
        let cases = [
            (1, 10_000),
            (2, 12_000),
            (3, 12_300),
            (4, 12_340),
            (5, 12_345),
            (6, 12_345),
            (7, 12_345),
            (2000, 12_345),
        ];
        for (figures, expected) in cases {
            assert_eq!(crate::round_to_figures(&12_345i64, figures, even).unwrap(), expected);
        }
    }

    #[test]
    fn test_round_to_figures_decimals() {
        let even = RoundingMode::NearestTiesToEven;
        let decimal = |text: &str| Decimal::from_str(text).unwrap();
        let cases = [("1.25", 2, "1.2"), ("1.25", 3, "1.25"), ("1.25", 4, "1.250"), ("9.9999", 4, "10.00")];
        for (value, figures, expected) in cases {
            let actual = crate::round_to_figures(&decimal(value), figures, even).unwrap();
            assert_eq!(actual.to_string(), expected);
        }

        let big = BigDecimal::from_str("1e9999").unwrap();
        let rounded = crate::round_to_figures(&big, 4, even).unwrap();
        assert_eq!(rounded, BigDecimal::from_str("1.000e9999").unwrap());

        let ones = "1".repeat(100);
        let value = BigDecimal::from_str(&ones).unwrap();
        assert_eq!(crate::round_to_figures(&value, 100, even).unwrap(), value);
    }

    #[test]
    fn test_carry_across_decade() {
        let even = RoundingMode::NearestTiesToEven;
        let value = Decimal::from_str("9.995").unwrap();
        let figures = crate::round(&value, even, PrecisionPolicy::SignificantDigits(3)).unwrap();
        assert_eq!(figures, triple(Sign::Positive, 100, -1));
        assert_eq!(crate::format_value(&value, ".2f").unwrap(), "10.00");
        assert_eq!(crate::format_value(&value, ".2e").unwrap(), "1.00e+01");
    }

    #[test]
    fn test_float_repr_on_values_below_any_double() {
        let even = RoundingMode::NearestTiesToEven;
        let policy = RoundingConfig::float_repr().policy;

        let tiny = BigDecimal::from_str("1e-200000").unwrap();
        assert_eq!(crate::round(&tiny, even, policy).unwrap(), RoundedTriple::zero(-324));

        let negative = "-2.5e-400000".to_string();
        let rounded = crate::round(&negative, RoundingMode::Floor, policy).unwrap();
        assert_eq!(rounded, triple(Sign::Negative, 1, -324));
        // 1e-324 is under half the smallest subnormal
        let back = crate::format_as::<f64>(&rounded).unwrap();
        assert_eq!(back, 0.0);
        assert!(back.is_sign_negative());
    }

    #[test]
    fn test_huge_decimal_exponents_rejected_up_front() {
        let floor = RoundingMode::Floor;
        for literal in ["1e30000000", "1e999999999", "-4.2e100002"] {
            assert!(
                matches!(
                    crate::round(&literal.to_string(), floor, PrecisionPolicy::FixedExponent(0)),
                    Err(RoundingError::ExponentOutOfRange(_))
                ),
                "{}",
                literal
            );
        }
        assert_eq!(
            crate::round(&BigDecimal::from_str("1e30000000").unwrap(), floor, PrecisionPolicy::SignificantDigits(3)),
            Err(RoundingError::ExponentOutOfRange(30_000_000))
        );

        // Tiny values are cheap at any exponent in range
        let rounded = crate::round(&"1e-999999999".to_string(), floor, PrecisionPolicy::FixedExponent(0)).unwrap();
        assert_eq!(rounded, RoundedTriple::zero(0));
    }

    #[test]
    fn test_string_sources_and_targets() {
        let even = RoundingMode::NearestTiesToEven;
        // The decimal literal is an exact tie; the float below it is not
        let text = crate::round_to_places(&"2.675".to_string(), 2, even).unwrap();
        assert_eq!(text, "2.68");
        assert_floats_identical(crate::round_to_places(&2.675f64, 2, even).unwrap(), 2.67);

        let triple = crate::round_to(&"-12.5", &tags::STRING, even, PrecisionPolicy::FixedExponent(0))
            .unwrap();
        assert_eq!(triple, self::triple(Sign::Negative, 12, 0));

        assert!(matches!(
            crate::round(&"twelve".to_string(), even, PrecisionPolicy::FixedExponent(0)),
            Err(RoundingError::InvalidLiteral(_))
        ));
    }

    #[test]
    fn test_format_mode_letters() {
        let cases = [
            ("-0.4277", ".3Mf", "-0.428"),
            ("-0.4277", ".3Pf", "-0.427"),
            ("-0.4277", ".3Zf", "-0.427"),
            ("-0.4277", ".3Af", "-0.428"),
            ("-0.4277", ".3Ef", "-0.428"),
            ("-0.4277", ".3Of", "-0.427"),
            ("-0.4277", ".3mf", "-0.428"),
            ("-0.4277", ".3pf", "-0.428"),
            ("-0.4277", ".3zf", "-0.428"),
            ("-0.4277", ".3af", "-0.428"),
            ("-0.4277", ".3ef", "-0.428"),
            ("-0.4277", ".3of", "-0.428"),
            ("+0.4275", ".3Mf", "0.427"),
            ("+0.4275", ".3Pf", "0.428"),
            ("+0.4275", ".3Zf", "0.427"),
            ("+0.4275", ".3Af", "0.428"),
            ("+0.4275", ".3Ef", "0.428"),
            ("+0.4275", ".3Of", "0.427"),
            ("+0.4275", ".3mf", "0.427"),
            ("+0.4275", ".3pf", "0.428"),
            ("+0.4275", ".3zf", "0.427"),
            ("+0.4275", ".3af", "0.428"),
            ("+0.4275", ".3ef", "0.428"),
            ("+0.4275", ".3of", "0.427"),
            ("+0.4285", ".3Mf", "0.428"),
            ("+0.4285", ".3Pf", "0.429"),
            ("+0.4285", ".3Ef", "0.428"),
            ("+0.4285", ".3Of", "0.429"),
            ("+0.4285", ".3ef", "0.428"),
            ("+0.4285", ".3of", "0.429"),
            ("+0.4287", ".3Mf", "0.428"),
            ("+0.4287", ".3Ef", "0.428"),
            ("+0.4287", ".3Of", "0.429"),
            ("+0.4287", ".3mf", "0.429"),
            ("+0.4287", ".3zf", "0.429"),
        ];
        for (value, spec, expected) in cases {
            assert_eq!(
                crate::format_value(&value.to_string(), spec).unwrap(),
                expected,
                "{} formatted with {}",
                value,
                spec
            );
        }
    }

    #[test]
    fn test_format_fractions() {
        let value = BigRational::new(3.into(), 7.into());
        assert_eq!(crate::format_value(&value, ".3f").unwrap(), "0.429");
        assert_eq!(crate::format_value(&value, ".4f").unwrap(), "0.4286");
        assert_eq!(crate::format_value(&value, ".5f").unwrap(), "0.42857");
    }

    #[test]
    fn test_format_to_dynamic_target() {
        let triple = triple(Sign::Negative, 15, -1);
        let boxed = crate::format(&triple, &tags::F64).unwrap();
        assert_eq!(boxed.downcast_ref::<f64>(), Some(&-1.5));
        assert!(matches!(
            crate::format(&triple, &TypeTag::new("missing")),
            Err(RoundingError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_f32_round_trip() {
        let even = RoundingMode::NearestTiesToEven;
        let rounded = crate::round_to_figures(&0.1f32, 3, even).unwrap();
        assert_eq!(rounded, 0.1f32);
        let triple = crate::round(&0.1f32, even, PrecisionPolicy::SignificantDigits(12)).unwrap();
        // The float nearest 0.1 is 0.100000001490116119384765625
        assert_eq!(triple, self::triple(Sign::Positive, 100_000_001_490, -12));
    }

    /// Amount of money stored as an integer number of cents.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Cents(i64);

    impl RegisteredType for Cents {
        const TAG: TypeTag = TypeTag::from_static("cents");
    }

    #[test]
    fn test_user_type_registration() {
        let registry = Arc::new(TypeRegistry::with_builtins());
        registry
            .register_type::<Cents>(
                typed_source(|value: &Cents, exponent| {
                    let sign = Sign::from_negative(value.0 < 0);
                    let exact = ExactValue::from_scaled(sign, value.0.unsigned_abs().into(), -2)?;
                    Ok(exact.to_quarters(exponent))
                }),
                typed_target(|triple: &RoundedTriple| {
                    let cents: i64 = Rounder::global().format_as::<i64>(&RoundedTriple::new(
                        triple.sign(),
                        triple.significand().clone(),
                        triple.exponent() + 2,
                    ))?;
                    Ok(Cents(cents))
                }),
            )
            .unwrap();

        let rounder = RounderBuilder::new().with_registry(registry).build().unwrap();
        let rounded = rounder
            .round_to_places(&Cents(-1_250), 0, RoundingMode::NearestTiesToEven)
            .unwrap();
        assert_eq!(rounded, Cents(-1_200));
        assert_eq!(rounder.format_value(&Cents(123_456), ",.1f").unwrap(), "1,234.6");

        // The global registry never saw it
        assert!(matches!(
            crate::round(&Cents(1), RoundingMode::Floor, PrecisionPolicy::FixedExponent(0)),
            Err(RoundingError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_global_registration_rejects_builtin_tags() {
        let err = crate::register_type(
            tags::F64,
            typed_source(|value: &f64, exponent| Ok(ExactValue::from_f64(*value)?.to_quarters(exponent))),
            typed_target(|triple: &RoundedTriple| Ok(triple.to_string())),
        )
        .unwrap_err();
        assert_eq!(err, RoundingError::DuplicateType("f64".to_string()));
    }
}
