// ============================================================================
// Numeric Module
// Exact intermediate representations for correctly-rounded conversion
// ============================================================================
//
// This module provides:
// - ExactValue: exact signed rational magnitude of any built-in source value
// - QuarterRepr: value on a grid four times finer than the rounding unit
// - RoundedTriple: exact (sign, significand, exponent) rounding result
// - RoundingError: error type shared by the whole pipeline
//
// Design principles:
// - No floating-point arithmetic on values; floats are decoded bit-exactly
// - All fallible operations return Result (no panics)
// - Exactness is an explicit field, never an implied low bit

mod errors;
mod exact;
mod quarters;
mod triple;

pub use errors::{RoundingError, RoundingResult};
pub use exact::{decimal_digits, pow10, ExactValue};
pub use quarters::{Exactness, QuarterRepr, Sign};
pub use triple::RoundedTriple;
