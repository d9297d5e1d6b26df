// ============================================================================
// Rounding Errors
// Error types for conversion, rounding and formatting operations
// ============================================================================

use std::fmt;

/// Errors that can occur anywhere in the rounding pipeline.
///
/// Every error is a logic or input-domain error; nothing is transient, so
/// nothing is retried and no partial result is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoundingError {
    /// No registry entry exists for the named type
    UnsupportedType(String),
    /// The value passed under a type tag is not of that type
    TypeMismatch {
        /// Tag under which the value was submitted
        expected: String,
    },
    /// Infinity or NaN has no rounded decimal representation
    NonFiniteValue,
    /// Rounded value exceeds the target type's range
    Overflow,
    /// Target type cannot hold the rounded digits exactly
    PrecisionLoss,
    /// Type tag already registered
    DuplicateType(String),
    /// Unrecognised rounding-mode tag
    InvalidMode(String),
    /// Precision policy cannot be applied
    InvalidPolicy(String),
    /// Target exponent too far from zero to compute with bounded digits
    ExponentOutOfRange(i64),
    /// Format specification could not be parsed
    InvalidFormatSpec(String),
    /// Configuration failed validation
    InvalidConfig(String),
    /// Text source is not a decimal literal
    InvalidLiteral(String),
}

impl fmt::Display for RoundingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingError::UnsupportedType(tag) => {
                write!(f, "unsupported type: no converter registered for '{}'", tag)
            },
            RoundingError::TypeMismatch { expected } => {
                write!(f, "type mismatch: value is not of type '{}'", expected)
            },
            RoundingError::NonFiniteValue => {
                write!(f, "non-finite value: infinities and NaNs cannot be rounded")
            },
            RoundingError::Overflow => {
                write!(f, "overflow: rounded value exceeds the target type's range")
            },
            RoundingError::PrecisionLoss => write!(
                f,
                "precision loss: target type cannot represent the rounded value exactly"
            ),
            RoundingError::DuplicateType(tag) => {
                write!(f, "duplicate type: '{}' is already registered", tag)
            },
            RoundingError::InvalidMode(mode) => write!(f, "invalid rounding mode: '{}'", mode),
            RoundingError::InvalidPolicy(reason) => {
                write!(f, "invalid precision policy: {}", reason)
            },
            RoundingError::ExponentOutOfRange(exponent) => {
                write!(f, "exponent out of range: {}", exponent)
            },
            RoundingError::InvalidFormatSpec(spec) => {
                write!(f, "invalid format specification: '{}'", spec)
            },
            RoundingError::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            RoundingError::InvalidLiteral(text) => {
                write!(f, "invalid literal: '{}' is not a decimal number", text)
            },
        }
    }
}

impl std::error::Error for RoundingError {}

/// Result type alias for rounding operations
pub type RoundingResult<T> = Result<T, RoundingError>;
