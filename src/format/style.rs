// ============================================================================
// Render Styles
// Digit-string presentation of an exact rounded triple
// ============================================================================
//
// Rendering never changes the value: every digit of the significand is kept,
// and the decimal point lands exactly where the exponent puts it. Styles only
// choose notation, sign display, digit grouping and how trailing zeros after
// the point are shown.

use crate::numeric::RoundedTriple;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Positional or exponent notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Notation {
    /// `1234.50`
    #[default]
    Fixed,
    /// `1.23450e+03`
    Scientific,
}

/// When a sign character is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SignStyle {
    /// Only `-`, for negative values (including negative zero)
    #[default]
    Negative,
    /// `+` or `-` always
    Always,
    /// A space for non-negative values, `-` otherwise
    Space,
}

/// Presentation options for [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderStyle {
    pub notation: Notation,
    pub sign: SignStyle,
    /// `E` instead of `e` in scientific notation
    pub uppercase_exponent: bool,
    /// Keep zeros at the end of the fractional part
    pub keep_trailing_zeros: bool,
    /// Write a decimal point even with no fractional digits
    pub force_decimal_point: bool,
    /// Thousands separator for the integer part
    pub grouping: Option<char>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            notation: Notation::Fixed,
            sign: SignStyle::Negative,
            uppercase_exponent: false,
            keep_trailing_zeros: true,
            force_decimal_point: false,
            grouping: None,
        }
    }
}

impl RenderStyle {
    pub fn scientific() -> Self {
        Self {
            notation: Notation::Scientific,
            ..Self::default()
        }
    }

    pub fn with_sign(mut self, sign: SignStyle) -> Self {
        self.sign = sign;
        self
    }

    pub fn with_grouping(mut self, separator: char) -> Self {
        self.grouping = Some(separator);
        self
    }

    pub fn trim_trailing_zeros(mut self) -> Self {
        self.keep_trailing_zeros = false;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase_exponent = true;
        self
    }

    /// The sign prefix for a value of the given sign.
    pub(crate) fn sign_prefix(&self, negative: bool) -> &'static str {
        match (negative, self.sign) {
            (true, _) => "-",
            (false, SignStyle::Negative) => "",
            (false, SignStyle::Always) => "+",
            (false, SignStyle::Space) => " ",
        }
    }
}

/// Render a triple as a digit string.
///
/// # Example
/// ```
/// use rounder::format::{render, RenderStyle};
/// use rounder::numeric::{RoundedTriple, Sign};
///
/// let triple = RoundedTriple::new(Sign::Negative, 4280u32.into(), -4);
/// assert_eq!(render(&triple, &RenderStyle::default()), "-0.4280");
/// assert_eq!(render(&triple, &RenderStyle::scientific()), "-4.280e-01");
/// ```
pub fn render(triple: &RoundedTriple, style: &RenderStyle) -> String {
    let body = match style.notation {
        Notation::Fixed => render_fixed(triple, style),
        Notation::Scientific => render_scientific(triple, style),
    };
    format!("{}{}", style.sign_prefix(triple.is_negative()), body)
}

/// Unsigned fixed-notation body.
fn render_fixed(triple: &RoundedTriple, style: &RenderStyle) -> String {
    let digits = triple.significand().to_string();
    let exponent = triple.exponent();

    let (integer, fraction) = if exponent >= 0 {
        let integer = if triple.is_zero() {
            digits
        } else {
            format!("{}{}", digits, "0".repeat(exponent as usize))
        };
        (integer, String::new())
    } else {
        let places = exponent.unsigned_abs() as usize;
        if digits.len() <= places {
            let padded = format!("{}{}", "0".repeat(places - digits.len()), digits);
            ("0".to_string(), padded)
        } else {
            let split = digits.len() - places;
            (digits[..split].to_string(), digits[split..].to_string())
        }
    };

    join_parts(&integer, &fraction, style)
}

/// Unsigned scientific-notation body: one digit before the point.
fn render_scientific(triple: &RoundedTriple, style: &RenderStyle) -> String {
    let digits = triple.significand().to_string();
    let (mantissa_integer, mantissa_fraction, adjusted) = if triple.is_zero() {
        // Zero keeps as many fractional zeros as places below the unit
        let places = if triple.exponent() < 0 {
            triple.exponent().unsigned_abs() as usize
        } else {
            0
        };
        ("0".to_string(), "0".repeat(places), 0i64)
    } else {
        (
            digits[..1].to_string(),
            digits[1..].to_string(),
            triple.adjusted_exponent(),
        )
    };

    let marker = if style.uppercase_exponent { 'E' } else { 'e' };
    let exponent_sign = if adjusted < 0 { '-' } else { '+' };
    format!(
        "{}{}{}{:02}",
        join_parts(&mantissa_integer, &mantissa_fraction, style),
        marker,
        exponent_sign,
        adjusted.unsigned_abs()
    )
}

fn join_parts(integer: &str, fraction: &str, style: &RenderStyle) -> String {
    let fraction = if style.keep_trailing_zeros {
        fraction
    } else {
        fraction.trim_end_matches('0')
    };
    let integer = match style.grouping {
        Some(separator) => group_digits(integer, separator),
        None => integer.to_string(),
    };

    if fraction.is_empty() {
        if style.force_decimal_point {
            format!("{}.", integer)
        } else {
            integer
        }
    } else {
        format!("{}.{}", integer, fraction)
    }
}

/// Insert `separator` between groups of three digits, counting from the right.
pub(crate) fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
