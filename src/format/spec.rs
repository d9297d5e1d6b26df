// ============================================================================
// Format Specifications
// Compact format strings with an optional rounding-mode letter
// ============================================================================
//
// Grammar:  [sign][0][width][grouping][.precision][mode][type]
//
//   sign       '-' | '+' | ' '
//   0          pad with zeros after the sign instead of spaces before it
//   width      minimum field width
//   grouping   ',' | '_'
//   precision  digits after the point (default 6)
//   mode       e o a z p m  -> nearest, ties to even/odd/away/zero/plus/minus
//              E O A Z P M  -> directed to even/odd/away/zero/ceiling/floor
//   type       'f' | 'F' fixed, 'e' | 'E' scientific, '%' percent
//
// A mode letter is only recognised in front of a type letter, so ".3e" is
// scientific with no mode and ".3ef" is fixed with ties-to-even.

use super::style::{group_digits, render, Notation, RenderStyle, SignStyle};
use crate::domain::{PrecisionPolicy, RoundingMode};
use crate::numeric::{RoundedTriple, RoundingError, RoundingResult};
use std::str::FromStr;

/// Precision used when the specification names none.
pub const DEFAULT_PRECISION: u32 = 6;

/// Presentation type of a format specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Fixed,
    Scientific { uppercase: bool },
    Percent,
}

/// A parsed format specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub sign: SignStyle,
    pub zero_pad: bool,
    pub width: usize,
    pub grouping: Option<char>,
    pub precision: u32,
    pub mode: Option<RoundingMode>,
    pub kind: FormatKind,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self {
            sign: SignStyle::Negative,
            zero_pad: false,
            width: 0,
            grouping: None,
            precision: DEFAULT_PRECISION,
            mode: None,
            kind: FormatKind::Fixed,
        }
    }
}

impl FormatSpec {
    /// Precision policy that yields exactly the digits this spec displays.
    pub fn policy(&self) -> PrecisionPolicy {
        let places = i32::try_from(self.precision).unwrap_or(i32::MAX);
        match self.kind {
            FormatKind::Fixed => PrecisionPolicy::FixedExponent(-places),
            FormatKind::Scientific { .. } => {
                PrecisionPolicy::SignificantDigits(self.precision.saturating_add(1))
            }
            // Rounding the value at 10^-(p+2) is rounding value*100 at 10^-p
            FormatKind::Percent => PrecisionPolicy::FixedExponent(-places.saturating_add(2)),
        }
    }

    /// Mode named in the spec, or `default` when none is.
    pub fn mode_or(&self, default: RoundingMode) -> RoundingMode {
        self.mode.unwrap_or(default)
    }

    /// Render a triple rounded under [`FormatSpec::policy`].
    pub fn render(&self, triple: &RoundedTriple) -> String {
        let style = RenderStyle {
            notation: match self.kind {
                FormatKind::Scientific { .. } => Notation::Scientific,
                FormatKind::Fixed | FormatKind::Percent => Notation::Fixed,
            },
            sign: self.sign,
            uppercase_exponent: matches!(self.kind, FormatKind::Scientific { uppercase: true }),
            keep_trailing_zeros: true,
            force_decimal_point: false,
            grouping: self.grouping,
        };

        let body = match self.kind {
            FormatKind::Percent => {
                let (sign, significand, exponent) = triple.clone().into_parts();
                let scaled = RoundedTriple::new(sign, significand, exponent + 2);
                format!("{}%", render(&scaled, &style))
            }
            _ => render(triple, &style),
        };

        self.pad(body, style.sign_prefix(triple.is_negative()))
    }

    fn pad(&self, body: String, prefix: &str) -> String {
        let len = body.chars().count();
        if len >= self.width {
            return body;
        }
        let fill = self.width - len;
        let unsigned = &body[prefix.len()..];
        match (self.zero_pad, self.grouping) {
            (false, _) => format!("{}{}", " ".repeat(fill), body),
            (true, None) => format!("{}{}{}", prefix, "0".repeat(fill), unsigned),
            (true, Some(separator)) => {
                // Padding zeros are grouped with the integer digits, and the
                // field may overrun by one rather than open on a separator
                let split = unsigned
                    .find(|c: char| !c.is_ascii_digit() && c != separator)
                    .unwrap_or(unsigned.len());
                let (integer, rest) = unsigned.split_at(split);
                let target = self
                    .width
                    .saturating_sub(prefix.chars().count() + rest.chars().count());

                let mut digits: String = integer.chars().filter(|&c| c != separator).collect();
                let mut grouped = group_digits(&digits, separator);
                while grouped.chars().count() < target {
                    digits.insert(0, '0');
                    grouped = group_digits(&digits, separator);
                }
                format!("{}{}{}", prefix, grouped, rest)
            }
        }
    }
}

impl FromStr for FormatSpec {
    type Err = RoundingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RoundingError::InvalidFormatSpec(s.to_string());
        let chars: Vec<char> = s.chars().collect();
        let mut pos = 0;
        let mut spec = FormatSpec::default();

        if let Some(&c) = chars.get(pos) {
            let sign = match c {
                '-' => Some(SignStyle::Negative),
                '+' => Some(SignStyle::Always),
                ' ' => Some(SignStyle::Space),
                _ => None,
            };
            if let Some(sign) = sign {
                spec.sign = sign;
                pos += 1;
            }
        }

        if chars.get(pos) == Some(&'0') {
            spec.zero_pad = true;
            pos += 1;
        }

        let (width, next) = take_number(&chars, pos).map_err(|_| invalid())?;
        if let Some(width) = width {
            spec.width = width as usize;
        }
        pos = next;

        if let Some(&c) = chars.get(pos) {
            if c == ',' || c == '_' {
                spec.grouping = Some(c);
                pos += 1;
            }
        }

        if chars.get(pos) == Some(&'.') {
            let (precision, next) = take_number(&chars, pos + 1).map_err(|_| invalid())?;
            spec.precision = precision.ok_or_else(invalid)?;
            pos = next;
        }

        let rest = &chars[pos..];
        let (mode, kind) = match rest {
            [] => (None, FormatKind::Fixed),
            [kind] => (None, parse_kind(*kind).ok_or_else(invalid)?),
            [mode, kind] => (
                Some(RoundingMode::from_format_letter(*mode).map_err(|_| invalid())?),
                parse_kind(*kind).ok_or_else(invalid)?,
            ),
            _ => return Err(invalid()),
        };
        spec.mode = mode;
        spec.kind = kind;

        Ok(spec)
    }
}

fn parse_kind(c: char) -> Option<FormatKind> {
    match c {
        'f' | 'F' => Some(FormatKind::Fixed),
        'e' => Some(FormatKind::Scientific { uppercase: false }),
        'E' => Some(FormatKind::Scientific { uppercase: true }),
        '%' => Some(FormatKind::Percent),
        _ => None,
    }
}

/// Read a run of ASCII digits starting at `pos`.
fn take_number(chars: &[char], pos: usize) -> Result<(Option<u32>, usize), ()> {
    let end = chars[pos.min(chars.len())..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(chars.len(), |offset| pos + offset);
    if end <= pos {
        return Ok((None, pos));
    }
    let text: String = chars[pos..end].iter().collect();
    let number = text.parse::<u32>().map_err(|_| ())?;
    Ok((Some(number), end))
}

/// Parse a format specification.
pub fn parse_spec(spec: &str) -> RoundingResult<FormatSpec> {
    spec.parse()
}
