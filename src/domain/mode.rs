// ============================================================================
// Rounding Modes
// The twelve rounding rules, in two families
// ============================================================================

use crate::numeric::RoundingError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a value between two representable units is resolved.
///
/// Directed modes always pick one bracketing unit by a fixed rule. To-nearest
/// modes pick the closer unit and only consult their tie-break rule when the
/// value lies exactly halfway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RoundingMode {
    // Directed
    TowardZero,
    AwayFromZero,
    Floor,
    Ceiling,
    ToEven,
    ToOdd,

    // To-nearest
    NearestTiesToEven,
    NearestTiesToOdd,
    NearestTiesAwayFromZero,
    NearestTiesTowardZero,
    NearestTiesTowardPositive,
    NearestTiesTowardNegative,
}

/// Tie-break direction shared by the directed rules and the to-nearest ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    TowardZero,
    AwayFromZero,
    Floor,
    Ceiling,
    Even,
    Odd,
}

impl RoundingMode {
    /// Every mode, directed family first.
    pub const ALL: [RoundingMode; 12] = [
        RoundingMode::TowardZero,
        RoundingMode::AwayFromZero,
        RoundingMode::Floor,
        RoundingMode::Ceiling,
        RoundingMode::ToEven,
        RoundingMode::ToOdd,
        RoundingMode::NearestTiesToEven,
        RoundingMode::NearestTiesToOdd,
        RoundingMode::NearestTiesAwayFromZero,
        RoundingMode::NearestTiesTowardZero,
        RoundingMode::NearestTiesTowardPositive,
        RoundingMode::NearestTiesTowardNegative,
    ];

    pub const DIRECTED: [RoundingMode; 6] = [
        RoundingMode::TowardZero,
        RoundingMode::AwayFromZero,
        RoundingMode::Floor,
        RoundingMode::Ceiling,
        RoundingMode::ToEven,
        RoundingMode::ToOdd,
    ];

    pub const NEAREST: [RoundingMode; 6] = [
        RoundingMode::NearestTiesToEven,
        RoundingMode::NearestTiesToOdd,
        RoundingMode::NearestTiesAwayFromZero,
        RoundingMode::NearestTiesTowardZero,
        RoundingMode::NearestTiesTowardPositive,
        RoundingMode::NearestTiesTowardNegative,
    ];

    /// True for the six to-nearest modes.
    #[inline]
    pub const fn is_nearest(self) -> bool {
        matches!(
            self,
            RoundingMode::NearestTiesToEven
                | RoundingMode::NearestTiesToOdd
                | RoundingMode::NearestTiesAwayFromZero
                | RoundingMode::NearestTiesTowardZero
                | RoundingMode::NearestTiesTowardPositive
                | RoundingMode::NearestTiesTowardNegative
        )
    }

    /// The rule applied when the mode has to choose between two units:
    /// always for directed modes, only on ties for to-nearest modes.
    pub(crate) const fn direction(self) -> Direction {
        match self {
            RoundingMode::TowardZero | RoundingMode::NearestTiesTowardZero => {
                Direction::TowardZero
            }
            RoundingMode::AwayFromZero | RoundingMode::NearestTiesAwayFromZero => {
                Direction::AwayFromZero
            }
            RoundingMode::Floor | RoundingMode::NearestTiesTowardNegative => Direction::Floor,
            RoundingMode::Ceiling | RoundingMode::NearestTiesTowardPositive => Direction::Ceiling,
            RoundingMode::ToEven | RoundingMode::NearestTiesToEven => Direction::Even,
            RoundingMode::ToOdd | RoundingMode::NearestTiesToOdd => Direction::Odd,
        }
    }

    /// Stable kebab-case name.
    pub const fn name(self) -> &'static str {
        match self {
            RoundingMode::TowardZero => "toward-zero",
            RoundingMode::AwayFromZero => "away-from-zero",
            RoundingMode::Floor => "floor",
            RoundingMode::Ceiling => "ceiling",
            RoundingMode::ToEven => "to-even",
            RoundingMode::ToOdd => "to-odd",
            RoundingMode::NearestTiesToEven => "nearest-ties-to-even",
            RoundingMode::NearestTiesToOdd => "nearest-ties-to-odd",
            RoundingMode::NearestTiesAwayFromZero => "nearest-ties-away-from-zero",
            RoundingMode::NearestTiesTowardZero => "nearest-ties-toward-zero",
            RoundingMode::NearestTiesTowardPositive => "nearest-ties-toward-positive",
            RoundingMode::NearestTiesTowardNegative => "nearest-ties-toward-negative",
        }
    }

    /// Mode from a format-specification letter.
    ///
    /// Lowercase letters select the to-nearest family (`e o a z p m`: ties to
    /// even, odd, away, zero, plus, minus); the same letters in uppercase
    /// select the matching directed rule.
    pub fn from_format_letter(letter: char) -> Result<Self, RoundingError> {
        let mode = match letter {
            'e' => RoundingMode::NearestTiesToEven,
            'o' => RoundingMode::NearestTiesToOdd,
            'a' => RoundingMode::NearestTiesAwayFromZero,
            'z' => RoundingMode::NearestTiesTowardZero,
            'p' => RoundingMode::NearestTiesTowardPositive,
            'm' => RoundingMode::NearestTiesTowardNegative,
            'E' => RoundingMode::ToEven,
            'O' => RoundingMode::ToOdd,
            'A' => RoundingMode::AwayFromZero,
            'Z' => RoundingMode::TowardZero,
            'P' => RoundingMode::Ceiling,
            'M' => RoundingMode::Floor,
            other => return Err(RoundingError::InvalidMode(other.to_string())),
        };
        Ok(mode)
    }
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::NearestTiesToEven
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = RoundingError;

    /// Parse a kebab-case mode name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RoundingMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| RoundingError::InvalidMode(s.to_string()))
    }
}
