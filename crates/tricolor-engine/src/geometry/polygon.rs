use std::f32::consts::TAU;
use std::fmt;
use std::num::IntErrorKind;

use crate::coords::Point2;

/// Smallest side count that describes a polygon.
pub const MIN_SIDES: u32 = 3;

/// Largest side count accepted.
///
/// Past a few thousand sides the fan is indistinguishable from a circle, and
/// the vertex upload must stay well inside the device's buffer size limit.
pub const MAX_SIDES: u32 = 4096;

/// A polygon was requested with a side count outside
/// `MIN_SIDES..=MAX_SIDES`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InvalidSideCount {
    TooFew { requested: i64 },
    TooMany { requested: i64 },
}

impl InvalidSideCount {
    fn check(n: i64) -> Result<u32, InvalidSideCount> {
        if n < MIN_SIDES as i64 {
            Err(InvalidSideCount::TooFew { requested: n })
        } else if n > MAX_SIDES as i64 {
            Err(InvalidSideCount::TooMany { requested: n })
        } else {
            Ok(n as u32)
        }
    }
}

impl fmt::Display for InvalidSideCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidSideCount::TooFew { requested } => {
                write!(f, "a polygon needs at least {MIN_SIDES} sides, got {requested}")
            }
            InvalidSideCount::TooMany { requested } => {
                write!(f, "a polygon may have at most {MAX_SIDES} sides, got {requested}")
            }
        }
    }
}

impl std::error::Error for InvalidSideCount {}

/// Rejected side-count text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SideCountInputError {
    /// The text is not an integer.
    NotANumber(String),
    /// The integer is outside [`MIN_SIDES`]`..=`[`MAX_SIDES`].
    Invalid(InvalidSideCount),
}

impl fmt::Display for SideCountInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideCountInputError::NotANumber(text) => {
                write!(f, "side count {text:?} is not a whole number")
            }
            SideCountInputError::Invalid(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for SideCountInputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SideCountInputError::NotANumber(_) => None,
            SideCountInputError::Invalid(e) => Some(e),
        }
    }
}

impl From<InvalidSideCount> for SideCountInputError {
    fn from(e: InvalidSideCount) -> Self {
        SideCountInputError::Invalid(e)
    }
}

/// Vertices of a regular `n`-gon on the unit circle, starting at `(1, 0)`
/// and advancing counter-clockwise by `2π / n`.
pub fn regular_polygon_vertices(n: u32) -> Result<Vec<Point2>, InvalidSideCount> {
    let n = InvalidSideCount::check(n as i64)?;

    let step = TAU / n as f32;
    Ok((0..n)
        .map(|i| {
            let theta = i as f32 * step;
            Point2::new(theta.cos(), theta.sin())
        })
        .collect())
}

/// Parses user-entered side-count text.
///
/// Surrounding whitespace is ignored. Integers out of range, including
/// negative ones and ones too large for any integer type, are reported as
/// [`InvalidSideCount`] rather than as parse failures.
pub fn parse_side_count(text: &str) -> Result<u32, SideCountInputError> {
    let trimmed = text.trim();
    let n: i64 = match trimmed.parse() {
        Ok(n) => n,
        Err(e) => {
            return Err(match e.kind() {
                IntErrorKind::PosOverflow => {
                    InvalidSideCount::TooMany { requested: i64::MAX }.into()
                }
                IntErrorKind::NegOverflow => {
                    InvalidSideCount::TooFew { requested: i64::MIN }.into()
                }
                _ => SideCountInputError::NotANumber(trimmed.to_string()),
            });
        }
    };

    Ok(InvalidSideCount::check(n)?)
}
