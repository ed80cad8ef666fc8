use serde::{Serialize, Serializer};
use std::fmt;

use crate::score::RiskScore;

/// 8-bit RGB color, displayed as `#rrggbb`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Gradient stops, evenly spaced over [SCORE_MIN, SCORE_MAX]
pub const GRADIENT: [Rgb; 5] = [
    Rgb(0x00, 0xFF, 0x7F), // spring green
    Rgb(0xFF, 0xD7, 0x00), // gold
    Rgb(0xFF, 0x8C, 0x00), // dark orange
    Rgb(0xFF, 0x45, 0x00), // orange red
    Rgb(0xFF, 0x00, 0x00), // red
];

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 10.0;

/// Color for an absent score (dark gray)
pub const NO_DATA_COLOR: Rgb = Rgb(0xA9, 0xA9, 0xA9);

/// Color for a non-numeric or out-of-range score (dim gray)
pub const INVALID_DATA_COLOR: Rgb = Rgb(0x69, 0x69, 0x69);

/// Maps a risk score to its fill color
///
/// # Examples
/// ```
/// use flood_monitor::color::{colorize, GRADIENT, NO_DATA_COLOR};
/// use flood_monitor::score::RiskScore;
///
/// assert_eq!(colorize(&RiskScore::Numeric(0.0)), GRADIENT[0]);
/// assert_eq!(colorize(&RiskScore::Numeric(10.0)), GRADIENT[4]);
/// assert_eq!(colorize(&RiskScore::Missing), NO_DATA_COLOR);
/// ```
pub fn colorize(score: &RiskScore) -> Rgb {
    match score {
        RiskScore::Missing => NO_DATA_COLOR,
        RiskScore::Invalid(_) => INVALID_DATA_COLOR,
        RiskScore::Numeric(v) if !(SCORE_MIN..=SCORE_MAX).contains(v) => INVALID_DATA_COLOR,
        RiskScore::Numeric(v) => interpolate(*v),
    }
}

/// Piecewise-linear blend between the two stops around `value`
fn interpolate(value: f64) -> Rgb {
    let bands = (GRADIENT.len() - 1) as f64;
    let position = (value - SCORE_MIN) / (SCORE_MAX - SCORE_MIN) * bands;
    let index = (position.floor() as usize).min(GRADIENT.len() - 2);
    let t = position - index as f64;

    let from = GRADIENT[index];
    let to = GRADIENT[index + 1];
    Rgb(
        lerp(from.0, to.0, t),
        lerp(from.1, to.1, t),
        lerp(from.2, to.2, t),
    )
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}
