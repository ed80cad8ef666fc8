use geo::{Area, Geometry};

use crate::category::{RiskCategory, classify};
use crate::color::{Rgb, colorize};
use crate::score::RiskScore;

/// Square metres per square kilometre
pub const M2_PER_KM2: f64 = 1e6;

/// One zone of a risk model output
///
/// The category is derived once from the score at construction; area is
/// computed from the geometry whenever it is asked for.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskZone {
    pub score: RiskScore,
    pub category: RiskCategory,
    pub geometry: Option<Geometry<f64>>,
}

impl RiskZone {
    pub fn new(score: RiskScore, geometry: Option<Geometry<f64>>) -> Self {
        let category = classify(&score);
        Self {
            score,
            category,
            geometry,
        }
    }

    /// Planar area in the geometry's own coordinate units, 0 without geometry
    pub fn area(&self) -> f64 {
        self.geometry
            .as_ref()
            .map(|geometry| geometry.unsigned_area())
            .unwrap_or(0.0)
    }

    /// Area assuming metre coordinates, in km²
    pub fn area_km2(&self) -> f64 {
        self.area() / M2_PER_KM2
    }

    pub fn color(&self) -> Rgb {
        colorize(&self.score)
    }
}
