use serde::Serialize;
use std::fmt;

use crate::score::RiskScore;

/// Flood risk bucket for a zone
///
/// The five ranged categories cover [0, 10) with half-open, contiguous
/// ranges; `NoData` and `InvalidData` cover everything else. Declaration
/// order is the display order used by the chart, legend and exports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum RiskCategory {
    NoRisk,
    LowRisk,
    ModerateRisk,
    HighRisk,
    ExtremeRisk,
    NoData,
    InvalidData,
}

/// Ranged categories in ascending order with their [lower, upper) bounds
pub const RISK_RANGES: [(RiskCategory, f64, f64); 5] = [
    (RiskCategory::NoRisk, 0.0, 2.0),
    (RiskCategory::LowRisk, 2.0, 4.0),
    (RiskCategory::ModerateRisk, 4.0, 6.0),
    (RiskCategory::HighRisk, 6.0, 8.0),
    (RiskCategory::ExtremeRisk, 8.0, 10.0),
];

impl RiskCategory {
    /// Every category, in declaration order
    pub const ALL: [RiskCategory; 7] = [
        RiskCategory::NoRisk,
        RiskCategory::LowRisk,
        RiskCategory::ModerateRisk,
        RiskCategory::HighRisk,
        RiskCategory::ExtremeRisk,
        RiskCategory::NoData,
        RiskCategory::InvalidData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskCategory::NoRisk => "No Risk",
            RiskCategory::LowRisk => "Low Risk",
            RiskCategory::ModerateRisk => "Moderate Risk",
            RiskCategory::HighRisk => "High Risk",
            RiskCategory::ExtremeRisk => "Extreme Risk",
            RiskCategory::NoData => "No Data",
            RiskCategory::InvalidData => "Invalid Data",
        }
    }

    /// Score range of a ranged category, `None` for the sentinels
    pub fn range(self) -> Option<(f64, f64)> {
        RISK_RANGES
            .iter()
            .find(|(category, _, _)| *category == self)
            .map(|(_, lower, upper)| (*lower, *upper))
    }

    /// Palette color as a `#RRGGBB` string
    pub fn color(self) -> &'static str {
        match self {
            RiskCategory::NoRisk => "#00FF7F",
            RiskCategory::LowRisk => "#FFD700",
            RiskCategory::ModerateRisk => "#FF8C00",
            RiskCategory::HighRisk => "#FF4500",
            RiskCategory::ExtremeRisk => "#FF0000",
            RiskCategory::NoData => "#A9A9A9",
            RiskCategory::InvalidData => "#696969",
        }
    }

    pub fn is_sentinel(self) -> bool {
        matches!(self, RiskCategory::NoData | RiskCategory::InvalidData)
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classifies a risk score
///
/// # Examples
/// ```
/// use flood_monitor::category::{classify, RiskCategory};
/// use flood_monitor::score::RiskScore;
///
/// assert_eq!(classify(&RiskScore::Numeric(4.0)), RiskCategory::ModerateRisk);
/// assert_eq!(classify(&RiskScore::Numeric(10.0)), RiskCategory::InvalidData);
/// assert_eq!(classify(&RiskScore::Missing), RiskCategory::NoData);
/// ```
pub fn classify(score: &RiskScore) -> RiskCategory {
    match score {
        RiskScore::Missing => RiskCategory::NoData,
        RiskScore::Invalid(_) => RiskCategory::InvalidData,
        RiskScore::Numeric(value) => RISK_RANGES
            .iter()
            .find(|(_, lower, upper)| *lower <= *value && *value < *upper)
            .map(|(category, _, _)| *category)
            .unwrap_or(RiskCategory::InvalidData),
    }
}
