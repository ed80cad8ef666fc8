use serde::Serialize;
use std::cmp::Ordering;
use std::error::Error;

use crate::category::RiskCategory;
use crate::loader::Snapshot;
use crate::score::RiskScore;
use crate::zone::RiskZone;

/// Number of zones whose score is strictly above `threshold`
///
/// Only numeric scores can raise an alert.
pub fn alert_count(zones: &[RiskZone], threshold: f64) -> usize {
    zones
        .iter()
        .filter_map(|zone| zone.score.value())
        .filter(|score| *score > threshold)
        .count()
}

/// Highest numeric score, 0 when no zone has one
///
/// # Errors
/// Fails if any zone carries a non-numeric score, since the maximum of the
/// column is then undefined.
pub fn highest_score(zones: &[RiskZone]) -> Result<f64, Box<dyn Error>> {
    let mut highest: Option<f64> = None;

    for zone in zones {
        match &zone.score {
            RiskScore::Missing => {}
            RiskScore::Numeric(v) => highest = Some(highest.map_or(*v, |h| h.max(*v))),
            RiskScore::Invalid(raw) => {
                return Err(format!("non-numeric risk score {:?}", raw).into());
            }
        }
    }

    Ok(highest.unwrap_or(0.0))
}

/// Sum of zone areas in km²
pub fn total_area_km2(zones: &[RiskZone]) -> f64 {
    zones.iter().map(RiskZone::area_km2).sum()
}

/// Zone counts for every category, in declaration order, zero-filled
///
/// # Examples
/// ```
/// use flood_monitor::category::RiskCategory;
/// use flood_monitor::metrics::category_counts;
/// use flood_monitor::score::RiskScore;
/// use flood_monitor::zone::RiskZone;
///
/// let zones = vec![RiskZone::new(RiskScore::Numeric(3.0), None)];
/// let counts = category_counts(&zones);
/// assert_eq!(counts.len(), 7);
/// assert_eq!(counts[1], (RiskCategory::LowRisk, 1));
/// assert_eq!(counts[0], (RiskCategory::NoRisk, 0));
/// ```
pub fn category_counts(zones: &[RiskZone]) -> Vec<(RiskCategory, usize)> {
    RiskCategory::ALL
        .iter()
        .map(|category| {
            let count = zones.iter().filter(|z| z.category == *category).count();
            (*category, count)
        })
        .collect()
}

/// One line of the zone table
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ZoneRow {
    /// Score with one decimal, or `N/A`
    pub score: String,

    /// Area in km², unrounded
    pub area_km2: f64,

    pub category: RiskCategory,

    /// Category label, for templates
    pub category_label: &'static str,

    /// Sort key used by the browser, `None` for non-numeric scores
    pub sort_value: Option<f64>,
}

/// Table rows sorted by descending score
///
/// Zones without a numeric score follow all numeric ones, keeping their
/// file order.
pub fn table_rows(zones: &[RiskZone]) -> Vec<ZoneRow> {
    let mut ordered: Vec<&RiskZone> = zones.iter().collect();
    ordered.sort_by(|a, b| match (a.score.value(), b.score.value()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    ordered
        .into_iter()
        .map(|zone| ZoneRow {
            score: zone.score.display(1),
            area_km2: zone.area_km2(),
            category: zone.category,
            category_label: zone.category.label(),
            sort_value: zone.score.value(),
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CategoryCount {
    pub category: &'static str,
    pub count: usize,
}

/// Machine-readable digest of a snapshot
#[derive(Debug, Serialize)]
pub struct SnapshotSummary {
    pub file_name: String,
    pub updated_at: String,
    pub total_zones: usize,

    /// `None` when some score is non-numeric
    pub highest_score: Option<f64>,

    pub total_area_km2: f64,
    pub alert_zones: usize,
    pub distribution: Vec<CategoryCount>,
}

pub fn summarize(snapshot: &Snapshot, alert_threshold: f64) -> SnapshotSummary {
    let zones = &snapshot.zones;
    SnapshotSummary {
        file_name: snapshot.file_name.clone(),
        updated_at: snapshot.updated_at.to_rfc3339(),
        total_zones: zones.len(),
        highest_score: highest_score(zones).ok(),
        total_area_km2: total_area_km2(zones),
        alert_zones: alert_count(zones, alert_threshold),
        distribution: category_counts(zones)
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.label(),
                count,
            })
            .collect(),
    }
}
