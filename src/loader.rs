use chrono::{DateTime, Local};
use geojson::{Feature, GeoJson};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::score::RiskScore;
use crate::selector::select_latest;
use crate::zone::RiskZone;

/// Property holding the zone's risk score
pub const SCORE_FIELD: &str = "risk_score";

/// Result of one successful select-and-load pass
///
/// Built from scratch on every refresh and never modified afterwards.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub zones: Vec<RiskZone>,

    /// Creation time of the source file
    pub updated_at: DateTime<Local>,

    pub file_name: String,
}

/// Selects the newest output in the configured directory and loads it
///
/// # Examples
/// ```no_run
/// use flood_monitor::config::DashboardConfig;
/// use flood_monitor::loader::load_latest_data;
///
/// match load_latest_data(&DashboardConfig::default()) {
///     Ok(snapshot) => println!("{} zones from {}", snapshot.zones.len(), snapshot.file_name),
///     Err(e) => eprintln!("Data Error: {}", e),
/// }
/// ```
pub fn load_latest_data(config: &DashboardConfig) -> Result<Snapshot, DashboardError> {
    let selected = select_latest(&config.data_dir, &config.extension)?;
    let zones = load_zones(&selected.path)?;

    log::info!("loaded {} zones from {}", zones.len(), selected.file_name);

    Ok(Snapshot {
        zones,
        updated_at: DateTime::<Local>::from(selected.created),
        file_name: selected.file_name,
    })
}

/// Reads a GeoJSON file into risk zones
///
/// # Errors
/// * `MissingColumns` if no feature carries a `risk_score` property
/// * `Parse` on I/O, JSON, GeoJSON or geometry conversion failures
pub fn load_zones(path: &Path) -> Result<Vec<RiskZone>, DashboardError> {
    let file = File::open(path)?;
    let geojson = GeoJson::from_reader(BufReader::new(file))?;
    zones_from_geojson(geojson)
}

/// Converts a parsed GeoJSON document into risk zones
///
/// A bare geometry or single feature is treated as a one-feature collection.
pub fn zones_from_geojson(geojson: GeoJson) -> Result<Vec<RiskZone>, DashboardError> {
    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(geometry) => vec![Feature::from(geometry)],
    };

    if !features
        .iter()
        .any(|feature| feature.contains_property(SCORE_FIELD))
    {
        return Err(DashboardError::MissingColumns);
    }

    features.into_iter().map(zone_from_feature).collect()
}

fn zone_from_feature(feature: Feature) -> Result<RiskZone, DashboardError> {
    let score = RiskScore::from_property(feature.property(SCORE_FIELD));
    let geometry = feature
        .geometry
        .map(geo::Geometry::<f64>::try_from)
        .transpose()?;

    Ok(RiskZone::new(score, geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::RiskCategory;
    use std::fs;
    use tempfile::tempdir;

    fn collection(scores: &[&str]) -> String {
        let features: Vec<String> = scores
            .iter()
            .map(|score| {
                format!(
                    r#"{{"type":"Feature","properties":{{"risk_score":{}}},"geometry":{{"type":"Polygon","coordinates":[[[0,0],[1000,0],[1000,1000],[0,1000],[0,0]]]}}}}"#,
                    score
                )
            })
            .collect();
        format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        )
    }

    #[test]
    fn loads_scores_and_categories() {
        let geojson: GeoJson = collection(&["1", "5", "9"]).parse().unwrap();
        let zones = zones_from_geojson(geojson).unwrap();
        let categories: Vec<RiskCategory> = zones.iter().map(|z| z.category).collect();
        assert_eq!(
            categories,
            [
                RiskCategory::NoRisk,
                RiskCategory::ModerateRisk,
                RiskCategory::ExtremeRisk
            ]
        );
        assert_eq!(zones[0].area(), 1_000_000.0);
    }

    #[test]
    fn null_and_text_scores_are_recovered_per_value() {
        let geojson: GeoJson = collection(&["null", "\"abc\"", "\"3.5\""]).parse().unwrap();
        let zones = zones_from_geojson(geojson).unwrap();
        assert_eq!(zones[0].score, RiskScore::Missing);
        assert_eq!(zones[0].category, RiskCategory::NoData);
        assert_eq!(zones[1].category, RiskCategory::InvalidData);
        assert_eq!(zones[2].score, RiskScore::Numeric(3.5));
    }

    #[test]
    fn missing_score_column_is_fatal() {
        let geojson: GeoJson = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"depth":2},"geometry":null}
        ]}"#
        .parse()
        .unwrap();
        assert_eq!(
            zones_from_geojson(geojson),
            Err(DashboardError::MissingColumns)
        );

        let empty: GeoJson = r#"{"type":"FeatureCollection","features":[]}"#.parse().unwrap();
        assert_eq!(zones_from_geojson(empty), Err(DashboardError::MissingColumns));
    }

    #[test]
    fn feature_without_the_key_is_no_data() {
        let geojson: GeoJson = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{"risk_score":4},"geometry":null},
            {"type":"Feature","properties":{},"geometry":null}
        ]}"#
        .parse()
        .unwrap();
        let zones = zones_from_geojson(geojson).unwrap();
        assert_eq!(zones[1].category, RiskCategory::NoData);
        assert_eq!(zones[1].geometry, None);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.geojson");
        fs::write(&path, "{ not json").unwrap();

        match load_zones(&path) {
            Err(DashboardError::Parse(message)) => assert!(!message.is_empty()),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn snapshot_carries_file_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("risk_2024.geojson"), collection(&["2"])).unwrap();

        let config = DashboardConfig::default().with_data_dir(dir.path());
        let snapshot = load_latest_data(&config).unwrap();
        assert_eq!(snapshot.file_name, "risk_2024.geojson");
        assert_eq!(snapshot.zones.len(), 1);
        assert_eq!(snapshot.zones[0].category, RiskCategory::LowRisk);
    }

    #[test]
    fn snapshot_is_stamped_with_the_newest_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("run_b.geojson"), collection(&["9"])).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let newest = dir.path().join("run_a.geojson");
        fs::write(&newest, collection(&["1", "5"])).unwrap();

        let config = DashboardConfig::default().with_data_dir(dir.path());
        let snapshot = load_latest_data(&config).unwrap();
        assert_eq!(snapshot.file_name, "run_a.geojson");
        assert_eq!(snapshot.zones.len(), 2);

        let metadata = fs::metadata(&newest).unwrap();
        let created = metadata.created().or_else(|_| metadata.modified()).unwrap();
        assert_eq!(snapshot.updated_at, DateTime::<Local>::from(created));
    }

    #[test]
    fn missing_directory_message() {
        let dir = tempdir().unwrap();
        let config = DashboardConfig::default().with_data_dir(dir.path().join("absent"));
        let err = load_latest_data(&config).unwrap_err();
        assert_eq!(err.to_string(), "Data directory not found");
    }
}
