#![cfg(feature = "web")]
use geojson::{Feature, FeatureCollection, JsonObject};
use serde::Serialize;
use serde_json::json;
use std::error::Error;

use crate::category::RiskCategory;
use crate::config::{DashboardConfig, TILE_ATTRIBUTION, TILE_URL};
use crate::zone::RiskZone;

pub const BORDER_COLOR: &str = "#333";
pub const BORDER_WEIGHT: f64 = 1.5;
pub const FILL_OPACITY: f64 = 0.8;
pub const INVALID_DASH: &str = "5, 5";

/// Everything the page needs to draw the Leaflet map
#[derive(Debug, Serialize)]
pub struct MapView {
    pub lat: f64,
    pub lon: f64,
    pub zoom: u8,
    pub tile_url: &'static str,
    pub attribution: &'static str,

    /// Styled zone overlay as a GeoJSON string, safe to inline in `<script>`
    pub features: String,

    pub legend: Vec<LegendEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

/// Builds the map view for a set of zones
pub fn build_map_view(
    config: &DashboardConfig,
    zones: &[RiskZone],
) -> Result<MapView, Box<dyn Error>> {
    let overlay = zone_overlay(zones);
    let features = serde_json::to_string(&overlay)?.replace("</", "<\\/");

    Ok(MapView {
        lat: config.map_center.0,
        lon: config.map_center.1,
        zoom: config.map_zoom,
        tile_url: TILE_URL,
        attribution: TILE_ATTRIBUTION,
        features,
        legend: legend_entries(),
    })
}

/// One styled feature per zone that has a geometry
///
/// Each feature's properties carry a Leaflet path `style` object and the
/// `tooltip` HTML shown on hover.
pub fn zone_overlay(zones: &[RiskZone]) -> FeatureCollection {
    let features = zones
        .iter()
        .filter_map(|zone| {
            let geometry = zone.geometry.as_ref()?;
            Some(Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
                id: None,
                properties: Some(zone_properties(zone)),
                foreign_members: None,
            })
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn zone_properties(zone: &RiskZone) -> JsonObject {
    let dash_array = (zone.category == RiskCategory::InvalidData).then_some(INVALID_DASH);
    let tooltip = format!(
        "<div class='risk-tooltip'><b>Risk Score:</b> {}<br><b>Category:</b> {}</div>",
        zone.score.display(1),
        zone.category
    );

    let mut properties = JsonObject::new();
    properties.insert(
        "style".to_string(),
        json!({
            "fillColor": zone.color(),
            "color": BORDER_COLOR,
            "weight": BORDER_WEIGHT,
            "fillOpacity": FILL_OPACITY,
            "dashArray": dash_array,
        }),
    );
    properties.insert("tooltip".to_string(), json!(tooltip));
    properties.insert("category".to_string(), json!(zone.category.label()));
    properties
}

/// Legend rows for every category, ranged ones showing their bounds
pub fn legend_entries() -> Vec<LegendEntry> {
    RiskCategory::ALL
        .iter()
        .map(|category| {
            let label = match category.range() {
                Some((lower, upper)) => format!("{} ({}-{})", category.label(), lower, upper),
                None => category.label().to_string(),
            };
            LegendEntry {
                label,
                color: category.color(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::RiskScore;
    use geo::{Geometry, polygon};

    fn zone(score: RiskScore) -> RiskZone {
        RiskZone::new(
            score,
            Some(Geometry::Polygon(polygon![
                (x: 32.58, y: 0.34),
                (x: 32.59, y: 0.34),
                (x: 32.59, y: 0.35),
                (x: 32.58, y: 0.34),
            ])),
        )
    }

    fn style_of(feature: &Feature) -> serde_json::Value {
        feature.properties.as_ref().unwrap()["style"].clone()
    }

    #[test]
    fn features_carry_fill_color_and_tooltip() {
        let overlay = zone_overlay(&[zone(RiskScore::Numeric(0.0))]);
        assert_eq!(overlay.features.len(), 1);

        let feature = &overlay.features[0];
        let style = style_of(feature);
        assert_eq!(style["fillColor"], "#00ff7f");
        assert_eq!(style["color"], "#333");
        assert_eq!(style["dashArray"], serde_json::Value::Null);

        let tooltip = feature.properties.as_ref().unwrap()["tooltip"].as_str().unwrap();
        assert!(tooltip.contains("0.0"));
        assert!(tooltip.contains("No Risk"));
    }

    #[test]
    fn invalid_zones_are_dashed_and_gray() {
        let overlay = zone_overlay(&[zone(RiskScore::from("abc"))]);
        let style = style_of(&overlay.features[0]);
        assert_eq!(style["dashArray"], "5, 5");
        assert_eq!(style["fillColor"], "#696969");
    }

    #[test]
    fn missing_score_tooltip_says_na() {
        let overlay = zone_overlay(&[zone(RiskScore::Missing)]);
        let feature = &overlay.features[0];
        let tooltip = feature.properties.as_ref().unwrap()["tooltip"].as_str().unwrap();
        assert!(tooltip.contains("N/A"));
        assert_eq!(style_of(feature)["fillColor"], "#a9a9a9");
    }

    #[test]
    fn zones_without_geometry_are_skipped() {
        let zones = [RiskZone::new(RiskScore::Numeric(3.0), None), zone(RiskScore::Numeric(3.0))];
        assert_eq!(zone_overlay(&zones).features.len(), 1);
    }

    #[test]
    fn legend_lists_all_categories() {
        let legend = legend_entries();
        assert_eq!(legend.len(), 7);
        assert_eq!(legend[0].label, "No Risk (0-2)");
        assert_eq!(legend[4].label, "Extreme Risk (8-10)");
        assert_eq!(legend[6].label, "Invalid Data");
        assert_eq!(legend[6].color, "#696969");
    }

    #[test]
    fn inline_json_cannot_close_the_script() {
        let view = build_map_view(&DashboardConfig::default(), &[zone(RiskScore::Numeric(5.0))])
            .unwrap();
        assert!(!view.features.contains("</"));
        assert!(view.features.contains("FeatureCollection"));
    }
}
