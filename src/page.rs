#![cfg(feature = "web")]
use chrono::{DateTime, Local};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use std::error::Error;

use crate::chart::{ChartOptions, render_distribution_chart};
use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::loader::Snapshot;
use crate::map::{MapView, build_map_view};
use crate::metrics::{
    ZoneRow, alert_count, category_counts, highest_score, table_rows, total_area_km2,
};

pub const DASHBOARD_TITLE: &str = "🌊 Kampala Flood Monitoring System";
const TEMPLATE_NAME: &str = "dashboard";

/// Output of one dashboard section
///
/// A failing section keeps its error message instead of content so the
/// rest of the page can still render.
#[derive(Debug, Serialize)]
pub struct Panel<T> {
    pub content: Option<T>,
    pub error: Option<String>,
}

impl<T> Panel<T> {
    /// Runs `build`, recording its error instead of propagating it
    pub fn capture(name: &str, build: impl FnOnce() -> Result<T, Box<dyn Error>>) -> Self {
        match build() {
            Ok(content) => Panel {
                content: Some(content),
                error: None,
            },
            Err(e) => {
                log::warn!("{} panel failed: {}", name, e);
                Panel {
                    content: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct StatusRow {
    updated_at: String,
    data_age: String,
    file_name: String,
}

#[derive(Debug, Serialize)]
struct MetricCard {
    label: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct TableRow {
    score: String,
    area: String,
    category: &'static str,
    color: &'static str,
    sort_value: String,
}

impl From<ZoneRow> for TableRow {
    fn from(row: ZoneRow) -> Self {
        TableRow {
            score: row.score,
            area: format!("{:.2}", row.area_km2),
            category: row.category_label,
            color: row.category.color(),
            sort_value: row.sort_value.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

/// Sections shown once a snapshot loaded
#[derive(Debug, Serialize)]
struct Sections {
    metrics: Vec<MetricCard>,
    distribution: Panel<String>,
    map: Panel<MapView>,
    table: Panel<Vec<TableRow>>,
}

#[derive(Debug, Serialize)]
struct PageContext {
    title: &'static str,
    refresh_secs: u64,
    css: &'static str,
    error: Option<String>,
    status: Option<StatusRow>,
    empty: bool,
    sections: Option<Sections>,
}

/// Compiled dashboard template
pub struct DashboardPage {
    handlebars: Handlebars<'static>,
}

impl DashboardPage {
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(TEMPLATE_NAME, include_str!("./static/dashboard.hbs"))?;
        Ok(Self { handlebars })
    }

    /// Renders the page for one refresh pass
    ///
    /// A failed pass produces the header and a single error alert with no
    /// panels. `now` is used for the data age.
    pub fn render(
        &self,
        config: &DashboardConfig,
        pass: &Result<Snapshot, DashboardError>,
        now: DateTime<Local>,
    ) -> Result<String, RenderError> {
        let mut context = PageContext {
            title: DASHBOARD_TITLE,
            refresh_secs: config.refresh_interval.as_secs(),
            css: include_str!("./static/dashboard.css"),
            error: None,
            status: None,
            empty: false,
            sections: None,
        };

        match pass {
            Err(e) => context.error = Some(e.to_string()),
            Ok(snapshot) => {
                context.status = Some(status_row(snapshot, now));
                if snapshot.zones.is_empty() {
                    context.empty = true;
                } else {
                    context.sections = Some(build_sections(config, snapshot));
                }
            }
        }

        self.handlebars.render(TEMPLATE_NAME, &context)
    }
}

fn status_row(snapshot: &Snapshot, now: DateTime<Local>) -> StatusRow {
    let age_minutes = (now - snapshot.updated_at).num_milliseconds() as f64 / 60_000.0;
    StatusRow {
        updated_at: snapshot.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        data_age: format!("{:.1} minutes", age_minutes),
        file_name: snapshot.file_name.clone(),
    }
}

fn build_sections(config: &DashboardConfig, snapshot: &Snapshot) -> Sections {
    let zones = &snapshot.zones;

    let highest = match highest_score(zones) {
        Ok(score) => format!("{:.1}", score),
        Err(e) => {
            log::warn!("highest risk metric unavailable: {}", e);
            "N/A".to_string()
        }
    };
    let area = total_area_km2(zones);
    let area = if area.is_finite() {
        format!("{:.2} km²", area)
    } else {
        "N/A".to_string()
    };

    let metrics = vec![
        MetricCard {
            label: "📍 Total Zones",
            value: zones.len().to_string(),
        },
        MetricCard {
            label: "🔥 Highest Risk",
            value: highest,
        },
        MetricCard {
            label: "📏 Area",
            value: area,
        },
        MetricCard {
            label: "🚨 Alert Zones",
            value: alert_count(zones, config.alert_threshold).to_string(),
        },
    ];

    Sections {
        metrics,
        distribution: Panel::capture("distribution", || {
            render_distribution_chart(&category_counts(zones), &ChartOptions::default())
        }),
        map: Panel::capture("map", || build_map_view(config, zones)),
        table: Panel::capture("table", || {
            Ok(table_rows(zones).into_iter().map(TableRow::from).collect())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::RiskScore;
    use crate::zone::RiskZone;
    use chrono::Duration;

    fn snapshot(scores: Vec<RiskScore>) -> Snapshot {
        Snapshot {
            zones: scores.into_iter().map(|s| RiskZone::new(s, None)).collect(),
            updated_at: Local::now() - Duration::minutes(30),
            file_name: "risk.geojson".to_string(),
        }
    }

    fn render(pass: Result<Snapshot, DashboardError>) -> String {
        DashboardPage::new()
            .unwrap()
            .render(&DashboardConfig::default(), &pass, Local::now())
            .unwrap()
    }

    #[test]
    fn capture_keeps_content_or_error() {
        let ok: Panel<u32> = Panel::capture("ok", || Ok(3));
        assert!(ok.error.is_none());
        assert_eq!(ok.content, Some(3));

        let failed: Panel<u32> = Panel::capture("broken", || Err("chart exploded".into()));
        assert!(failed.content.is_none());
        assert_eq!(failed.error.as_deref(), Some("chart exploded"));
    }

    #[test]
    fn error_pass_renders_only_the_alert() {
        let html = render(Err(DashboardError::DirectoryNotFound));
        assert!(html.contains("Data directory not found"));
        assert!(!html.contains("Risk Overview"));
        assert!(!html.contains("risk-map"));
    }

    #[test]
    fn loaded_pass_renders_all_sections() {
        let html = render(Ok(snapshot(vec![
            RiskScore::Numeric(1.0),
            RiskScore::Numeric(5.0),
            RiskScore::Numeric(9.0),
            RiskScore::Missing,
        ])));
        assert!(html.contains("Risk Overview"));
        assert!(html.contains("Risk Distribution"));
        assert!(html.contains("risk-map"));
        assert!(html.contains("Risk Zone Details"));
        assert!(html.contains("risk.geojson"));
        assert!(html.contains("9.0"));
        assert!(html.contains("N/A"));
    }

    #[test]
    fn empty_snapshot_shows_warning() {
        let html = render(Ok(snapshot(Vec::new())));
        assert!(html.contains("No valid risk data available in the loaded file."));
        assert!(!html.contains("Risk Overview"));
    }

    #[test]
    fn data_age_is_in_minutes() {
        let snap = snapshot(vec![RiskScore::Numeric(2.0)]);
        let now = snap.updated_at + Duration::seconds(90);
        let row = status_row(&snap, now);
        assert_eq!(row.data_age, "1.5 minutes");
        assert_eq!(row.file_name, "risk.geojson");
    }

    #[test]
    fn invalid_score_degrades_only_the_highest_metric() {
        let snap = snapshot(vec![RiskScore::Numeric(4.0), RiskScore::from("abc")]);
        let sections = build_sections(&DashboardConfig::default(), &snap);
        assert_eq!(sections.metrics[1].value, "N/A");
        assert_eq!(sections.metrics[3].value, "1");
        assert!(sections.table.error.is_none());
        assert!(sections.map.error.is_none());
    }
}
