use thiserror::Error;

/// Failures that abort a whole refresh pass
///
/// Any of these replaces the dashboard with a single error alert. Per-value
/// problems never end up here; they are absorbed by `RiskScore::Invalid`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    #[error("Data directory not found")]
    DirectoryNotFound,

    #[error("No valid GeoJSON files found")]
    NoDataFiles,

    #[error("Missing required columns in data")]
    MissingColumns,

    #[error("Error loading data: {0}")]
    Parse(String),
}

impl From<std::io::Error> for DashboardError {
    fn from(e: std::io::Error) -> Self {
        DashboardError::Parse(e.to_string())
    }
}

impl From<geojson::Error> for DashboardError {
    fn from(e: geojson::Error) -> Self {
        DashboardError::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Parse(e.to_string())
    }
}
