use std::path::PathBuf;
use std::time::Duration;

/// Map center over Kampala as (latitude, longitude)
pub const KAMPALA_COORDS: (f64, f64) = (0.3476, 32.5825);

/// Scores strictly above this count as alert zones
pub const ALERT_THRESHOLD: f64 = 1.0;

/// Directory scanned for risk model outputs
pub const DATA_DIR: &str = "flood_risk_outputs";

/// Extension (without the dot) of the files the selector considers
pub const DATA_EXTENSION: &str = "geojson";

/// Browser auto-refresh interval in seconds
pub const REFRESH_INTERVAL: u64 = 300;

pub const MAP_ZOOM: u8 = 12;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "OpenStreetMap contributors";

pub const BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime configuration for one dashboard instance
///
/// Every field defaults to the constants above. The `website` binary
/// overrides the data directory and bind address from its arguments.
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    /// Directory holding the GeoJSON outputs
    pub data_dir: PathBuf,

    /// File extension filter, without the leading dot
    pub extension: String,

    /// Alert threshold applied to numeric scores
    pub alert_threshold: f64,

    /// Initial map center (latitude, longitude)
    pub map_center: (f64, f64),

    /// Initial map zoom level
    pub map_zoom: u8,

    /// Period of the browser-driven refresh
    pub refresh_interval: Duration,

    /// Address the HTTP server listens on
    pub bind_addr: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            extension: DATA_EXTENSION.to_string(),
            alert_threshold: ALERT_THRESHOLD,
            map_center: KAMPALA_COORDS,
            map_zoom: MAP_ZOOM,
            refresh_interval: Duration::from_secs(REFRESH_INTERVAL),
            bind_addr: BIND_ADDR.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Builds a configuration from command line arguments
    ///
    /// Accepts `[data_dir] [bind_addr]` after the program name; missing
    /// arguments keep their defaults.
    ///
    /// # Examples
    /// ```
    /// use flood_monitor::config::DashboardConfig;
    ///
    /// let args = vec!["website".to_string(), "outputs".to_string()];
    /// let config = DashboardConfig::from_args(&args);
    /// assert_eq!(config.data_dir.to_str(), Some("outputs"));
    /// assert_eq!(config.bind_addr, "127.0.0.1:3000");
    /// ```
    pub fn from_args(args: &[String]) -> Self {
        let mut config = Self::default();

        if let Some(dir) = args.get(1) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(addr) = args.get(2) {
            config.bind_addr = addr.clone();
        }

        config
    }

    /// Returns a copy reading from another directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = DashboardConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("flood_risk_outputs"));
        assert_eq!(config.extension, "geojson");
        assert_eq!(config.alert_threshold, 1.0);
        assert_eq!(config.refresh_interval.as_secs(), 300);
        assert_eq!(config.map_center, (0.3476, 32.5825));
    }

    #[test]
    fn args_override_directory_and_address() {
        let args: Vec<String> = ["website", "/tmp/risk", "0.0.0.0:8080"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let config = DashboardConfig::from_args(&args);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/risk"));
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn program_name_alone_keeps_defaults() {
        let config = DashboardConfig::from_args(&["website".to_string()]);
        assert_eq!(config.data_dir, PathBuf::from(DATA_DIR));
        assert_eq!(config.bind_addr, BIND_ADDR);
    }
}
