#![cfg(not(tarpaulin_include))]

use flood_monitor::app;
use flood_monitor::config::DashboardConfig;
use std::env;

/// Main entry point for the flood risk dashboard
///
/// Usage: `website [data_dir] [bind_addr]`. Log verbosity follows
/// `RUST_LOG` and defaults to `info`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = DashboardConfig::from_args(&args);

    log::info!(
        "Serving flood risk data from {} (refresh every {}s)",
        config.data_dir.display(),
        config.refresh_interval.as_secs()
    );
    app::run(config).await
}
