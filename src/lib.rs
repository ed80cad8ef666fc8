/*!
# Flood Monitor

A browser-based flood risk dashboard for Kampala, built in Rust.

## Overview

A risk model periodically writes GeoJSON files into an output directory. Each
feature is a zone polygon carrying a `risk_score` between 0 and 10. The
dashboard picks the newest non-empty file on every refresh, classifies every
zone and shows the result as summary metrics, a category bar chart, an
interactive map and a sortable table.

## Architecture

Every page load is one stateless pass:

1. **Select** - `selector` scans the data directory for the latest non-empty
   `.geojson` file
2. **Load** - `loader` parses it into `RiskZone` records, deriving each
   zone's `RiskCategory` through `category::classify`
3. **Render** - `page` assembles metrics (`metrics`), the chart (`chart`),
   the map overlay (`map`) and the table into one HTML page

Nothing is cached between passes. The page refreshes itself every five
minutes and offers a manual refresh button.

### Risk categories

| Category      | Scores      | Color     |
|---------------|-------------|-----------|
| No Risk       | [0, 2)      | `#00FF7F` |
| Low Risk      | [2, 4)      | `#FFD700` |
| Moderate Risk | [4, 6)      | `#FF8C00` |
| High Risk     | [6, 8)      | `#FF4500` |
| Extreme Risk  | [8, 10)     | `#FF0000` |
| No Data       | absent      | `#A9A9A9` |
| Invalid Data  | other       | `#696969` |

Map fill colors use a continuous gradient over the same five colors
(`color::colorize`).

## Modules

- **config**: Fixed constants and the runtime `DashboardConfig`
- **score**: Tri-state risk score read from GeoJSON properties
- **category**: Risk categories and the classifier
- **color**: Gradient and sentinel colors
- **selector**: Latest-file selection
- **loader**: GeoJSON parsing and snapshot creation
- **zone**: The zone record and its area
- **metrics**: Summary metrics, distribution and table rows
- **export**: CSV and XLSX export of the zone table
- **chart**, **map**, **page**, **app**: Web presentation (feature `web`)

## HTTP Endpoints

- `/` - The dashboard
- `/refresh` - Manual refresh, redirects to `/`
- `/api/snapshot` - JSON summary of the current data
- `/api/zones.csv`, `/api/zones.xlsx` - Zone table downloads
*/

pub mod category;
pub mod color;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod metrics;
pub mod score;
pub mod selector;
pub mod zone;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod chart;
#[cfg(feature = "web")]
pub mod map;
#[cfg(feature = "web")]
pub mod page;

pub use category::{RiskCategory, classify};
pub use color::{Rgb, colorize};
pub use error::DashboardError;
pub use loader::{Snapshot, load_latest_data};
pub use score::RiskScore;
pub use zone::RiskZone;
