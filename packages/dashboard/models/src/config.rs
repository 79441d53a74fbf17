//! Dashboard configuration, deserialized from TOML.

use housing_map_geography_models::BoundarySource;
use serde::{Deserialize, Serialize};

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Page title.
    pub title: String,
    /// Page caption.
    pub subtitle: String,
    /// Input CSV files.
    pub data: DataConfig,
    /// State boundary source.
    #[serde(default)]
    pub boundaries: BoundarySource,
    /// Country-wide constants shown in the USA view.
    pub national: NationalConfig,
    /// Map layout and marker scaling.
    pub map: MapConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// Paths of the two input CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// City-level file with one column per date.
    pub cities_csv: String,
    /// National `Date,DaysOnMarket` series.
    pub national_csv: String,
}

/// Country-wide population and density.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NationalConfig {
    /// US population.
    pub population: f64,
    /// US population per square kilometre.
    pub density: f64,
}

/// Map layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Initial centre as `[lat, lng]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Marker radius in metres per day on market.
    pub marker_radius_scale: f64,
    /// Widget width in pixels.
    pub width: u32,
    /// Widget height in pixels.
    pub height: u32,
}

/// HTTP server settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Directory of a built front end to serve at `/`, if any.
    pub static_dir: Option<String>,
}
