#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State boundary source configuration types.
//!
//! Describes where the US state polygon collection is read from. The
//! collection is a `GeoJSON` `FeatureCollection` whose `feature.id` is the
//! two-letter state code and whose `properties.name` is the display name.

use serde::{Deserialize, Serialize};

/// Public `GeoJSON` of US state borders keyed by two-letter state code.
pub const DEFAULT_BOUNDARY_URL: &str =
    "https://raw.githubusercontent.com/python-visualization/folium-example-data/main/us_states.json";

/// Feature property holding a boundary's display name.
pub const NAME_PROPERTY: &str = "name";

/// Where to read the state boundary collection from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoundarySource {
    /// A single HTTP GET returning the collection.
    Url {
        /// Full URL of the `GeoJSON` `FeatureCollection`.
        url: String,
    },
    /// A local `GeoJSON` file.
    File {
        /// Path to the `GeoJSON` `FeatureCollection`.
        path: String,
    },
}

impl Default for BoundarySource {
    fn default() -> Self {
        Self::Url {
            url: DEFAULT_BOUNDARY_URL.to_string(),
        }
    }
}

impl std::fmt::Display for BoundarySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url { url } => write!(f, "{url}"),
            Self::File { path } => write!(f, "file://{path}"),
        }
    }
}
