#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State boundary polygon fetching and parsing.
//!
//! Reads the US state border collection once per run, from a URL or a
//! local file, and converts each feature into a [`BoundaryPolygon`]. A
//! failed read is fatal for the run; there is no retry and no cache.

pub mod fetch;

use geo::MultiPolygon;
use thiserror::Error;

/// Errors that can occur during geography operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Reading a local boundary file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// A state outline keyed by its two-letter state code.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPolygon {
    /// State code taken from `feature.id` (e.g. "CA").
    pub id: String,
    /// Display name taken from `properties.name` (e.g. "California").
    pub name: String,
    /// Outline; single polygons are wrapped into a multipolygon.
    pub geometry: MultiPolygon<f64>,
}
