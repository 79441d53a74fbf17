//! Serializable map artifact: a choropleth of state means plus a layer of
//! city circle markers, drawn by the front end's map widget.

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Feature property carrying the serialized [`crate::Interaction`].
pub const INTERACTION_PROPERTY: &str = "interaction";

/// Base map tiles offered in the layer control.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum TileTheme {
    /// Dark `CARTO` basemap.
    #[strum(serialize = "cartodbdark_matter")]
    #[serde(rename = "cartodbdark_matter")]
    DarkMatter,
    /// Light `CARTO` basemap.
    #[strum(serialize = "cartodbpositron")]
    #[serde(rename = "cartodbpositron")]
    Positron,
}

/// A selectable base layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    /// Tile set.
    pub theme: TileTheme,
    /// Name shown in the layer control.
    pub name: String,
    /// Whether the layer appears in the layer control.
    pub control: bool,
}

/// Colour legend of the choropleth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Legend caption.
    pub name: String,
    /// Bin edges, one more than `colors`; empty when no state has data.
    pub thresholds: Vec<f64>,
    /// Fill colour of each bin.
    pub colors: Vec<String>,
}

/// State polygons shaded by their mean days on market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethLayer {
    /// Layer name.
    pub name: String,
    /// One feature per state boundary.
    pub features: FeatureCollection,
    /// Polygon fill opacity.
    pub fill_opacity: f64,
    /// Outline opacity.
    pub line_opacity: f64,
    /// Properties shown in the hover tooltip, without labels.
    pub tooltip_fields: Vec<String>,
    /// Colour legend.
    pub legend: Legend,
}

/// Default style of the city circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    /// Circle fill colour.
    pub fill_color: String,
    /// Circle fill opacity.
    pub fill_opacity: f64,
    /// Outline colour.
    pub color: String,
    /// Outline weight in pixels.
    pub weight: f64,
    /// Fill opacity while hovered.
    pub highlight_fill_opacity: f64,
}

/// One circle per city, sized by its days on market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerLayer {
    /// Layer name.
    pub name: String,
    /// One point feature per city; `radius` (metres) is a property.
    pub features: FeatureCollection,
    /// Circle style.
    pub style: MarkerStyle,
    /// Properties shown in the hover tooltip.
    pub tooltip_fields: Vec<String>,
    /// Properties shown in the click popup.
    pub popup_fields: Vec<String>,
    /// Whether clicking a marker zooms to it.
    pub zoom_on_click: bool,
}

/// The complete interactive map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapArtifact {
    /// Initial centre as `[lat, lng]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: u8,
    /// Whether the scroll wheel zooms the map.
    pub scroll_wheel_zoom: bool,
    /// Widget width in pixels.
    pub width: u32,
    /// Widget height in pixels.
    pub height: u32,
    /// Base layers.
    pub tile_layers: Vec<TileLayer>,
    /// Whether the layer control starts collapsed.
    pub layer_control_collapsed: bool,
    /// State choropleth.
    pub choropleth: ChoroplethLayer,
    /// City markers.
    pub markers: MarkerLayer,
}
