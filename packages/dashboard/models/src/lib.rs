#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection, interaction, and view model types for the dashboard.
//!
//! A dashboard cycle turns a map [`Interaction`] (or a dropdown pick) into
//! a [`Selection`], and a selection plus a date into a [`ViewModel`]. All
//! of these serialize to JSON for the front end.

pub mod config;
pub mod map;

use chrono::NaiveDate;
use housing_map_housing_models::TrendPoint;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::map::MapArtifact;

/// State dropdown label for the whole country.
pub const USA: &str = "USA";

/// The last thing the user clicked on the map.
///
/// Every map feature carries its own serialized `Interaction`, so the
/// front end only has to echo back the property of the clicked feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Interaction {
    /// Nothing has been clicked yet.
    #[default]
    None,
    /// A city marker was clicked.
    #[serde(rename_all = "camelCase")]
    CityClick {
        /// City name.
        region_name: String,
        /// Two-letter state code of the city.
        state_code: String,
    },
    /// A state polygon was clicked.
    PolygonClick {
        /// Display name of the state.
        name: String,
    },
}

/// The active dashboard filter.
///
/// A city can only be selected together with a specific state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// Country-wide view.
    #[default]
    Usa,
    /// A single state.
    State {
        /// Display state name.
        name: String,
    },
    /// A single city within a state.
    City {
        /// Display state name.
        state: String,
        /// City name.
        city: String,
    },
}

impl Selection {
    /// Builds a selection from dropdown values; `"USA"` or an empty state
    /// selects the whole country, and a city is ignored without a state.
    #[must_use]
    pub fn from_filters(state: &str, city: &str) -> Self {
        let state = state.trim();
        let city = city.trim();
        if state.is_empty() || state == USA {
            Self::Usa
        } else if city.is_empty() {
            Self::State {
                name: state.to_string(),
            }
        } else {
            Self::City {
                state: state.to_string(),
                city: city.to_string(),
            }
        }
    }

    /// `"USA"` or the selected state's display name.
    #[must_use]
    pub fn state_label(&self) -> &str {
        match self {
            Self::Usa => USA,
            Self::State { name } => name,
            Self::City { state, .. } => state,
        }
    }

    /// The selected city, or `""`.
    #[must_use]
    pub fn city_label(&self) -> &str {
        match self {
            Self::City { city, .. } => city,
            Self::Usa | Self::State { .. } => "",
        }
    }
}

/// Labels of the metrics shown in the side panel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricKind {
    /// Heading for the country-wide view.
    #[strum(serialize = "COUNTRY")]
    Country,
    /// Heading for a state view.
    #[strum(serialize = "STATE")]
    State,
    /// Heading for a city view.
    #[strum(serialize = "CITY")]
    City,
    /// Mean days on market.
    #[strum(serialize = "AVG DAYS ON MARKET")]
    AvgDaysOnMarket,
    /// Population.
    #[strum(serialize = "POPULATION")]
    Population,
    /// Population per square kilometre.
    #[strum(serialize = "DENSITY / Km2")]
    Density,
}

/// One labelled value in the side panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// What the value is.
    pub kind: MetricKind,
    /// Display label (e.g. "AVG DAYS ON MARKET").
    pub label: String,
    /// Display value (e.g. "1,234.50").
    pub value: String,
}

impl Metric {
    /// Builds a metric labelled by its kind.
    #[must_use]
    pub fn new(kind: MetricKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            label: kind.to_string(),
            value: value.into(),
        }
    }
}

/// The side panel: a heading metric followed by the three scalar metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsPanel {
    /// Metrics in display order.
    pub metrics: Vec<Metric>,
}

impl MetricsPanel {
    /// Looks up a metric by kind.
    #[must_use]
    pub fn get(&self, kind: MetricKind) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.kind == kind)
    }
}

/// A line chart of days on market over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    /// Name of the x axis.
    pub x: String,
    /// Name of the y axis.
    pub y: String,
    /// Chart height in pixels.
    pub height: u32,
    /// Points ordered by date.
    pub points: Vec<TrendPoint>,
}

/// Options and initial values of the two dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// `"USA"` followed by every state name, alphabetically.
    pub states: Vec<String>,
    /// Index of the current selection's state in `states`.
    pub selected_state: usize,
    /// Every national series date, most recent first.
    pub dates: Vec<NaiveDate>,
    /// Index of the rendered date in `dates`.
    pub selected_date: usize,
}

/// Everything the front end needs to draw one dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// Page title.
    pub title: String,
    /// Page caption.
    pub subtitle: String,
    /// Active filter.
    pub selection: Selection,
    /// Date the map and metrics are rendered for.
    pub date: NaiveDate,
    /// Dropdown options.
    pub filters: FilterOptions,
    /// Choropleth and marker map.
    pub map: MapArtifact,
    /// Side panel metrics.
    pub metrics: MetricsPanel,
    /// Trend chart.
    pub trend: TrendSeries,
}
