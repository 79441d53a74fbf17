#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City and national days-on-market record types.
//!
//! These types hold the raw tabular housing data exactly as loaded from
//! the source CSV files. Every run of the dashboard rebuilds them from
//! scratch; nothing here is mutated after loading.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Header of the city name column in the city file.
pub const COL_REGION_NAME: &str = "RegionName";
/// Header of the two-letter state code column in the city file.
pub const COL_STATE_CODE: &str = "StateName";
/// Header of the display state name column in the city file.
pub const COL_STATE_NAME: &str = "state_name";
/// Header of the population column in the city file.
pub const COL_POPULATION: &str = "population";
/// Header of the density column in the city file.
pub const COL_DENSITY: &str = "density";
/// Header of the longitude column in the city file.
pub const COL_LONGITUDE: &str = "lng";
/// Header of the latitude column in the city file.
pub const COL_LATITUDE: &str = "lat";
/// Header of the date column in the national file.
pub const COL_DATE: &str = "Date";
/// Header of the metric column in the national file, and the label the
/// selected date's column is renamed to.
pub const COL_DAYS_ON_MARKET: &str = "DaysOnMarket";

/// Format of the date headers in the city file and of the `Date` column in
/// the national file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One city row of the city file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityRecord {
    /// City name (e.g. "Austin").
    pub region_name: String,
    /// Two-letter state code (e.g. "TX").
    pub state_code: String,
    /// Display state name (e.g. "Texas").
    pub state_name: String,
    /// Population.
    pub population: Option<f64>,
    /// Population per square kilometre.
    pub density: Option<f64>,
    /// Longitude (WGS84).
    pub longitude: Option<f64>,
    /// Latitude (WGS84).
    pub latitude: Option<f64>,
    /// Days-on-market value for every date column of the file.
    pub days_on_market: BTreeMap<NaiveDate, Option<f64>>,
}

impl CityRecord {
    /// Returns the days-on-market value at `date`, or `None` when the cell
    /// is empty or the date is not a column.
    #[must_use]
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.days_on_market.get(&date).copied().flatten()
    }
}

/// The whole city file: the date columns in schema order plus every row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityTable {
    /// Date columns in the order they appear in the file header.
    pub date_columns: Vec<NaiveDate>,
    /// City rows in file order.
    pub records: Vec<CityRecord>,
}

impl CityTable {
    /// Whether `date` is one of the table's date columns.
    #[must_use]
    pub fn has_date(&self, date: NaiveDate) -> bool {
        self.date_columns.contains(&date)
    }

    /// Distinct display state names, sorted alphabetically.
    #[must_use]
    pub fn state_names(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.state_name.as_str())
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Translates a two-letter state code into the display state name of
    /// the first row carrying that code.
    #[must_use]
    pub fn state_name_for_code(&self, state_code: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.state_code == state_code)
            .map(|r| r.state_name.as_str())
    }

    /// Rows whose display state name equals `state_name`.
    pub fn in_state<'a>(&'a self, state_name: &'a str) -> impl Iterator<Item = &'a CityRecord> {
        self.records
            .iter()
            .filter(move |r| r.state_name == state_name)
    }

    /// The first row matching both the city and the display state name.
    #[must_use]
    pub fn find_city(&self, region_name: &str, state_name: &str) -> Option<&CityRecord> {
        self.records
            .iter()
            .find(|r| r.region_name == region_name && r.state_name == state_name)
    }
}

/// A single row of the national time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// National mean days on market for that date.
    pub days_on_market: Option<f64>,
}

/// The national time series, ordered by date ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NationalSeries {
    /// Points sorted by date ascending.
    pub points: Vec<NationalPoint>,
}

impl NationalSeries {
    /// Builds a series from unordered points, sorting them by date.
    #[must_use]
    pub fn new(mut points: Vec<NationalPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    /// Mean of every non-null value in the series.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        mean(self.points.iter().filter_map(|p| p.days_on_market))
    }

    /// Dates of the series, most recent first.
    #[must_use]
    pub fn dates_descending(&self) -> Vec<NaiveDate> {
        self.points.iter().rev().map(|p| p.date).collect()
    }

    /// The most recent date of the series.
    #[must_use]
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Per-state means for one selected date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateAggregate {
    /// Two-letter state code (the grouping key).
    pub state_code: String,
    /// Mean days on market; `None` when every row was null.
    pub days_on_market: Option<f64>,
    /// Mean population; `None` when every row was null.
    pub population: Option<f64>,
    /// Mean density; `None` when every row was null.
    pub density: Option<f64>,
}

/// One point of a trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Date of the point.
    pub date: NaiveDate,
    /// Value, or `None` to leave a gap in the chart.
    pub days_on_market: Option<f64>,
}

/// Arithmetic mean of `values`, or `None` when there are none.
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}
