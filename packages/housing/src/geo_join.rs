//! Projection of city rows onto point geometries for one selected date.

use chrono::NaiveDate;
use geo::Point;
use housing_map_housing_models::{CityRecord, CityTable};

use crate::HousingError;

/// A city row with complete data for the selected date, placed on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct CityGeoRecord {
    /// City name.
    pub region_name: String,
    /// Two-letter state code.
    pub state_code: String,
    /// Population.
    pub population: f64,
    /// Population per square kilometre.
    pub density: f64,
    /// Location as `(longitude, latitude)`.
    pub location: Point<f64>,
    /// Days on market at the selected date.
    pub days_on_market: f64,
}

impl CityGeoRecord {
    /// Builds the record, or `None` if any required field is null. An
    /// empty city name or state code counts as null.
    #[must_use]
    pub fn from_record(record: &CityRecord, date: NaiveDate) -> Option<Self> {
        if record.region_name.is_empty() || record.state_code.is_empty() {
            return None;
        }

        Some(Self {
            region_name: record.region_name.clone(),
            state_code: record.state_code.clone(),
            population: record.population?,
            density: record.density?,
            location: Point::new(record.longitude?, record.latitude?),
            days_on_market: record.value_at(date)?,
        })
    }
}

/// Builds the marker records for `date`, silently dropping rows with an
/// empty name or state, or a null population, density, coordinate, or
/// metric.
///
/// # Errors
///
/// Returns [`HousingError::UnknownDate`] if `date` is not a date column
/// of `table`.
pub fn city_points(table: &CityTable, date: NaiveDate) -> Result<Vec<CityGeoRecord>, HousingError> {
    if !table.has_date(date) {
        return Err(HousingError::UnknownDate { date });
    }

    let points: Vec<CityGeoRecord> = table
        .records
        .iter()
        .filter_map(|r| CityGeoRecord::from_record(r, date))
        .collect();

    log::debug!(
        "Geo-joined {} of {} cities for {date} ({} dropped for missing data)",
        points.len(),
        table.records.len(),
        table.records.len() - points.len()
    );

    Ok(points)
}
