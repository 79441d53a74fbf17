//! CSV loaders for the city and national days-on-market files.
//!
//! The city file carries a fixed set of descriptive columns plus one
//! column per observation date. Date columns are recognised by their
//! header parsing as a `YYYY-MM-DD` date; every other unrecognised header
//! is metadata and ignored.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use housing_map_housing_models::{
    COL_DATE, COL_DAYS_ON_MARKET, COL_DENSITY, COL_LATITUDE, COL_LONGITUDE, COL_POPULATION,
    COL_REGION_NAME, COL_STATE_CODE, COL_STATE_NAME, CityRecord, CityTable, DATE_FORMAT,
    NationalPoint, NationalSeries,
};

use crate::HousingError;

/// Column positions of the city file's descriptive fields.
struct CityColumns {
    region_name: usize,
    state_code: usize,
    state_name: usize,
    population: usize,
    density: usize,
    longitude: usize,
    latitude: usize,
    dates: Vec<(usize, NaiveDate)>,
}

impl CityColumns {
    fn from_headers(headers: &StringRecord) -> Result<Self, HousingError> {
        let dates = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, header)| parse_date(header).map(|date| (idx, date)))
            .collect();

        Ok(Self {
            region_name: column_index(headers, COL_REGION_NAME)?,
            state_code: column_index(headers, COL_STATE_CODE)?,
            state_name: column_index(headers, COL_STATE_NAME)?,
            population: column_index(headers, COL_POPULATION)?,
            density: column_index(headers, COL_DENSITY)?,
            longitude: column_index(headers, COL_LONGITUDE)?,
            latitude: column_index(headers, COL_LATITUDE)?,
            dates,
        })
    }

    fn record(&self, row: &StringRecord) -> CityRecord {
        CityRecord {
            region_name: text_cell(row, self.region_name),
            state_code: text_cell(row, self.state_code),
            state_name: text_cell(row, self.state_name),
            population: number_cell(row, self.population),
            density: number_cell(row, self.density),
            longitude: number_cell(row, self.longitude),
            latitude: number_cell(row, self.latitude),
            days_on_market: self
                .dates
                .iter()
                .map(|(idx, date)| (*date, number_cell(row, *idx)))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}

/// Reads the city file at `path`.
///
/// # Errors
///
/// Returns [`HousingError`] if the file cannot be opened, is not valid
/// CSV, or lacks one of the required descriptive columns.
pub fn load_cities_from_path(path: &Path) -> Result<CityTable, HousingError> {
    log::debug!("Loading city data from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_cities(file)
}

/// Reads a city file from any reader.
///
/// # Errors
///
/// Returns [`HousingError`] if the input is not valid CSV or lacks one of
/// the required descriptive columns.
pub fn load_cities<R: Read>(reader: R) -> Result<CityTable, HousingError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = CityColumns::from_headers(reader.headers()?)?;
    let date_columns: Vec<NaiveDate> = columns.dates.iter().map(|(_, date)| *date).collect();

    let mut records = Vec::new();
    for row in reader.records() {
        records.push(columns.record(&row?));
    }

    log::info!(
        "Loaded {} cities with {} date columns",
        records.len(),
        date_columns.len()
    );

    Ok(CityTable {
        date_columns,
        records,
    })
}

/// Reads the national series file at `path`.
///
/// # Errors
///
/// Returns [`HousingError`] if the file cannot be opened, is not valid
/// CSV, or lacks the `Date`/`DaysOnMarket` columns.
pub fn load_national_from_path(path: &Path) -> Result<NationalSeries, HousingError> {
    log::debug!("Loading national series from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_national(file)
}

/// Reads a national series file from any reader.
///
/// Rows whose `Date` cell does not parse are skipped.
///
/// # Errors
///
/// Returns [`HousingError`] if the input is not valid CSV or lacks the
/// `Date`/`DaysOnMarket` columns.
pub fn load_national<R: Read>(reader: R) -> Result<NationalSeries, HousingError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?;
    let date_idx = column_index(headers, COL_DATE)?;
    let value_idx = column_index(headers, COL_DAYS_ON_MARKET)?;

    let mut points = Vec::new();
    for row in reader.records() {
        let row = row?;
        let Some(date) = row.get(date_idx).and_then(parse_date) else {
            log::debug!("Skipping national row with unparseable date: {row:?}");
            continue;
        };
        points.push(NationalPoint {
            date,
            days_on_market: number_cell(&row, value_idx),
        });
    }

    log::info!("Loaded {} national series points", points.len());

    Ok(NationalSeries::new(points))
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize, HousingError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| HousingError::MissingColumn {
            column: name.to_string(),
        })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn text_cell(row: &StringRecord, idx: usize) -> String {
    row.get(idx).unwrap_or_default().to_string()
}

/// Empty, missing, and non-numeric cells are all nulls.
fn number_cell(row: &StringRecord, idx: usize) -> Option<f64> {
    row.get(idx)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
