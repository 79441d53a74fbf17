//! Per-state means of days on market, population and density.
//!
//! Each column's mean skips nulls on its own, so a city with a missing
//! metric still contributes its population and density.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use housing_map_housing_models::{CityRecord, CityTable, StateAggregate, TrendPoint};

use crate::HousingError;

/// Running sum and count of the non-null values of one column.
#[derive(Debug, Default, Clone, Copy)]
struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct StateAccumulator {
    days_on_market: MeanAccumulator,
    population: MeanAccumulator,
    density: MeanAccumulator,
}

/// Groups `table` by state code and averages each column at `date`.
///
/// The result is ordered by state code and does not depend on row order.
///
/// # Errors
///
/// Returns [`HousingError::UnknownDate`] if `date` is not a date column
/// of `table`.
pub fn state_level_data(
    table: &CityTable,
    date: NaiveDate,
) -> Result<Vec<StateAggregate>, HousingError> {
    if !table.has_date(date) {
        return Err(HousingError::UnknownDate { date });
    }

    Ok(aggregate_by_state(&table.records, date))
}

/// Groups `rows` by state code and averages each column at `date`. Rows
/// with an empty state code belong to no group.
pub fn aggregate_by_state<'a>(
    rows: impl IntoIterator<Item = &'a CityRecord>,
    date: NaiveDate,
) -> Vec<StateAggregate> {
    let mut groups: BTreeMap<&str, StateAccumulator> = BTreeMap::new();

    for row in rows.into_iter().filter(|r| !r.state_code.is_empty()) {
        let acc = groups.entry(row.state_code.as_str()).or_default();
        acc.days_on_market.push(row.value_at(date));
        acc.population.push(row.population);
        acc.density.push(row.density);
    }

    groups
        .into_iter()
        .map(|(state_code, acc)| StateAggregate {
            state_code: state_code.to_string(),
            days_on_market: acc.days_on_market.mean(),
            population: acc.population.mean(),
            density: acc.density.mean(),
        })
        .collect()
}

/// Averages every date column across `rows`, one point per date column of
/// `table` in schema order.
pub fn mean_trend<'a>(
    table: &CityTable,
    rows: impl IntoIterator<Item = &'a CityRecord>,
) -> Vec<TrendPoint> {
    let mut columns = vec![MeanAccumulator::default(); table.date_columns.len()];

    for row in rows {
        for (acc, date) in columns.iter_mut().zip(&table.date_columns) {
            acc.push(row.value_at(*date));
        }
    }

    table
        .date_columns
        .iter()
        .zip(columns)
        .map(|(date, acc)| TrendPoint {
            date: *date,
            days_on_market: acc.mean(),
        })
        .collect()
}
