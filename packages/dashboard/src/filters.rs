//! State and date dropdown options.

use chrono::NaiveDate;
use housing_map_dashboard_models::{FilterOptions, Selection, USA};
use housing_map_housing_models::{CityTable, NationalSeries};

/// Builds both dropdowns for the current selection and date.
///
/// The state dropdown lists `"USA"` then every state name alphabetically;
/// the date dropdown lists the national series dates most recent first.
/// A selection or date missing from its list points at the first entry.
#[must_use]
pub fn filter_options(
    cities: &CityTable,
    national: &NationalSeries,
    selection: &Selection,
    date: NaiveDate,
) -> FilterOptions {
    let states: Vec<String> = std::iter::once(USA.to_string())
        .chain(cities.state_names())
        .collect();
    let selected_state = states
        .iter()
        .position(|s| s == selection.state_label())
        .unwrap_or(0);

    let dates = national.dates_descending();
    let selected_date = dates.iter().position(|d| *d == date).unwrap_or(0);

    FilterOptions {
        states,
        selected_state,
        dates,
        selected_date,
    }
}
