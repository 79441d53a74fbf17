//! Turns the last map interaction or a dropdown pick into a [`Selection`].

use housing_map_dashboard_models::{Interaction, Selection};
use housing_map_housing_models::CityTable;

/// Resolves the active filter from the last map interaction.
///
/// A city click carries the city's state code, which is translated to the
/// display state name through the city table. An untranslatable code is
/// kept as-is and later renders as "no data".
#[must_use]
pub fn resolve_selection(interaction: &Interaction, cities: &CityTable) -> Selection {
    match interaction {
        Interaction::None => Selection::Usa,
        Interaction::CityClick {
            region_name,
            state_code,
        } => {
            let state = cities.state_name_for_code(state_code).map_or_else(
                || {
                    log::warn!("No state name for code {state_code}");
                    state_code.clone()
                },
                str::to_string,
            );

            if region_name.is_empty() {
                Selection::State { name: state }
            } else {
                Selection::City {
                    state,
                    city: region_name.clone(),
                }
            }
        }
        Interaction::PolygonClick { name } => Selection::State { name: name.clone() },
    }
}

/// Resolves the active filter for one cycle; an explicit state dropdown
/// value wins over the map interaction.
#[must_use]
pub fn resolve_cycle_selection(
    interaction: &Interaction,
    state_filter: Option<&str>,
    city_filter: Option<&str>,
    cities: &CityTable,
) -> Selection {
    state_filter.map_or_else(
        || resolve_selection(interaction, cities),
        |state| Selection::from_filters(state, city_filter.unwrap_or_default()),
    )
}
