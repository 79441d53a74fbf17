#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Days-on-market dashboard cycle.
//!
//! One cycle loads the data files and state boundaries, then renders a
//! [`ViewModel`] for a selection and date: the choropleth and marker map,
//! the dropdown options, the side-panel metrics, and the trend chart.
//! Every user interaction runs a fresh cycle; nothing is cached between
//! cycles.

pub mod config;
pub mod filters;
pub mod format;
pub mod map;
pub mod presenter;
pub mod selection;

use std::path::Path;

use chrono::NaiveDate;
use housing_map_dashboard_models::config::DashboardConfig;
use housing_map_dashboard_models::map::MapArtifact;
use housing_map_dashboard_models::{Interaction, Selection, ViewModel};
use housing_map_geography::{BoundaryPolygon, GeoError, fetch::fetch_boundaries};
use housing_map_housing::aggregate::state_level_data;
use housing_map_housing::geo_join::city_points;
use housing_map_housing::HousingError;
use housing_map_housing::loader::{load_cities_from_path, load_national_from_path};
use housing_map_housing_models::{CityTable, NationalSeries};
use thiserror::Error;

use crate::map::{MapHitTester, compose_map};

/// Errors that can abort a dashboard cycle.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Loading or shaping the housing data failed.
    #[error(transparent)]
    Housing(#[from] HousingError),

    /// Reading the state boundaries failed.
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// The configuration is malformed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The national series has no dates to render.
    #[error("The national series has no dates")]
    NoDates,
}

impl DashboardError {
    /// Whether the error was caused by the request rather than by the
    /// data sources.
    #[must_use]
    pub const fn is_bad_request(&self) -> bool {
        matches!(self, Self::Housing(HousingError::UnknownDate { .. }))
    }
}

/// Everything one cycle reads: both CSV files and the state boundaries.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// City rows.
    pub cities: CityTable,
    /// National series.
    pub national: NationalSeries,
    /// State outlines.
    pub boundaries: Vec<BoundaryPolygon>,
}

impl Dataset {
    /// Loads both CSV files and fetches the state boundaries.
    ///
    /// The boundary read completes (or fails) before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] if a file cannot be read or parsed, or
    /// if the boundary fetch fails.
    pub async fn load(
        config: &DashboardConfig,
        client: &reqwest::Client,
    ) -> Result<Self, DashboardError> {
        let cities = load_cities_from_path(Path::new(&config.data.cities_csv))?;
        let national = load_national_from_path(Path::new(&config.data.national_csv))?;
        let boundaries = fetch_boundaries(client, &config.boundaries).await?;

        Ok(Self {
            cities,
            national,
            boundaries,
        })
    }

    /// The date to render: `requested`, or the most recent national date.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::NoDates`] if nothing was requested and the
    /// national series is empty.
    pub fn resolve_date(&self, requested: Option<NaiveDate>) -> Result<NaiveDate, DashboardError> {
        requested
            .or_else(|| self.national.latest_date())
            .ok_or(DashboardError::NoDates)
    }

    /// Builds the map for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] if `date` is not a city date column.
    pub fn map(
        &self,
        config: &DashboardConfig,
        date: NaiveDate,
    ) -> Result<MapArtifact, DashboardError> {
        let cities = city_points(&self.cities, date)?;
        let states = state_level_data(&self.cities, date)?;
        Ok(compose_map(&config.map, &self.boundaries, &states, &cities))
    }

    /// Resolves a clicked map coordinate into the interaction it produces
    /// on the map rendered for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError`] if `date` is not a city date column.
    pub fn interaction_at(
        &self,
        config: &DashboardConfig,
        date: NaiveDate,
        lng: f64,
        lat: f64,
    ) -> Result<Interaction, DashboardError> {
        let cities = city_points(&self.cities, date)?;
        let tester = MapHitTester::new(&cities, &self.boundaries, config.map.marker_radius_scale);
        Ok(tester.interaction_at(lng, lat))
    }
}

/// Renders the full page for `selection` at `date` (or the most recent
/// date when `None`).
///
/// # Errors
///
/// Returns [`DashboardError`] if the date is not a city date column or no
/// date is available.
pub fn render(
    dataset: &Dataset,
    config: &DashboardConfig,
    selection: &Selection,
    date: Option<NaiveDate>,
) -> Result<ViewModel, DashboardError> {
    let date = dataset.resolve_date(date)?;
    log::debug!("Rendering {selection:?} for {date}");

    let map = dataset.map(config, date)?;
    let presentation = presenter::present(
        &dataset.cities,
        &dataset.national,
        &config.national,
        selection,
        date,
    )?;
    let filters = filters::filter_options(&dataset.cities, &dataset.national, selection, date);

    Ok(ViewModel {
        title: config.title.clone(),
        subtitle: config.subtitle.clone(),
        selection: selection.clone(),
        date,
        filters,
        map,
        metrics: presentation.metrics,
        trend: presentation.trend,
    })
}

/// Runs one full cycle from a UI event: resolves the selection from the
/// dropdowns or the last map interaction, then renders.
///
/// # Errors
///
/// Returns [`DashboardError`] under the same conditions as [`render`].
pub fn run_cycle(
    dataset: &Dataset,
    config: &DashboardConfig,
    interaction: &Interaction,
    state_filter: Option<&str>,
    city_filter: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<ViewModel, DashboardError> {
    let selection = selection::resolve_cycle_selection(
        interaction,
        state_filter,
        city_filter,
        &dataset.cities,
    );
    render(dataset, config, &selection, date)
}
