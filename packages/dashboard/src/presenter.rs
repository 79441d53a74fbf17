//! Side-panel metrics and trend chart for the active selection.
//!
//! Three mutually exclusive views: the whole country reads the national
//! series, a state re-aggregates its cities, and a city reads its own row.

use chrono::NaiveDate;
use housing_map_dashboard_models::config::NationalConfig;
use housing_map_dashboard_models::{Metric, MetricKind, MetricsPanel, Selection, TrendSeries, USA};
use housing_map_housing::HousingError;
use housing_map_housing::aggregate::{aggregate_by_state, mean_trend};
use housing_map_housing_models::{
    COL_DATE, COL_DAYS_ON_MARKET, CityTable, NationalSeries, TrendPoint,
};

use crate::format::{format_metric, format_optional};

/// Height of the trend chart in pixels.
pub const TREND_HEIGHT: u32 = 250;

/// Metrics and trend for one selection and date.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Side panel.
    pub metrics: MetricsPanel,
    /// Trend chart.
    pub trend: TrendSeries,
}

/// Computes the side panel and trend chart for `selection` at `date`.
///
/// A state or city that matches no rows renders "N/A" metrics and an
/// all-null trend.
///
/// # Errors
///
/// Returns [`HousingError::UnknownDate`] if a state or city is selected
/// and `date` is not a date column of `cities`.
pub fn present(
    cities: &CityTable,
    national: &NationalSeries,
    constants: &NationalConfig,
    selection: &Selection,
    date: NaiveDate,
) -> Result<Presentation, HousingError> {
    let (metrics, points) = match selection {
        Selection::Usa => (usa_metrics(national, constants), national_trend(national)),
        Selection::State { name } => {
            ensure_date(cities, date)?;
            state_view(cities, name, date)
        }
        Selection::City { state, city } => {
            ensure_date(cities, date)?;
            city_view(cities, state, city, date)
        }
    };

    Ok(Presentation {
        metrics,
        trend: TrendSeries {
            x: COL_DATE.to_string(),
            y: COL_DAYS_ON_MARKET.to_string(),
            height: TREND_HEIGHT,
            points,
        },
    })
}

fn ensure_date(cities: &CityTable, date: NaiveDate) -> Result<(), HousingError> {
    if cities.has_date(date) {
        Ok(())
    } else {
        Err(HousingError::UnknownDate { date })
    }
}

fn usa_metrics(national: &NationalSeries, constants: &NationalConfig) -> MetricsPanel {
    MetricsPanel {
        metrics: vec![
            Metric::new(MetricKind::Country, USA),
            Metric::new(
                MetricKind::AvgDaysOnMarket,
                format_optional(national.mean()),
            ),
            Metric::new(MetricKind::Population, format_metric(constants.population)),
            Metric::new(MetricKind::Density, format_metric(constants.density)),
        ],
    }
}

fn national_trend(national: &NationalSeries) -> Vec<TrendPoint> {
    national
        .points
        .iter()
        .map(|p| TrendPoint {
            date: p.date,
            days_on_market: p.days_on_market,
        })
        .collect()
}

fn state_view(cities: &CityTable, name: &str, date: NaiveDate) -> (MetricsPanel, Vec<TrendPoint>) {
    let aggregate = aggregate_by_state(cities.in_state(name), date)
        .into_iter()
        .next();
    if aggregate.is_none() {
        log::warn!("No cities found for state {name}");
    }

    let metrics = MetricsPanel {
        metrics: vec![
            Metric::new(MetricKind::State, name),
            Metric::new(
                MetricKind::AvgDaysOnMarket,
                format_optional(aggregate.as_ref().and_then(|a| a.days_on_market)),
            ),
            Metric::new(
                MetricKind::Population,
                format_optional(aggregate.as_ref().and_then(|a| a.population)),
            ),
            Metric::new(
                MetricKind::Density,
                format_optional(aggregate.as_ref().and_then(|a| a.density)),
            ),
        ],
    };

    (metrics, mean_trend(cities, cities.in_state(name)))
}

fn city_view(
    cities: &CityTable,
    state: &str,
    city: &str,
    date: NaiveDate,
) -> (MetricsPanel, Vec<TrendPoint>) {
    let row = cities.find_city(city, state);
    if row.is_none() {
        log::warn!("No row for city {city}, {state}");
    }

    let metrics = MetricsPanel {
        metrics: vec![
            Metric::new(MetricKind::City, city),
            Metric::new(
                MetricKind::AvgDaysOnMarket,
                format_optional(row.and_then(|r| r.value_at(date))),
            ),
            Metric::new(
                MetricKind::Population,
                format_optional(row.and_then(|r| r.population)),
            ),
            Metric::new(
                MetricKind::Density,
                format_optional(row.and_then(|r| r.density)),
            ),
        ],
    };

    let trend = cities
        .date_columns
        .iter()
        .map(|d| TrendPoint {
            date: *d,
            days_on_market: row.and_then(|r| r.value_at(*d)),
        })
        .collect();

    (metrics, trend)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use housing_map_housing_models::{CityRecord, DATE_FORMAT, NationalPoint};

    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn dates() -> Vec<NaiveDate> {
        vec![date("2024-01-01"), date("2024-02-01"), date("2024-03-01")]
    }

    fn record(region: &str, code: &str, name: &str, values: [Option<f64>; 3]) -> CityRecord {
        CityRecord {
            region_name: region.to_string(),
            state_code: code.to_string(),
            state_name: name.to_string(),
            population: Some(1_000.0),
            density: Some(250.5),
            longitude: Some(-100.0),
            latitude: Some(35.0),
            days_on_market: dates().into_iter().zip(values).collect::<BTreeMap<_, _>>(),
        }
    }

    fn cities() -> CityTable {
        CityTable {
            date_columns: dates(),
            records: vec![
                record("Fresno", "CA", "California", [Some(10.0), Some(11.0), None]),
                record("Oakland", "CA", "California", [Some(20.0), Some(13.0), None]),
                record("Austin", "TX", "Texas", [Some(30.0), None, Some(1234.5)]),
            ],
        }
    }

    fn national() -> NationalSeries {
        NationalSeries::new(vec![
            NationalPoint {
                date: date("2024-02-01"),
                days_on_market: Some(40.0),
            },
            NationalPoint {
                date: date("2024-01-01"),
                days_on_market: Some(20.0),
            },
        ])
    }

    fn constants() -> NationalConfig {
        NationalConfig {
            population: 341_814_420.0,
            density: 37.1,
        }
    }

    fn value(panel: &MetricsPanel, kind: MetricKind) -> &str {
        panel.get(kind).map(|m| m.value.as_str()).unwrap()
    }

    #[test]
    fn usa_view_uses_national_series() {
        let p = present(
            &cities(),
            &national(),
            &constants(),
            &Selection::Usa,
            date("2024-01-01"),
        )
        .unwrap();

        assert_eq!(value(&p.metrics, MetricKind::Country), "USA");
        assert_eq!(value(&p.metrics, MetricKind::AvgDaysOnMarket), "30.00");
        assert_eq!(value(&p.metrics, MetricKind::Population), "341,814,420.00");
        assert_eq!(value(&p.metrics, MetricKind::Density), "37.10");

        let trend_dates: Vec<NaiveDate> = p.trend.points.iter().map(|t| t.date).collect();
        assert_eq!(trend_dates, vec![date("2024-01-01"), date("2024-02-01")]);
        assert_eq!(p.trend.x, "Date");
        assert_eq!(p.trend.y, "DaysOnMarket");
    }

    #[test]
    fn state_view_reaggregates_subset() {
        let p = present(
            &cities(),
            &national(),
            &constants(),
            &Selection::State {
                name: "California".to_string(),
            },
            date("2024-01-01"),
        )
        .unwrap();

        assert_eq!(value(&p.metrics, MetricKind::State), "California");
        assert_eq!(value(&p.metrics, MetricKind::AvgDaysOnMarket), "15.00");
        assert_eq!(value(&p.metrics, MetricKind::Population), "1,000.00");
        assert_eq!(value(&p.metrics, MetricKind::Density), "250.50");

        let trend: Vec<Option<f64>> = p.trend.points.iter().map(|t| t.days_on_market).collect();
        assert_eq!(trend, vec![Some(15.0), Some(12.0), None]);
    }

    #[test]
    fn city_view_reads_single_row() {
        let p = present(
            &cities(),
            &national(),
            &constants(),
            &Selection::City {
                state: "Texas".to_string(),
                city: "Austin".to_string(),
            },
            date("2024-03-01"),
        )
        .unwrap();

        assert_eq!(value(&p.metrics, MetricKind::City), "Austin");
        assert_eq!(value(&p.metrics, MetricKind::AvgDaysOnMarket), "1,234.50");

        assert_eq!(p.trend.points.len(), 3);
        let trend: Vec<Option<f64>> = p.trend.points.iter().map(|t| t.days_on_market).collect();
        assert_eq!(trend, vec![Some(30.0), None, Some(1234.5)]);
    }

    #[test]
    fn unmatched_selection_renders_no_data() {
        let p = present(
            &cities(),
            &national(),
            &constants(),
            &Selection::State {
                name: "Atlantis".to_string(),
            },
            date("2024-01-01"),
        )
        .unwrap();

        assert_eq!(value(&p.metrics, MetricKind::AvgDaysOnMarket), "N/A");
        assert_eq!(p.trend.points.len(), 3);
        assert!(p.trend.points.iter().all(|t| t.days_on_market.is_none()));
    }

    #[test]
    fn state_view_rejects_unknown_date() {
        let err = present(
            &cities(),
            &national(),
            &constants(),
            &Selection::State {
                name: "Texas".to_string(),
            },
            date("2023-01-01"),
        )
        .unwrap_err();
        assert!(matches!(err, HousingError::UnknownDate { .. }));
    }
}
