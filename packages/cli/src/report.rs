//! Plain-text rendering of a [`ViewModel`] for the terminal.

use std::fmt::Write as _;

use housing_map_dashboard::Dataset;
use housing_map_dashboard::format::format_optional;
use housing_map_dashboard_models::ViewModel;

/// Formats the header, side panel and trend of `view` as text.
#[must_use]
pub fn format_view(view: &ViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}", view.subtitle);
    let _ = writeln!(out, "Date: {}", view.date);
    let _ = writeln!(out);

    let width = view
        .metrics
        .metrics
        .iter()
        .map(|m| m.label.len())
        .max()
        .unwrap_or(0);
    for metric in &view.metrics.metrics {
        let _ = writeln!(out, "{:<width$}  {}", metric.label, metric.value);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{:<10}  {}", view.trend.x, view.trend.y);
    for point in &view.trend.points {
        let _ = writeln!(
            out,
            "{:<10}  {}",
            point.date.to_string(),
            format_optional(point.days_on_market)
        );
    }

    out
}

/// Summary of what one cycle loaded.
#[must_use]
pub fn loaded_message(dataset: &Dataset) -> String {
    format!(
        "Loaded {} cities, {} national dates and {} state boundaries",
        dataset.cities.records.len(),
        dataset.national.points.len(),
        dataset.boundaries.len()
    )
}
