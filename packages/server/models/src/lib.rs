#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the housing map server.
//!
//! Responses that carry a whole page reuse
//! [`housing_map_dashboard_models::ViewModel`] directly; the types here
//! only describe what the front end sends and the small envelopes around
//! it.

use chrono::NaiveDate;
use housing_map_dashboard_models::Interaction;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with any non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Human-readable description.
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query parameters for the view endpoint (the dropdown path).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQueryParams {
    /// State dropdown value; `"USA"` or a state name.
    pub state: Option<String>,
    /// City within the state.
    pub city: Option<String>,
    /// Date to render (`YYYY-MM-DD`); defaults to the most recent.
    pub date: Option<NaiveDate>,
}

/// Query parameters for the map endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapQueryParams {
    /// Date to render (`YYYY-MM-DD`); defaults to the most recent.
    pub date: Option<NaiveDate>,
}

/// Body of `POST /api/interaction`: the `interaction` property of the
/// clicked map feature, echoed back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRequest {
    /// Last map interaction; absent means no interaction.
    #[serde(default)]
    pub interaction: Interaction,
    /// Date to render; defaults to the most recent.
    pub date: Option<NaiveDate>,
}

/// Body of `POST /api/click`: a raw clicked coordinate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickRequest {
    /// Longitude.
    pub lng: f64,
    /// Latitude.
    pub lat: f64,
    /// Date to render; defaults to the most recent.
    pub date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interaction_request_defaults_to_none() {
        let req: InteractionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.interaction, Interaction::None);
        assert!(req.date.is_none());
    }

    #[test]
    fn interaction_request_reads_tagged_click() {
        let req: InteractionRequest = serde_json::from_str(
            r#"{"interaction": {"kind": "city_click", "regionName": "Austin", "stateCode": "TX"}, "date": "2024-01-01"}"#,
        )
        .unwrap();

        assert_eq!(
            req.interaction,
            Interaction::CityClick {
                region_name: "Austin".to_string(),
                state_code: "TX".to_string(),
            }
        );
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn unknown_interaction_kind_is_rejected() {
        let req = serde_json::from_str::<InteractionRequest>(
            r#"{"interaction": {"kind": "hover"}}"#,
        );
        assert!(req.is_err());
    }

    #[test]
    fn api_error_serializes_error_field() {
        let json = serde_json::to_value(ApiError::new("boom")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }
}
