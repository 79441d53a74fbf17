//! HTTP handler functions for the housing map API.

use actix_web::{HttpResponse, web};
use housing_map_dashboard::filters::filter_options;
use housing_map_dashboard::{Dataset, DashboardError, run_cycle};
use housing_map_dashboard_models::{Interaction, Selection};
use housing_map_server_models::{
    ApiError, ApiHealth, ClickRequest, InteractionRequest, MapQueryParams, ViewQueryParams,
};
use serde::Serialize;

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/filters`
///
/// Returns the state and date dropdown options for the initial page.
pub async fn filters(state: web::Data<AppState>) -> HttpResponse {
    let result = async {
        let dataset = load(&state).await?;
        let date = dataset.resolve_date(None)?;
        Ok::<_, DashboardError>(filter_options(
            &dataset.cities,
            &dataset.national,
            &Selection::Usa,
            date,
        ))
    }
    .await;

    respond(result)
}

/// `GET /api/map`
///
/// Returns the choropleth and marker map for the requested date.
pub async fn map(state: web::Data<AppState>, params: web::Query<MapQueryParams>) -> HttpResponse {
    let result = async {
        let dataset = load(&state).await?;
        let date = dataset.resolve_date(params.date)?;
        dataset.map(&state.config, date)
    }
    .await;

    respond(result)
}

/// `GET /api/view`
///
/// Renders the page for the dropdown values.
pub async fn view(state: web::Data<AppState>, params: web::Query<ViewQueryParams>) -> HttpResponse {
    let result = async {
        let dataset = load(&state).await?;
        run_cycle(
            &dataset,
            &state.config,
            &Interaction::None,
            params.state.as_deref(),
            params.city.as_deref(),
            params.date,
        )
    }
    .await;

    respond(result)
}

/// `POST /api/interaction`
///
/// Renders the page for the `interaction` property of a clicked feature.
pub async fn interaction(
    state: web::Data<AppState>,
    body: web::Json<InteractionRequest>,
) -> HttpResponse {
    let result = async {
        let dataset = load(&state).await?;
        run_cycle(
            &dataset,
            &state.config,
            &body.interaction,
            None,
            None,
            body.date,
        )
    }
    .await;

    respond(result)
}

/// `POST /api/click`
///
/// Hit-tests a clicked coordinate against the rendered map, then renders
/// the page for whatever was hit.
pub async fn click(state: web::Data<AppState>, body: web::Json<ClickRequest>) -> HttpResponse {
    let result = async {
        let dataset = load(&state).await?;
        let date = dataset.resolve_date(body.date)?;
        let interaction = dataset.interaction_at(&state.config, date, body.lng, body.lat)?;
        log::debug!("Click at ({}, {}) resolved to {interaction:?}", body.lng, body.lat);
        run_cycle(&dataset, &state.config, &interaction, None, None, Some(date))
    }
    .await;

    respond(result)
}

async fn load(state: &AppState) -> Result<Dataset, DashboardError> {
    Dataset::load(&state.config, &state.client).await
}

fn respond<T: Serialize>(result: Result<T, DashboardError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) if e.is_bad_request() => {
            log::warn!("Rejected request: {e}");
            HttpResponse::BadRequest().json(ApiError::new(e.to_string()))
        }
        Err(e) => {
            log::error!("Failed to render dashboard: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(e.to_string()))
        }
    }
}
