#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the housing map dashboard.
//!
//! Every request that renders anything runs a full dashboard cycle: both
//! CSV files are read, the state boundaries are fetched, and the page is
//! rendered from scratch. The only state shared between requests is the
//! configuration and the HTTP client used for the boundary fetch.

mod handlers;
pub mod interactive;

use std::path::Path;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use housing_map_dashboard_models::config::DashboardConfig;
use housing_map_server_models::ApiError;

/// Default bind address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port when `PORT` is unset or invalid.
pub const DEFAULT_PORT: u16 = 8080;

/// Shared application state.
pub struct AppState {
    /// Dashboard configuration, read once at startup.
    pub config: DashboardConfig,
    /// Client for the boundary fetch.
    pub client: reqwest::Client,
}

/// Address the HTTP server listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindAddress {
    /// Host or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl BindAddress {
    /// Reads `BIND_ADDR` and `PORT`, falling back to `127.0.0.1:8080`.
    #[must_use]
    pub fn from_env() -> Self {
        let host = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Self { host, port }
    }
}

impl Default for BindAddress {
    fn default() -> Self {
        Self {
            host: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Registers the `/api` routes and the JSON error handlers for malformed
/// query strings and bodies.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiError::new(err.to_string()));
        error::InternalError::from_response(err, response).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ApiError::new(err.to_string()));
        error::InternalError::from_response(err, response).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/filters", web::get().to(handlers::filters))
            .route("/map", web::get().to(handlers::map))
            .route("/view", web::get().to(handlers::view))
            .route("/interaction", web::post().to(handlers::interaction))
            .route("/click", web::post().to(handlers::click)),
    );
}

/// Starts the dashboard API server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DashboardConfig, bind: BindAddress) -> std::io::Result<()> {
    let static_dir = config
        .server
        .static_dir
        .clone()
        .filter(|dir| Path::new(dir).is_dir());
    match &static_dir {
        Some(dir) => log::info!("Serving front end from {dir}"),
        None => log::info!("No front end directory found, serving the API only"),
    }

    let state = web::Data::new(AppState {
        config,
        client: reqwest::Client::new(),
    });

    log::info!("Starting server on {}:{}", bind.host, bind.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();
        let static_dir = static_dir.clone();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            .configure(move |cfg| {
                if let Some(dir) = static_dir {
                    cfg.service(Files::new("/", dir).index_file("index.html"));
                }
            })
    })
    .bind((bind.host, bind.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use housing_map_dashboard::config::merge_config;
    use housing_map_dashboard_models::ViewModel;
    use housing_map_server_models::ApiHealth;

    use super::*;

    struct Fixture {
        dir: std::path::PathBuf,
        config: DashboardConfig,
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.dir).ok();
        }
    }

    fn fixture(name: &str) -> Fixture {
        let dir = std::env::temp_dir().join(format!(
            "housing_map_server_{name}_{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let cities = dir.join("cities.csv");
        let national = dir.join("national.csv");
        let states = dir.join("states.json");
        std::fs::write(
            &cities,
            "RegionName,StateName,2024-01-01,2024-02-01,state_name,population,density,lng,lat\n\
             Fresno,CA,10,12,California,540000,1900,-119.79,36.74\n\
             Oakland,CA,20,14,California,430000,2900,-122.27,37.80\n\
             Austin,TX,30,,Texas,964000,1163.2,-97.74,30.27\n",
        )
        .unwrap();
        std::fs::write(
            &national,
            "Date,DaysOnMarket\n2024-01-01,25\n2024-02-01,27\n",
        )
        .unwrap();
        std::fs::write(
            &states,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "id": "TX", "properties": {"name": "Texas"},
                 "geometry": {"type": "Polygon", "coordinates": [[[-106.6, 25.8], [-93.5, 25.8], [-93.5, 36.5], [-106.6, 36.5], [-106.6, 25.8]]]}}
            ]}"#,
        )
        .unwrap();

        let config = merge_config(&format!(
            "[data]\ncities_csv = {:?}\nnational_csv = {:?}\n\n[boundaries]\ntype = \"file\"\npath = {:?}\n",
            cities.to_string_lossy(),
            national.to_string_lossy(),
            states.to_string_lossy(),
        ))
        .unwrap();

        Fixture { dir, config }
    }

    fn state(config: DashboardConfig) -> web::Data<AppState> {
        web::Data::new(AppState {
            config,
            client: reqwest::Client::new(),
        })
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let fixture = fixture("health");
        let app = test::init_service(
            App::new()
                .app_data(state(fixture.config.clone()))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: ApiHealth = test::call_and_read_body_json(&app, req).await;

        assert!(body.healthy);
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[actix_web::test]
    async fn view_renders_selected_state() {
        let fixture = fixture("view");
        let app = test::init_service(
            App::new()
                .app_data(state(fixture.config.clone()))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/view?state=California&date=2024-01-01")
            .to_request();
        let view: ViewModel = test::call_and_read_body_json(&app, req).await;

        assert_eq!(view.selection.state_label(), "California");
        assert_eq!(view.filters.selected_state, 1);
        assert_eq!(view.filters.selected_date, 1);
    }

    #[actix_web::test]
    async fn click_inside_polygon_selects_state() {
        let fixture = fixture("click");
        let app = test::init_service(
            App::new()
                .app_data(state(fixture.config.clone()))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/click")
            .set_json(serde_json::json!({"lng": -100.0, "lat": 33.0}))
            .to_request();
        let view: ViewModel = test::call_and_read_body_json(&app, req).await;

        assert_eq!(view.selection.state_label(), "Texas");
        assert_eq!(view.date, chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    }

    #[actix_web::test]
    async fn unknown_date_is_bad_request() {
        let fixture = fixture("unknown_date");
        let app = test::init_service(
            App::new()
                .app_data(state(fixture.config.clone()))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/map?date=1999-01-01")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_interaction_is_bad_request() {
        let fixture = fixture("malformed");
        let app = test::init_service(
            App::new()
                .app_data(state(fixture.config.clone()))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/interaction")
            .set_json(serde_json::json!({"interaction": {"kind": "hover"}}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_data_file_is_server_error() {
        let fixture = fixture("missing");
        let mut config = fixture.config.clone();
        config.data.cities_csv = "/nonexistent/cities.csv".to_string();
        let app = test::init_service(
            App::new()
                .app_data(state(config))
                .configure(configure_api),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/filters").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
