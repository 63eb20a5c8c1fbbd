use crate::{
    climate::{self, Climate, RangeFilter},
    db::ClimateAccess,
    index_handler, precipitation,
    reference_window::ReferenceWindow,
    routes, start_end_range, start_range, stations, tobs, PrecipitationRecord, StationRecord,
    TemperatureObservationRecord, TemperatureSummaryRecord,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub remote_url: String,
    pub climate: Arc<Climate>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::api::precipitation::precipitation,
        routes::api::stations::stations,
        routes::api::tobs::tobs,
        routes::api::temperature::start_range,
        routes::api::temperature::start_end_range,
    ),
    components(
        schemas(
                PrecipitationRecord,
                StationRecord,
                TemperatureObservationRecord,
                TemperatureSummaryRecord,
                climate::ErrorResponse,
            )
    ),
    tags(
        (name = "hawaii climate api", description = "a read-only RESTful api over historical Honolulu, Hawaii weather observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(
    remote_url: String,
    database: String,
    range_filter: RangeFilter,
) -> Result<AppState, anyhow::Error> {
    let climate_db = Arc::new(
        ClimateAccess::new(&database)
            .await
            .map_err(|e| anyhow!("error opening climate dataset: {}", e))?,
    );

    // Computed once; every request reads this same window until restart
    let window = ReferenceWindow::compute(climate_db.as_ref())
        .await
        .map_err(|e| anyhow!("error computing reference window: {}", e))?;

    Ok(AppState {
        remote_url,
        climate: Arc::new(Climate::new(climate_db, window, range_filter)),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        // Static segments take priority over the `{start}` capture
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        .route("/api/v1.0/{start}", get(start_range))
        .route("/api/v1.0/{start}/{end}", get(start_end_range))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
