use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{climate::Error, AppState, TemperatureSummaryRecord};

/// With the default `reference-window` range filter `start` is accepted but
/// not applied; the summary always starts at the reference window.
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "TMIN, TAVG and TMAX for each date from the start date", content_type = "application/json", body = Vec<TemperatureSummaryRecord>),
        (status = BAD_REQUEST, description = "Start date is not a valid date", body = crate::ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn start_range(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureSummaryRecord>>, Error> {
    state
        .climate
        .temperature_summary_from(&start)
        .await
        .map(Json)
}

/// Returns one ungrouped summary row. With the default `reference-window`
/// range filter `start` and `end` are accepted but not applied.
#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "Start date, YYYY-MM-DD"),
         ("end" = String, Path, description = "End date, YYYY-MM-DD, inclusive"),
    ),
    responses(
        (status = OK, description = "TMIN, TAVG and TMAX between the start and end date", content_type = "application/json", body = Vec<TemperatureSummaryRecord>),
        (status = BAD_REQUEST, description = "Invalid date or start after end", body = crate::ErrorResponse),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn start_end_range(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureSummaryRecord>>, Error> {
    state
        .climate
        .temperature_summary_between(&start, &end)
        .await
        .map(Json)
}
