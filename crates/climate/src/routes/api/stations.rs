use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{climate::Error, AppState, StationRecord};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Reporting weather stations and their locations", content_type = "application/json", body = Vec<StationRecord>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationRecord>>, Error> {
    state.climate.stations().await.map(Json)
}
