use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{climate::Error, AppState, PrecipitationRecord};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation per date for the last year of data", content_type = "application/json", body = Vec<PrecipitationRecord>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationRecord>>, Error> {
    state.climate.precipitation().await.map(Json)
}
