use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{climate::Error, AppState, TemperatureObservationRecord};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station for the last year of data", content_type = "application/json", body = Vec<TemperatureObservationRecord>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read the dataset", body = crate::ErrorResponse)
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TemperatureObservationRecord>>, Error> {
    state
        .climate
        .most_active_station_temperatures()
        .await
        .map(Json)
}
