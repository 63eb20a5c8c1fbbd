use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::{templates::home_page, AppState};

/// Handler for the index page listing the available routes (GET /)
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let climate = &state.climate;
    Html(home_page(&state.remote_url, climate.window(), climate.range_filter()).into_string())
}
