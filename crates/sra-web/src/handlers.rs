use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::page;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        app: sra_core::APP_NAME,
        version: sra_core::APP_VERSION,
    })
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render_index(&state.config))
}
