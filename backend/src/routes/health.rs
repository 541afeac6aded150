use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    let users = match state.users.count().await {
        Ok(count) => count,
        Err(e) => return e.into_response(),
    };
    let version = env!("CARGO_PKG_VERSION");
    let body = format!(
        "# HELP user_directory_up Whether the service is up\n\
         # TYPE user_directory_up gauge\n\
         user_directory_up 1\n\
         # HELP user_directory_info Service information\n\
         # TYPE user_directory_info gauge\n\
         user_directory_info{{version=\"{}\"}} 1\n\
         # HELP user_directory_users_total Users currently stored\n\
         # TYPE user_directory_users_total gauge\n\
         user_directory_users_total {}\n",
        version, users
    );
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
}
