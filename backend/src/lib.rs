pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod store;
pub mod test_util;
pub mod users;

pub use config::Config;
pub use error::Error;
pub use store::{InMemoryUserStore, UserStore};
pub use users::UserService;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{middleware, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CorsConfig;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Query/mutation service owning the user collection.
    pub users: UserService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn UserStore>) -> Self {
        Self {
            config,
            users: UserService::new(store),
        }
    }

    /// State backed by an in-memory store, seeded according to `config.seed`.
    pub fn in_memory(config: Config) -> Self {
        let store = if config.seed.enabled {
            InMemoryUserStore::with_seed_data()
        } else {
            InMemoryUserStore::new()
        };
        Self::new(config, Arc::new(store))
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match config.allowed_origins() {
        None => layer.allow_origin(Any),
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", o);
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}

/// Build the full application router: `/health`, `/metrics` and `/api/users*`.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::users::router())
        .layer(middleware::from_fn(logging::request_logger))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
