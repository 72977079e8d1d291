//! Fitness Tracker Server Library
//!
//! Users, activities, workout routines and the links between routines and activities,
//! stored in SQLite and served over a JSON HTTP API.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use db::{open_database, open_in_memory, Db};
pub use error::{AppError, Result};

use axum::{
    http::{HeaderValue, Method},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Self {
        Self { db, config }
    }
}

/// Build the API router with CORS and request tracing
pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health_check))
        .route("/api/users/register", post(routes::register_user))
        .route("/api/users/login", post(routes::login_user))
        .route("/api/users/me", get(routes::current_user))
        .route("/api/users/:username/routines", get(routes::user_routines))
        .route(
            "/api/activities",
            get(routes::list_activities).post(routes::create_activity),
        )
        .route("/api/activities/:activity_id", patch(routes::update_activity))
        .route(
            "/api/routines",
            get(routes::list_public_routines).post(routes::create_routine),
        )
        .route(
            "/api/routines/:routine_id",
            patch(routes::update_routine).delete(routes::delete_routine),
        )
        .route(
            "/api/routines/:routine_id/activities",
            post(routes::add_activity_to_routine),
        )
        .route(
            "/api/routine_activities/:routine_activity_id",
            patch(routes::update_routine_activity).delete(routes::delete_routine_activity),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
