pub mod auth;
pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod handlers;
pub mod models;
pub mod reports;
pub mod repository;
pub mod service;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;

use state::AppState;

/// Full API router. CORS is layered on by the binary, where config lives.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api/auth", handlers::auth::router())
        .nest("/api/cars", handlers::cars::router())
        .nest("/api/availability", handlers::availability::router())
        .nest("/api/bookings", handlers::bookings::router())
        .nest("/api/dashboard", handlers::dashboard::router())
        .nest("/api/reports", handlers::reports::router())
        .nest("/api", handlers::health::router())
        .nest_service("/uploads", ServeDir::new(state.uploads_dir.clone()))
        .with_state(state)
}
