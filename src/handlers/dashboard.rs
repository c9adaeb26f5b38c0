use axum::{extract::State, response::Json, routing::get, Router};

use crate::auth::RequireAdmin;
use crate::error::AppError;
use crate::models::BookingWithCar;
use crate::service::dashboard::{ChartSeries, DashboardStats, RevenueSeries, StatusSeries};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/charts/monthly-bookings", get(monthly_bookings))
        .route("/charts/booking-growth", get(booking_growth))
        .route("/charts/most-rented-cars", get(most_rented_cars))
        .route("/charts/monthly-bookings-by-status", get(monthly_bookings_by_status))
        .route("/charts/monthly-revenue", get(monthly_revenue))
        .route("/upcoming-bookings", get(upcoming_bookings))
        .route("/upcoming-returns", get(upcoming_returns))
        .route("/recent-bookings", get(recent_bookings))
}

async fn stats(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<DashboardStats>, AppError> {
    Ok(Json(state.dashboard.stats().await?))
}

async fn monthly_bookings(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<ChartSeries>, AppError> {
    Ok(Json(state.dashboard.monthly_bookings(12).await?))
}

async fn booking_growth(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<ChartSeries>, AppError> {
    Ok(Json(state.dashboard.monthly_bookings(6).await?))
}

async fn most_rented_cars(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<ChartSeries>, AppError> {
    Ok(Json(state.dashboard.most_rented_cars().await?))
}

async fn monthly_bookings_by_status(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<StatusSeries>, AppError> {
    Ok(Json(state.dashboard.monthly_bookings_by_status().await?))
}

async fn monthly_revenue(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<RevenueSeries>, AppError> {
    Ok(Json(state.dashboard.monthly_revenue().await?))
}

async fn upcoming_bookings(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<BookingWithCar>>, AppError> {
    Ok(Json(state.dashboard.upcoming_bookings().await?))
}

async fn upcoming_returns(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<BookingWithCar>>, AppError> {
    Ok(Json(state.dashboard.upcoming_returns().await?))
}

async fn recent_bookings(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<BookingWithCar>>, AppError> {
    Ok(Json(state.dashboard.recent_bookings().await?))
}
