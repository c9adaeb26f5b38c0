use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::auth::RequireAdmin;
use crate::dates::parse_day;
use crate::error::AppError;
use crate::handlers::parse_uuid;
use crate::models::booking::{STATUS_CONFIRMED, STATUS_PENDING};
use crate::models::{
    BookingChanges, BookingWithCar, CreateBookingRequest, NewBooking, UpdateBookingRequest,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings).post(create_booking))
        .route("/:id", axum::routing::put(update_booking).delete(delete_booking))
}

fn validate_status(status: &str) -> Result<(), AppError> {
    if status != STATUS_PENDING && status != STATUS_CONFIRMED {
        return Err(AppError::Validation(format!("Invalid status: {status}")));
    }
    Ok(())
}

async fn list_bookings(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<BookingWithCar>>, AppError> {
    Ok(Json(state.bookings.list().await?))
}

async fn create_booking(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingWithCar>), AppError> {
    let customer_name = body.customer_name.as_deref().unwrap_or("").trim().to_string();
    let (Some(car_id_raw), Some(start_raw), Some(end_raw)) =
        (&body.car_id, &body.start_date, &body.end_date)
    else {
        return Err(AppError::Validation(
            "carId, customerName, startDate, endDate required".to_string(),
        ));
    };
    if customer_name.is_empty() {
        return Err(AppError::Validation(
            "carId, customerName, startDate, endDate required".to_string(),
        ));
    }

    let car_id = parse_uuid(car_id_raw, "carId")?;
    let start_date = parse_day(start_raw)
        .ok_or_else(|| AppError::Validation("Invalid startDate".to_string()))?;
    let end_date = parse_day(end_raw)
        .ok_or_else(|| AppError::Validation("Invalid endDate".to_string()))?;

    let status = body.status.clone().unwrap_or_else(|| STATUS_PENDING.to_string());
    validate_status(&status)?;

    let booking = state
        .bookings
        .create(NewBooking {
            car_id,
            customer_name,
            contact: body.contact.clone().unwrap_or_default(),
            start_date,
            end_date,
            total_price: body.total_price,
            status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

async fn update_booking(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBookingRequest>,
) -> Result<Json<BookingWithCar>, AppError> {
    let start_date = body
        .start_date
        .as_deref()
        .map(|raw| parse_day(raw).ok_or_else(|| AppError::Validation("Invalid startDate".to_string())))
        .transpose()?;
    let end_date = body
        .end_date
        .as_deref()
        .map(|raw| parse_day(raw).ok_or_else(|| AppError::Validation("Invalid endDate".to_string())))
        .transpose()?;
    if let Some(status) = body.status.as_deref() {
        validate_status(status)?;
    }

    let booking = state
        .bookings
        .update(
            id,
            BookingChanges {
                customer_name: body.customer_name,
                contact: body.contact,
                start_date,
                end_date,
                total_price: body.total_price,
                status: body.status,
            },
        )
        .await?;

    Ok(Json(booking))
}

async fn delete_booking(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.bookings.delete(id).await?;
    Ok(Json(json!({ "success": true })))
}
