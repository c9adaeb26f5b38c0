use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::auth::RequireAdmin;
use crate::dates::parse_day;
use crate::error::AppError;
use crate::handlers::parse_uuid;
use crate::models::UnavailableDatesRequest;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_unavailable).post(mark_unavailable).delete(unmark_unavailable),
        )
        .route("/check", get(check_availability))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckQuery {
    car_id: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    exclude_booking_id: Option<String>,
    current_start_date: Option<String>,
    current_end_date: Option<String>,
}

/// For the booking form: is this car free for the date range?
async fn check_availability(
    State(state): State<AppState>,
    Query(query): Query<CheckQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (Some(car_id_raw), Some(start_raw), Some(end_raw)) =
        (&query.car_id, &query.start_date, &query.end_date)
    else {
        return Err(AppError::Validation("carId, startDate, endDate required".to_string()));
    };

    // Edit-form optimization: an unchanged range cannot conflict with
    // anything new, so skip the query. Compared as raw strings, the way the
    // form sends them.
    if let (Some(_), Some(current_start), Some(current_end)) = (
        &query.exclude_booking_id,
        &query.current_start_date,
        &query.current_end_date,
    ) {
        if current_start == start_raw && current_end == end_raw {
            return Ok(Json(json!({ "available": true })));
        }
    }

    let car_id = parse_uuid(car_id_raw, "carId")?;
    let start = parse_day(start_raw)
        .ok_or_else(|| AppError::Validation("Invalid startDate".to_string()))?;
    let end =
        parse_day(end_raw).ok_or_else(|| AppError::Validation("Invalid endDate".to_string()))?;

    // Inverted ranges span no days; reported available rather than rejected.
    if end < start {
        return Ok(Json(json!({ "available": true })));
    }

    let exclude = query
        .exclude_booking_id
        .as_deref()
        .map(|raw| parse_uuid(raw, "excludeBookingId"))
        .transpose()?;

    let available = state.availability.is_available(car_id, start, end, exclude).await?;
    Ok(Json(json!({ "available": available })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MonthQuery {
    car_id: Option<String>,
    year: Option<i32>,
    month: Option<u32>,
}

async fn list_unavailable(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (Some(car_id_raw), Some(year), Some(month)) = (&query.car_id, query.year, query.month)
    else {
        return Err(AppError::Validation("carId, year, month required".to_string()));
    };

    let car_id = parse_uuid(car_id_raw, "carId")?;
    let dates = state.availability.list_month(car_id, year, month).await?;
    let formatted: Vec<String> = dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();

    Ok(Json(json!({ "dates": formatted })))
}

fn parse_request(body: &UnavailableDatesRequest) -> Result<(uuid::Uuid, Vec<NaiveDate>), AppError> {
    let (Some(car_id_raw), Some(dates)) = (&body.car_id, &body.dates) else {
        return Err(AppError::Validation("carId and dates array required".to_string()));
    };
    if dates.is_empty() {
        return Err(AppError::Validation("carId and dates array required".to_string()));
    }

    let car_id = parse_uuid(car_id_raw, "carId")?;
    let days = dates
        .iter()
        .map(|raw| {
            parse_day(raw).ok_or_else(|| AppError::Validation(format!("Invalid date: {raw}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((car_id, days))
}

async fn mark_unavailable(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<UnavailableDatesRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (car_id, days) = parse_request(&body)?;
    let added = state.availability.mark_manual(car_id, &days).await?;
    Ok(Json(json!({ "added": added })))
}

async fn unmark_unavailable(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<UnavailableDatesRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (car_id, days) = parse_request(&body)?;
    let removed = state.availability.unmark_manual(car_id, &days).await?;
    Ok(Json(json!({ "removed": removed })))
}
