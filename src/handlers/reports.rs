use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::auth::RequireAdmin;
use crate::dates::parse_day;
use crate::error::AppError;
use crate::handlers::parse_uuid;
use crate::reports::{bookings_csv, report_filename};
use crate::repository::ReportFilter;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/bookings", get(bookings_report))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportQuery {
    format: Option<String>,
    from: Option<String>,
    to: Option<String>,
    status: Option<String>,
    car_id: Option<String>,
}

/// Export bookings overlapping a date window as a CSV attachment.
async fn bookings_report(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let parse_bound = |raw: &Option<String>| -> Result<Option<chrono::NaiveDate>, AppError> {
        match raw.as_deref() {
            Some(s) if !s.is_empty() => parse_day(s)
                .map(Some)
                .ok_or_else(|| AppError::Validation("Invalid from/to date. Use YYYY-MM-DD.".to_string())),
            _ => Ok(None),
        }
    };

    let from = parse_bound(&query.from)?;
    let to = parse_bound(&query.to)?;
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(AppError::Validation(
                "\"To\" date must be on or after \"From\" date.".to_string(),
            ));
        }
    }

    let status = match query.status.as_deref() {
        None | Some("") | Some("all") => None,
        Some(other) => Some(other.to_string()),
    };
    let car_id = match query.car_id.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(parse_uuid(raw, "carId")?),
    };

    let format = query.format.as_deref().unwrap_or("csv");
    if format != "csv" {
        return Err(AppError::Validation("Invalid format. Use csv.".to_string()));
    }

    let rows = state
        .bookings
        .report_rows(&ReportFilter { from, to, status, car_id })
        .await?;
    let csv = bookings_csv(&rows);

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", report_filename(from, to)),
        ),
    ];
    Ok((headers, csv).into_response())
}
