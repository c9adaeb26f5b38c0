use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_CONFIRMED: &str = "confirmed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_name: String,
    pub contact: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Option<f64>,
    pub status: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Read-side projection: a booking joined with its car's display fields.
/// The car fields are null when the referenced car has been deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithCar {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_name: String,
    pub contact: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Option<f64>,
    pub status: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub car_name: Option<String>,
    pub car_price_per_day: Option<f64>,
}

/// Validated input for creating a booking, after the boundary layer has
/// parsed ids and dates.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub car_id: Uuid,
    pub customer_name: String,
    pub contact: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: Option<f64>,
    pub status: String,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub customer_name: Option<String>,
    pub contact: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_price: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub car_id: Option<String>,
    pub customer_name: Option<String>,
    pub contact: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_price: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub customer_name: Option<String>,
    pub contact: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_price: Option<f64>,
    pub status: Option<String>,
}
