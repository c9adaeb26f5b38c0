use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const REASON_MANUAL: &str = "manual";
pub const REASON_BOOKING: &str = "booking";

/// One ledger row per blocked calendar day per car. Rows are only ever
/// inserted or deleted; `(car_id, date)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableDate {
    pub id: Uuid,
    pub car_id: Uuid,
    pub date: NaiveDate,
    pub reason: String,
    pub booking_id: Option<Uuid>,
}

/// Body of the bulk mark/unmark endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableDatesRequest {
    pub car_id: Option<String>,
    pub dates: Option<Vec<String>>,
}
