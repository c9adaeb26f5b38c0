use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price_per_day: f64,
    pub image_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "pricePerDay must be non-negative"))]
    pub price_per_day: Option<f64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "pricePerDay must be non-negative"))]
    pub price_per_day: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveImageRequest {
    pub url: Option<String>,
}
