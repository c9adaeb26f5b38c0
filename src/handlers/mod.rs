pub mod auth;
pub mod availability;
pub mod bookings;
pub mod cars;
pub mod dashboard;
pub mod health;
pub mod reports;

use uuid::Uuid;
use validator::ValidationErrors;

use crate::error::AppError;

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| AppError::Validation(format!("Invalid {field}")))
}

/// First human-readable message out of a validator error set.
pub(crate) fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Invalid request".to_string())
}
