use std::path::Path as FsPath;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::auth::RequireAdmin;
use crate::constants::{API_NAME, MAX_UPLOAD_BYTES, MAX_UPLOAD_FILES};
use crate::error::AppError;
use crate::handlers::first_validation_message;
use crate::models::{Car, CreateCarRequest, RemoveImageRequest, UpdateCarRequest};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cars).post(create_car))
        .route("/:id", get(get_car).put(update_car).delete(delete_car))
        .route("/:id/upload", post(upload_image))
        .route("/:id/upload-many", post(upload_images))
        .route("/:id/images", delete(remove_image))
        // multipart bodies: per-file cap is enforced in save_uploads
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES * (MAX_UPLOAD_FILES + 1)))
}

async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, AppError> {
    Ok(Json(state.cars.list().await?))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Car>, AppError> {
    let car = state
        .cars
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
    Ok(Json(car))
}

async fn create_car(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<CreateCarRequest>,
) -> Result<(StatusCode, Json<Car>), AppError> {
    let name = body.name.as_deref().unwrap_or("").trim().to_string();
    let Some(price_per_day) = body.price_per_day else {
        return Err(AppError::Validation("Name and pricePerDay required".to_string()));
    };
    if name.is_empty() {
        return Err(AppError::Validation("Name and pricePerDay required".to_string()));
    }
    body.validate()
        .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

    let car = state
        .cars
        .insert(&name, body.description.as_deref().unwrap_or(""), price_per_day)
        .await?;

    tracing::info!("{} Created car '{}' ({})", API_NAME, car.name, car.id);
    Ok((StatusCode::CREATED, Json(car)))
}

async fn update_car(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCarRequest>,
) -> Result<Json<Car>, AppError> {
    body.validate()
        .map_err(|e| AppError::Validation(first_validation_message(&e)))?;

    let car = state
        .cars
        .update(id, body.name.as_deref(), body.description.as_deref(), body.price_per_day)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
    Ok(Json(car))
}

async fn delete_car(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = state.cars.delete(id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Car not found".to_string()));
    }
    // Blackouts and booking-derived blocks go with the car; bookings stay
    // as historical records.
    let cleared = state.availability.clear_car(id).await?;
    tracing::info!("{} Deleted car {} ({} ledger row(s) cleared)", API_NAME, id, cleared);

    Ok(Json(json!({ "success": true })))
}

async fn upload_image(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Car>, AppError> {
    state
        .cars
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    let urls = save_uploads(&state.uploads_dir, multipart, 1).await?;
    if urls.is_empty() {
        return Err(AppError::Validation("No file uploaded".to_string()));
    }

    let car = state
        .cars
        .append_images(id, &urls)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
    Ok(Json(car))
}

async fn upload_images(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<Car>, AppError> {
    state
        .cars
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

    let urls = save_uploads(&state.uploads_dir, multipart, MAX_UPLOAD_FILES).await?;
    if urls.is_empty() {
        return Err(AppError::Validation("No files uploaded".to_string()));
    }

    let car = state
        .cars
        .append_images(id, &urls)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
    Ok(Json(car))
}

async fn remove_image(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<Uuid>,
    Json(body): Json<RemoveImageRequest>,
) -> Result<Json<Car>, AppError> {
    let url = body.url.as_deref().unwrap_or("");
    if url.is_empty() {
        return Err(AppError::Validation("Image url required".to_string()));
    }

    let car = state
        .cars
        .remove_image(id, url)
        .await?
        .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;
    Ok(Json(car))
}

/// Persist uploaded image fields to the uploads directory and return their
/// public URLs. Fields without a filename are skipped.
async fn save_uploads(
    dir: &FsPath,
    mut multipart: Multipart,
    max_files: usize,
) -> Result<Vec<String>, AppError> {
    let mut urls = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.file_name().is_none() {
            continue;
        }
        if urls.len() >= max_files {
            break;
        }

        let ext = match field.content_type() {
            Some("image/png") => ".png",
            Some("image/jpeg") => ".jpg",
            _ => ".jpg",
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation("Image exceeds the 5 MB limit".to_string()));
        }

        let filename = format!("car-{}{}", Uuid::new_v4(), ext);
        tokio::fs::write(dir.join(&filename), &data)
            .await
            .map_err(|e| AppError::Internal(anyhow::Error::from(e)))?;

        urls.push(format!("/uploads/{filename}"));
    }

    Ok(urls)
}
