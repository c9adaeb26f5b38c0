use anyhow::Context;
use sqlx::PgPool;
use uuid::Uuid;

use crate::constants::{API_NAME, CONFLICT_MESSAGE};
use crate::dates::date_range;
use crate::error::AppError;
use crate::models::booking::STATUS_CONFIRMED;
use crate::models::{BookingChanges, BookingWithCar, NewBooking};
use crate::repository::{
    is_unique_violation, AvailabilityRepository, BookingRepository, ReportFilter,
};

/// Booking lifecycle with the no-double-booking invariant. A confirmed
/// booking's days are materialized into the ledger; those rows are derived
/// state and get reconciled on every update or delete. Check + write run in
/// one transaction so two racing requests cannot both pass the conflict
/// check and land — the loser hits the ledger's unique index and the whole
/// transaction rolls back.
#[derive(Clone)]
pub struct BookingService {
    pool: PgPool,
    bookings: BookingRepository,
    availability: AvailabilityRepository,
}

impl BookingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            bookings: BookingRepository::new(pool.clone()),
            availability: AvailabilityRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self) -> Result<Vec<BookingWithCar>, AppError> {
        Ok(self.bookings.list_with_car().await?)
    }

    pub async fn create(&self, new: NewBooking) -> Result<BookingWithCar, AppError> {
        if new.end_date < new.start_date {
            return Err(AppError::Validation(
                "End date must be on or after start date.".to_string(),
            ));
        }

        let days = date_range(new.start_date, new.end_date);

        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        let conflict = self
            .availability
            .has_conflict(new.car_id, &days, None, Some(&mut tx))
            .await?;
        if conflict {
            return Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()));
        }

        let booking = self.bookings.insert(&new, Some(&mut tx)).await?;

        if booking.status == STATUS_CONFIRMED {
            // A unique violation here means another request claimed one of
            // these days between our check and our insert. Reject the whole
            // booking rather than silently leaving its days unblocked.
            self.availability
                .insert_booking_days(booking.car_id, &days, booking.id, Some(&mut tx))
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        AppError::Conflict(CONFLICT_MESSAGE.to_string())
                    } else {
                        AppError::Database(e)
                    }
                })?;
        }

        tx.commit().await.context("Failed to commit transaction")?;

        tracing::info!(
            "{} Created booking {} for car {} ({} to {}, {})",
            API_NAME,
            booking.id,
            booking.car_id,
            booking.start_date,
            booking.end_date,
            booking.status
        );

        self.find_joined(booking.id).await
    }

    pub async fn update(&self, id: Uuid, changes: BookingChanges) -> Result<BookingWithCar, AppError> {
        let existing = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        let start = changes.start_date.unwrap_or(existing.start_date);
        let end = changes.end_date.unwrap_or(existing.end_date);
        let range_changed = start != existing.start_date || end != existing.end_date;

        if range_changed && end < start {
            return Err(AppError::Validation(
                "End date must be on or after start date.".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        // An edit that leaves the range alone must not re-run the conflict
        // check; the booking's own days would pass it anyway, but days held
        // by others since confirmation must not fail a name-only edit.
        if range_changed {
            let days = date_range(start, end);
            let conflict = self
                .availability
                .has_conflict(existing.car_id, &days, Some(id), Some(&mut tx))
                .await?;
            if conflict {
                return Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()));
            }
        }

        let updated = self
            .bookings
            .update(id, &changes, Some(&mut tx))
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        // Reconcile the ledger footprint: drop this booking's rows, then
        // re-materialize the current range when it is confirmed. Moving a
        // confirmed booking frees its old days, and un-confirming retracts
        // them entirely.
        self.availability.delete_booking_days(id, Some(&mut tx)).await?;
        if updated.status == STATUS_CONFIRMED {
            let days = date_range(updated.start_date, updated.end_date);
            self.availability
                .insert_booking_days(updated.car_id, &days, id, Some(&mut tx))
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        AppError::Conflict(CONFLICT_MESSAGE.to_string())
                    } else {
                        AppError::Database(e)
                    }
                })?;
        }

        tx.commit().await.context("Failed to commit transaction")?;

        tracing::info!("{} Updated booking {}", API_NAME, id);

        self.find_joined(id).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;

        let removed = self.bookings.delete(id, Some(&mut tx)).await?;
        if removed == 0 {
            return Err(AppError::NotFound("Booking not found".to_string()));
        }
        // Freeing the booking's days is part of the same transaction;
        // deleting a booking must not leave its dates permanently blocked.
        self.availability.delete_booking_days(id, Some(&mut tx)).await?;

        tx.commit().await.context("Failed to commit transaction")?;

        tracing::info!("{} Deleted booking {}", API_NAME, id);
        Ok(())
    }

    pub async fn report_rows(&self, filter: &ReportFilter) -> Result<Vec<BookingWithCar>, AppError> {
        Ok(self.bookings.find_overlapping(filter).await?)
    }

    async fn find_joined(&self, id: Uuid) -> Result<BookingWithCar, AppError> {
        self.bookings
            .find_with_car(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
    }
}
