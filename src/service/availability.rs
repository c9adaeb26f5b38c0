use chrono::NaiveDate;
use uuid::Uuid;

use crate::constants::API_NAME;
use crate::dates::{date_range, month_bounds};
use crate::error::AppError;
use crate::repository::AvailabilityRepository;

/// Owns the unavailable-dates ledger: month listings, range conflict
/// checks, and manual blackout marking.
#[derive(Clone)]
pub struct AvailabilityService {
    repo: AvailabilityRepository,
}

impl AvailabilityService {
    pub fn new(repo: AvailabilityRepository) -> Self {
        Self { repo }
    }

    pub async fn list_month(
        &self,
        car_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<NaiveDate>, AppError> {
        let (from, to) = month_bounds(year, month)
            .ok_or_else(|| AppError::Validation("month must be between 1 and 12".to_string()))?;
        let rows = self.repo.list_between(car_id, from, to).await?;
        Ok(rows.into_iter().map(|row| row.date).collect())
    }

    /// Is the car free for every day in `[start, end]`? An inverted range
    /// spans no days and is reported as available; booking creation rejects
    /// such ranges separately.
    pub async fn is_available(
        &self,
        car_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        exclude_booking: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let days = date_range(start, end);
        if days.is_empty() {
            return Ok(true);
        }
        let conflict = self.repo.has_conflict(car_id, &days, exclude_booking, None).await?;
        Ok(!conflict)
    }

    /// Bulk-mark manual blackout days. Returns the number of ledger rows now
    /// present in the min-max span of the submitted dates, not the number
    /// newly inserted.
    pub async fn mark_manual(&self, car_id: Uuid, days: &[NaiveDate]) -> Result<i64, AppError> {
        self.repo.insert_manual(car_id, days).await?;
        let (Some(&from), Some(&to)) = (days.iter().min(), days.iter().max()) else {
            return Ok(0);
        };
        let count = self.repo.count_between(car_id, from, to).await?;
        tracing::info!("{} Marked {} day(s) unavailable for car {}", API_NAME, days.len(), car_id);
        Ok(count)
    }

    pub async fn unmark_manual(&self, car_id: Uuid, days: &[NaiveDate]) -> Result<u64, AppError> {
        let removed = self.repo.delete_manual(car_id, days).await?;
        tracing::info!("{} Unmarked {} day(s) for car {}", API_NAME, removed, car_id);
        Ok(removed)
    }

    /// Cascade for car deletion: drops every ledger row for the car.
    pub async fn clear_car(&self, car_id: Uuid) -> Result<u64, AppError> {
        Ok(self.repo.delete_for_car(car_id).await?)
    }
}
