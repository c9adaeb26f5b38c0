use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::unavailable_date::{REASON_BOOKING, REASON_MANUAL};
use crate::models::UnavailableDate;

const LEDGER_COLUMNS: &str = "id, car_id, date, reason, booking_id";

/// Queries against the unavailable-dates ledger. Writes that must be atomic
/// with a booking write take an optional transaction handle.
#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_between(
        &self,
        car_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<UnavailableDate>, sqlx::Error> {
        sqlx::query_as::<_, UnavailableDate>(&format!(
            "SELECT {LEDGER_COLUMNS} FROM unavailable_dates
             WHERE car_id = $1 AND date >= $2 AND date <= $3 ORDER BY date"
        ))
        .bind(car_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
    }

    /// True when any ledger row blocks one of `days` for this car. Rows
    /// belonging to `exclude_booking` do not count; rows with no booking
    /// (manual blackouts) always count.
    pub async fn has_conflict(
        &self,
        car_id: Uuid,
        days: &[NaiveDate],
        exclude_booking: Option<Uuid>,
        tx: Option<&mut Transaction<'_, Postgres>>,
    ) -> Result<bool, sqlx::Error> {
        let query = "SELECT EXISTS(
            SELECT 1 FROM unavailable_dates
            WHERE car_id = $1 AND date = ANY($2)
              AND ($3::uuid IS NULL OR booking_id IS NULL OR booking_id <> $3)
        )";

        if let Some(t) = tx {
            sqlx::query_scalar::<_, bool>(query)
                .bind(car_id)
                .bind(days)
                .bind(exclude_booking)
                .fetch_one(&mut **t)
                .await
        } else {
            sqlx::query_scalar::<_, bool>(query)
                .bind(car_id)
                .bind(days)
                .bind(exclude_booking)
                .fetch_one(&self.pool)
                .await
        }
    }

    /// Bulk-insert manual blackout days. Days already blocked are skipped,
    /// which makes re-marking idempotent.
    pub async fn insert_manual(&self, car_id: Uuid, days: &[NaiveDate]) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO unavailable_dates (car_id, date, reason)
             SELECT $1, d, $3 FROM UNNEST($2::date[]) AS t(d)
             ON CONFLICT (car_id, date) DO NOTHING",
        )
        .bind(car_id)
        .bind(days)
        .bind(REASON_MANUAL)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn count_between(
        &self,
        car_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM unavailable_dates WHERE car_id = $1 AND date >= $2 AND date <= $3",
        )
        .bind(car_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await
    }

    /// Delete manual blackout days. Booking-derived rows are owned by the
    /// booking lifecycle and are not touched by this path.
    pub async fn delete_manual(&self, car_id: Uuid, days: &[NaiveDate]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM unavailable_dates
             WHERE car_id = $1 AND date = ANY($2) AND booking_id IS NULL",
        )
        .bind(car_id)
        .bind(days)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Materialize a confirmed booking's days into the ledger. No duplicate
    /// swallowing: a unique violation here is a genuine double-booking
    /// (the caller maps it to a conflict and rolls the transaction back).
    pub async fn insert_booking_days(
        &self,
        car_id: Uuid,
        days: &[NaiveDate],
        booking_id: Uuid,
        tx: Option<&mut Transaction<'_, Postgres>>,
    ) -> Result<(), sqlx::Error> {
        let query = "INSERT INTO unavailable_dates (car_id, date, reason, booking_id)
             SELECT $1, d, $4, $3 FROM UNNEST($2::date[]) AS t(d)";

        if let Some(t) = tx {
            sqlx::query(query)
                .bind(car_id)
                .bind(days)
                .bind(booking_id)
                .bind(REASON_BOOKING)
                .execute(&mut **t)
                .await?;
        } else {
            sqlx::query(query)
                .bind(car_id)
                .bind(days)
                .bind(booking_id)
                .bind(REASON_BOOKING)
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    pub async fn delete_booking_days(
        &self,
        booking_id: Uuid,
        tx: Option<&mut Transaction<'_, Postgres>>,
    ) -> Result<u64, sqlx::Error> {
        let query = "DELETE FROM unavailable_dates WHERE booking_id = $1";

        let result = if let Some(t) = tx {
            sqlx::query(query).bind(booking_id).execute(&mut **t).await?
        } else {
            sqlx::query(query).bind(booking_id).execute(&self.pool).await?
        };
        Ok(result.rows_affected())
    }

    /// Cascade used when a car is deleted: removes every ledger row for it.
    pub async fn delete_for_car(&self, car_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM unavailable_dates WHERE car_id = $1")
            .bind(car_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
