use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::{Booking, BookingChanges, BookingWithCar, NewBooking};

const BOOKING_COLUMNS: &str =
    "id, car_id, customer_name, contact, start_date, end_date, total_price, status, source, created_at";

/// LEFT JOIN keeps bookings whose car has been deleted; their car fields
/// come back NULL.
pub(crate) const JOINED_SELECT: &str = "SELECT b.id, b.car_id, b.customer_name, b.contact, b.start_date, b.end_date,
            b.total_price, b.status, b.source, b.created_at,
            c.name AS car_name, c.price_per_day AS car_price_per_day
     FROM bookings b LEFT JOIN cars c ON c.id = b.car_id";

#[derive(Debug, Default)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<String>,
    pub car_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_with_car(&self) -> Result<Vec<BookingWithCar>, sqlx::Error> {
        sqlx::query_as::<_, BookingWithCar>(&format!("{JOINED_SELECT} ORDER BY b.created_at DESC"))
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(&format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_with_car(&self, id: Uuid) -> Result<Option<BookingWithCar>, sqlx::Error> {
        sqlx::query_as::<_, BookingWithCar>(&format!("{JOINED_SELECT} WHERE b.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(
        &self,
        new: &NewBooking,
        tx: Option<&mut Transaction<'_, Postgres>>,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (car_id, customer_name, contact, start_date, end_date, total_price, status, source)
             VALUES ($1, $2, $3, $4, $5, $6, $7, 'manual')
             RETURNING {BOOKING_COLUMNS}"
        );

        if let Some(t) = tx {
            sqlx::query_as::<_, Booking>(&query)
                .bind(new.car_id)
                .bind(&new.customer_name)
                .bind(&new.contact)
                .bind(new.start_date)
                .bind(new.end_date)
                .bind(new.total_price)
                .bind(&new.status)
                .fetch_one(&mut **t)
                .await
        } else {
            sqlx::query_as::<_, Booking>(&query)
                .bind(new.car_id)
                .bind(&new.customer_name)
                .bind(&new.contact)
                .bind(new.start_date)
                .bind(new.end_date)
                .bind(new.total_price)
                .bind(&new.status)
                .fetch_one(&self.pool)
                .await
        }
    }

    /// Partial update via COALESCE: absent fields keep their stored value
    /// (a stored total_price cannot be nulled out, matching the surface
    /// contract of the admin edit form).
    pub async fn update(
        &self,
        id: Uuid,
        changes: &BookingChanges,
        tx: Option<&mut Transaction<'_, Postgres>>,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET
                 customer_name = COALESCE($2, customer_name),
                 contact = COALESCE($3, contact),
                 start_date = COALESCE($4, start_date),
                 end_date = COALESCE($5, end_date),
                 total_price = COALESCE($6, total_price),
                 status = COALESCE($7, status)
             WHERE id = $1
             RETURNING {BOOKING_COLUMNS}"
        );

        if let Some(t) = tx {
            sqlx::query_as::<_, Booking>(&query)
                .bind(id)
                .bind(&changes.customer_name)
                .bind(&changes.contact)
                .bind(changes.start_date)
                .bind(changes.end_date)
                .bind(changes.total_price)
                .bind(&changes.status)
                .fetch_optional(&mut **t)
                .await
        } else {
            sqlx::query_as::<_, Booking>(&query)
                .bind(id)
                .bind(&changes.customer_name)
                .bind(&changes.contact)
                .bind(changes.start_date)
                .bind(changes.end_date)
                .bind(changes.total_price)
                .bind(&changes.status)
                .fetch_optional(&self.pool)
                .await
        }
    }

    pub async fn delete(
        &self,
        id: Uuid,
        tx: Option<&mut Transaction<'_, Postgres>>,
    ) -> Result<u64, sqlx::Error> {
        let query = "DELETE FROM bookings WHERE id = $1";

        let result = if let Some(t) = tx {
            sqlx::query(query).bind(id).execute(&mut **t).await?
        } else {
            sqlx::query(query).bind(id).execute(&self.pool).await?
        };
        Ok(result.rows_affected())
    }

    /// Bookings overlapping the `[from, to]` window (open ends allowed):
    /// `start_date <= to AND end_date >= from`.
    pub async fn find_overlapping(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<BookingWithCar>, sqlx::Error> {
        sqlx::query_as::<_, BookingWithCar>(&format!(
            "{JOINED_SELECT}
             WHERE ($1::date IS NULL OR b.end_date >= $1)
               AND ($2::date IS NULL OR b.start_date <= $2)
               AND ($3::text IS NULL OR b.status = $3)
               AND ($4::uuid IS NULL OR b.car_id = $4)
             ORDER BY b.start_date"
        ))
        .bind(filter.from)
        .bind(filter.to)
        .bind(&filter.status)
        .bind(filter.car_id)
        .fetch_all(&self.pool)
        .await
    }
}
