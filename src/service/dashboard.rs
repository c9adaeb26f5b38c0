use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;

use crate::dates::{last_months, month_label};
use crate::error::AppError;
use crate::models::BookingWithCar;
use crate::repository::booking_repo::JOINED_SELECT;

/// Read-only aggregations over bookings/cars/ledger for the admin
/// dashboard. Month arithmetic happens in SQL (`date_trunc`/`make_interval`)
/// so the day boundaries agree with the stored UTC data.
#[derive(Clone)]
pub struct DashboardService {
    pool: PgPool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_cars: i64,
    pub total_bookings: i64,
    pub bookings_this_month: i64,
    pub confirmed_this_month: i64,
    pub pending_this_month: i64,
    pub growth_percent: f64,
    pub available_today: i64,
    pub unavailable_today: i64,
    pub upcoming_pickups: i64,
    pub upcoming_returns: i64,
    pub revenue_this_month: f64,
    pub avg_booking_duration_days: f64,
}

#[derive(Debug, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct RevenueSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatusSeries {
    pub labels: Vec<String>,
    pub pending: Vec<i64>,
    pub confirmed: Vec<i64>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, query: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(query).fetch_one(&self.pool).await
    }

    pub async fn stats(&self) -> Result<DashboardStats, AppError> {
        let (
            total_cars,
            total_bookings,
            bookings_this_month,
            bookings_last_month,
            confirmed_this_month,
            pending_this_month,
            unavailable_today,
            upcoming_pickups,
            upcoming_returns,
            revenue_this_month,
            avg_duration,
        ) = tokio::try_join!(
            self.count("SELECT COUNT(*) FROM cars"),
            self.count("SELECT COUNT(*) FROM bookings"),
            self.count("SELECT COUNT(*) FROM bookings WHERE created_at >= date_trunc('month', now())"),
            self.count(
                "SELECT COUNT(*) FROM bookings
                 WHERE created_at >= date_trunc('month', now()) - make_interval(months => 1)
                   AND created_at < date_trunc('month', now())"
            ),
            self.count(
                "SELECT COUNT(*) FROM bookings
                 WHERE status = 'confirmed' AND created_at >= date_trunc('month', now())"
            ),
            self.count(
                "SELECT COUNT(*) FROM bookings
                 WHERE status = 'pending' AND created_at >= date_trunc('month', now())"
            ),
            self.count("SELECT COUNT(DISTINCT car_id) FROM unavailable_dates WHERE date = CURRENT_DATE"),
            self.count(
                "SELECT COUNT(*) FROM bookings
                 WHERE start_date >= CURRENT_DATE AND start_date <= CURRENT_DATE + 7
                   AND status IN ('pending', 'confirmed')"
            ),
            self.count(
                "SELECT COUNT(*) FROM bookings
                 WHERE end_date >= CURRENT_DATE AND end_date <= CURRENT_DATE + 7
                   AND status IN ('pending', 'confirmed')"
            ),
            sqlx::query_scalar::<_, f64>(
                "SELECT COALESCE(SUM(total_price), 0)::float8 FROM bookings
                 WHERE status = 'confirmed'
                   AND start_date >= (date_trunc('month', now()))::date
                   AND start_date < (date_trunc('month', now()) + make_interval(months => 1))::date"
            )
            .fetch_one(&self.pool),
            sqlx::query_scalar::<_, f64>(
                "SELECT COALESCE(AVG((end_date - start_date)::float8), 0) FROM bookings
                 WHERE status = 'confirmed'"
            )
            .fetch_one(&self.pool),
        )?;

        let growth_percent = if bookings_last_month > 0 {
            round1(
                (bookings_this_month - bookings_last_month) as f64 / bookings_last_month as f64
                    * 100.0,
            )
        } else if bookings_this_month > 0 {
            100.0
        } else {
            0.0
        };

        Ok(DashboardStats {
            total_cars,
            total_bookings,
            bookings_this_month,
            confirmed_this_month,
            pending_this_month,
            growth_percent,
            available_today: (total_cars - unavailable_today).max(0),
            unavailable_today,
            upcoming_pickups,
            upcoming_returns,
            revenue_this_month,
            avg_booking_duration_days: round1(avg_duration),
        })
    }

    /// Booking counts per month for the trailing `months` months, including
    /// empty months (the chart wants a gapless axis).
    pub async fn monthly_bookings(&self, months: u32) -> Result<ChartSeries, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month, COUNT(*)
             FROM bookings
             WHERE created_at >= date_trunc('month', now()) - make_interval(months => $1)
             GROUP BY 1 ORDER BY 1",
        )
        .bind(months as i32 - 1)
        .fetch_all(&self.pool)
        .await?;

        let counts: HashMap<String, i64> = rows.into_iter().collect();
        let labels: Vec<String> = last_months(Utc::now().date_naive(), months)
            .into_iter()
            .map(|(y, m)| month_label(y, m))
            .collect();
        let data = labels.iter().map(|l| counts.get(l).copied().unwrap_or(0)).collect();
        Ok(ChartSeries { labels, data })
    }

    pub async fn monthly_bookings_by_status(&self) -> Result<StatusSeries, AppError> {
        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT to_char(date_trunc('month', created_at), 'YYYY-MM') AS month, status, COUNT(*)
             FROM bookings
             WHERE created_at >= date_trunc('month', now()) - make_interval(months => 11)
             GROUP BY 1, 2",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_key: HashMap<(String, String), i64> = HashMap::new();
        for (month, status, count) in rows {
            by_key.insert((month, status), count);
        }

        let labels: Vec<String> = last_months(Utc::now().date_naive(), 12)
            .into_iter()
            .map(|(y, m)| month_label(y, m))
            .collect();
        let pending = labels
            .iter()
            .map(|l| by_key.get(&(l.clone(), "pending".to_string())).copied().unwrap_or(0))
            .collect();
        let confirmed = labels
            .iter()
            .map(|l| by_key.get(&(l.clone(), "confirmed".to_string())).copied().unwrap_or(0))
            .collect();
        Ok(StatusSeries { labels, pending, confirmed })
    }

    /// Confirmed revenue per month, bucketed by booking start date.
    pub async fn monthly_revenue(&self) -> Result<RevenueSeries, AppError> {
        let rows: Vec<(String, f64)> = sqlx::query_as(
            "SELECT to_char(date_trunc('month', start_date), 'YYYY-MM') AS month,
                    COALESCE(SUM(total_price), 0)::float8
             FROM bookings
             WHERE status = 'confirmed'
               AND start_date >= (date_trunc('month', now()) - make_interval(months => 11))::date
             GROUP BY 1",
        )
        .fetch_all(&self.pool)
        .await?;

        let sums: HashMap<String, f64> = rows.into_iter().collect();
        let labels: Vec<String> = last_months(Utc::now().date_naive(), 12)
            .into_iter()
            .map(|(y, m)| month_label(y, m))
            .collect();
        let data = labels.iter().map(|l| sums.get(l).copied().unwrap_or(0.0)).collect();
        Ok(RevenueSeries { labels, data })
    }

    pub async fn most_rented_cars(&self) -> Result<ChartSeries, AppError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT c.name, COUNT(*) FROM bookings b
             JOIN cars c ON c.id = b.car_id
             GROUP BY c.id, c.name
             ORDER BY COUNT(*) DESC
             LIMIT 10",
        )
        .fetch_all(&self.pool)
        .await?;

        let (labels, data) = rows.into_iter().unzip();
        Ok(ChartSeries { labels, data })
    }

    pub async fn upcoming_bookings(&self) -> Result<Vec<BookingWithCar>, AppError> {
        Ok(sqlx::query_as::<_, BookingWithCar>(&format!(
            "{JOINED_SELECT}
             WHERE b.start_date >= CURRENT_DATE AND b.start_date <= CURRENT_DATE + 14
               AND b.status IN ('pending', 'confirmed')
             ORDER BY b.start_date
             LIMIT 20"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn upcoming_returns(&self) -> Result<Vec<BookingWithCar>, AppError> {
        Ok(sqlx::query_as::<_, BookingWithCar>(&format!(
            "{JOINED_SELECT}
             WHERE b.end_date >= CURRENT_DATE AND b.end_date <= CURRENT_DATE + 14
               AND b.status IN ('pending', 'confirmed')
             ORDER BY b.end_date
             LIMIT 20"
        ))
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn recent_bookings(&self) -> Result<Vec<BookingWithCar>, AppError> {
        Ok(sqlx::query_as::<_, BookingWithCar>(&format!(
            "{JOINED_SELECT} ORDER BY b.created_at DESC LIMIT 10"
        ))
        .fetch_all(&self.pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::round1;

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(33.333), 33.3);
        assert_eq!(round1(2.25), 2.3);
        assert_eq!(round1(0.0), 0.0);
    }
}
