use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Car;

const CAR_COLUMNS: &str = "id, name, description, price_per_day, image_urls, created_at";

#[derive(Clone)]
pub struct CarRepository {
    pool: PgPool,
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!(
            "SELECT {CAR_COLUMNS} FROM cars ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(
        &self,
        name: &str,
        description: &str,
        price_per_day: f64,
    ) -> Result<Car, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!(
            "INSERT INTO cars (name, description, price_per_day)
             VALUES ($1, $2, $3)
             RETURNING {CAR_COLUMNS}"
        ))
        .bind(name)
        .bind(description)
        .bind(price_per_day)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        price_per_day: Option<f64>,
    ) -> Result<Option<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!(
            "UPDATE cars SET
                 name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 price_per_day = COALESCE($4, price_per_day)
             WHERE id = $1
             RETURNING {CAR_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price_per_day)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn append_images(&self, id: Uuid, urls: &[String]) -> Result<Option<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!(
            "UPDATE cars SET image_urls = image_urls || $2 WHERE id = $1 RETURNING {CAR_COLUMNS}"
        ))
        .bind(id)
        .bind(urls)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn remove_image(&self, id: Uuid, url: &str) -> Result<Option<Car>, sqlx::Error> {
        sqlx::query_as::<_, Car>(&format!(
            "UPDATE cars SET image_urls = array_remove(image_urls, $2) WHERE id = $1 RETURNING {CAR_COLUMNS}"
        ))
        .bind(id)
        .bind(url)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await
    }
}
