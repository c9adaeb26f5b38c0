use sqlx::PgPool;

use crate::models::Admin;

const ADMIN_COLUMNS: &str = "id, username, password_hash, created_at";

#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Usernames are stored lowercase; callers lowercase their input, so
    /// lookups are effectively case-insensitive.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<Admin>, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn insert(&self, username: &str, password_hash: &str) -> Result<Admin, sqlx::Error> {
        sqlx::query_as::<_, Admin>(&format!(
            "INSERT INTO admins (username, password_hash) VALUES ($1, $2) RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
    }
}
