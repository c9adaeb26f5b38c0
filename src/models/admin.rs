use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Never serialized to the wire; the password hash stays server-side.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
