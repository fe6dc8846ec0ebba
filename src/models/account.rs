//! Account domain model

use chrono::{DateTime, Utc};

/// Registered account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    /// Unique, compared case-sensitively as stored
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
