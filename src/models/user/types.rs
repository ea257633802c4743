use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account as stored in `users`.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// New user data for creation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub id: String,
    pub name: String,
    pub email: String,
}
