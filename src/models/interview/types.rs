use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored interview session, as read by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct InterviewRecord {
    pub id: String,
    /// Owner of the session; may differ from the viewer.
    pub user_id: String,
    pub role: String,
    pub interview_type: String,
    pub level: String,
    pub techstack: Vec<String>,
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload (seed data and tests).
#[derive(Debug, Clone, Deserialize)]
pub struct NewInterview {
    pub id: String,
    pub user_id: String,
    pub role: String,
    pub interview_type: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub techstack: Vec<String>,
    #[serde(default)]
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
}
