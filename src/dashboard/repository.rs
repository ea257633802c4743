use async_trait::async_trait;
use sqlx::PgPool;

use crate::config::DEFAULT_AVAILABLE_LIMIT;
use crate::errors::AppError;
use crate::models::interview::{self, InterviewRecord};

use super::identity::Identity;

/// Read-only access to stored interviews, in the two shapes the dashboard needs.
///
/// Both queries return `Ok(vec![])` when nothing matches. Guest semantics are part
/// of the contract: a guest owns nothing, and sees the whole open pool.
#[async_trait]
pub trait InterviewRepository: Send + Sync {
    /// Interviews owned by the viewer, newest first.
    async fn fetch_owned(&self, identity: &Identity) -> Result<Vec<InterviewRecord>, AppError>;

    /// Finalized interviews open to take, newest first, excluding the viewer's own.
    async fn fetch_available(&self, identity: &Identity) -> Result<Vec<InterviewRecord>, AppError>;
}

pub struct PgInterviewRepository {
    pool: PgPool,
    available_limit: i64,
}

impl PgInterviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, available_limit: DEFAULT_AVAILABLE_LIMIT }
    }

    pub fn with_available_limit(mut self, limit: i64) -> Self {
        self.available_limit = limit;
        self
    }
}

#[async_trait]
impl InterviewRepository for PgInterviewRepository {
    async fn fetch_owned(&self, identity: &Identity) -> Result<Vec<InterviewRecord>, AppError> {
        match identity {
            Identity::Known(viewer) => Ok(interview::find_by_user_id(&self.pool, &viewer.id).await?),
            Identity::Guest => Ok(Vec::new()),
        }
    }

    async fn fetch_available(&self, identity: &Identity) -> Result<Vec<InterviewRecord>, AppError> {
        let rows = interview::find_latest(&self.pool, identity.viewer_id(), self.available_limit).await?;
        Ok(rows)
    }
}

/// Same contract as [`PgInterviewRepository`], over a fixed in-process list.
/// Used for local demos and HTTP tests that run without Postgres.
pub struct MemoryInterviewRepository {
    records: Vec<InterviewRecord>,
    available_limit: usize,
}

impl MemoryInterviewRepository {
    pub fn new(records: Vec<InterviewRecord>) -> Self {
        Self { records, available_limit: DEFAULT_AVAILABLE_LIMIT as usize }
    }

    pub fn with_available_limit(mut self, limit: usize) -> Self {
        self.available_limit = limit;
        self
    }

    fn newest_first(mut rows: Vec<InterviewRecord>) -> Vec<InterviewRecord> {
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        rows
    }
}

#[async_trait]
impl InterviewRepository for MemoryInterviewRepository {
    async fn fetch_owned(&self, identity: &Identity) -> Result<Vec<InterviewRecord>, AppError> {
        let Some(viewer_id) = identity.viewer_id() else {
            return Ok(Vec::new());
        };
        let rows = self.records.iter().filter(|r| r.user_id == viewer_id).cloned().collect();
        Ok(Self::newest_first(rows))
    }

    async fn fetch_available(&self, identity: &Identity) -> Result<Vec<InterviewRecord>, AppError> {
        let viewer_id = identity.viewer_id();
        let rows = self
            .records
            .iter()
            .filter(|r| r.finalized && Some(r.user_id.as_str()) != viewer_id)
            .cloned()
            .collect();
        let mut rows = Self::newest_first(rows);
        rows.truncate(self.available_limit);
        Ok(rows)
    }
}
