use sqlx::PgExecutor;

use super::types::{InterviewRecord, NewInterview};

const SELECT_INTERVIEW: &str = "\
    SELECT id, user_id, role, interview_type, level, techstack, finalized, created_at \
    FROM interviews";

pub async fn create<'e, E>(executor: E, iv: &NewInterview) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO interviews \
            (id, user_id, role, interview_type, level, techstack, finalized, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(&iv.id)
    .bind(&iv.user_id)
    .bind(&iv.role)
    .bind(&iv.interview_type)
    .bind(&iv.level)
    .bind(&iv.techstack)
    .bind(iv.finalized)
    .bind(iv.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

/// All interviews owned by `user_id`, newest first.
pub async fn find_by_user_id<'e, E>(executor: E, user_id: &str) -> Result<Vec<InterviewRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{SELECT_INTERVIEW} WHERE user_id = $1 ORDER BY created_at DESC, id");
    sqlx::query_as::<_, InterviewRecord>(&sql)
        .bind(user_id)
        .fetch_all(executor)
        .await
}

/// Latest finalized interviews open to take, newest first.
///
/// `exclude_user_id = Some(id)` drops interviews owned by that user;
/// `None` returns the whole finalized pool.
pub async fn find_latest<'e, E>(
    executor: E,
    exclude_user_id: Option<&str>,
    limit: i64,
) -> Result<Vec<InterviewRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    let sql = format!(
        "{SELECT_INTERVIEW} \
         WHERE finalized = TRUE AND ($1::TEXT IS NULL OR user_id <> $1) \
         ORDER BY created_at DESC, id \
         LIMIT $2"
    );
    sqlx::query_as::<_, InterviewRecord>(&sql)
        .bind(exclude_user_id)
        .bind(limit.clamp(1, 100))
        .fetch_all(executor)
        .await
}
