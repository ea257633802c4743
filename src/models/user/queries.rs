use sqlx::PgExecutor;

use super::types::{NewUser, User};

pub async fn create<'e, E>(executor: E, new_user: &NewUser) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query("INSERT INTO users (id, name, email) VALUES ($1, $2, $3)")
        .bind(&new_user.id)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .execute(executor)
        .await?;
    Ok(())
}

pub async fn find_by_id<'e, E>(executor: E, id: &str) -> Result<Option<User>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, User>("SELECT id, name, email, created_at FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(executor)
        .await
}
