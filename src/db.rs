use std::fmt;

use serde::Deserialize;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::models::interview::{self, NewInterview};
use crate::models::user::{self, NewUser};

pub type DbPool = PgPool;

pub const MIGRATIONS: &str = include_str!("schema.sql");

const DEMO_SEED: &str = include_str!("../data/seed/demo.json");

/// Demo data bundle: users first, then the interviews they own.
#[derive(Debug, Deserialize)]
pub struct SeedPayload {
    pub users: Vec<NewUser>,
    pub interviews: Vec<NewInterview>,
}

#[derive(Debug)]
pub enum SeedError {
    Parse(serde_json::Error),
    Db(sqlx::Error),
}

impl fmt::Display for SeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedError::Parse(e) => write!(f, "Bad seed JSON: {e}"),
            SeedError::Db(e) => write!(f, "Seed insert failed: {e}"),
        }
    }
}

impl std::error::Error for SeedError {}

impl From<serde_json::Error> for SeedError {
    fn from(e: serde_json::Error) -> Self {
        SeedError::Parse(e)
    }
}

impl From<sqlx::Error> for SeedError {
    fn from(e: sqlx::Error) -> Self {
        SeedError::Db(e)
    }
}

pub fn parse_seed(json: &str) -> Result<SeedPayload, SeedError> {
    Ok(serde_json::from_str(json)?)
}

pub async fn init_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(8)
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(MIGRATIONS).execute(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Insert the bundled demo users and interviews. Skipped when any user exists.
/// Returns the number of interviews created.
pub async fn seed_demo(pool: &DbPool) -> Result<usize, SeedError> {
    let count = user::count(pool).await?;
    if count > 0 {
        log::info!("Database already seeded ({} users), skipping demo seed", count);
        return Ok(0);
    }

    let payload = parse_seed(DEMO_SEED)?;

    let mut tx = pool.begin().await?;
    for u in &payload.users {
        user::create(&mut *tx, u).await?;
    }
    for iv in &payload.interviews {
        interview::create(&mut *tx, iv).await?;
    }
    tx.commit().await?;

    log::info!(
        "Demo seed complete: users={}, interviews={}",
        payload.users.len(),
        payload.interviews.len()
    );
    Ok(payload.interviews.len())
}
