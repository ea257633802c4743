//! Shared test infrastructure for Postgres-backed tests.
//!
//! Each `TestDb` gets its own schema, so tests can run in parallel against one
//! database. Set `TEST_DATABASE_URL` to run them; without it the tests return early.

use rand::Rng;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use prepwise::db::MIGRATIONS;

pub struct TestDb {
    pool: PgPool,
    schema: String,
}

impl TestDb {
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn teardown(self) {
        let drop_sql = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
        sqlx::query(&drop_sql)
            .execute(&self.pool)
            .await
            .expect("Failed to drop test schema");
        self.pool.close().await;
    }
}

/// Create an isolated schema, point every pooled connection at it, and run migrations.
/// Returns `None` when `TEST_DATABASE_URL` is not set.
pub async fn setup_test_db() -> Option<TestDb> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping Postgres test");
        return None;
    };

    let bytes: [u8; 6] = rand::rng().random();
    let schema = format!("test_{}", hex::encode(bytes));

    let admin = PgPool::connect(&url).await.expect("Failed to connect to test DB");
    sqlx::query(&format!("CREATE SCHEMA {schema}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");
    admin.close().await;

    let search_path = format!("SET search_path TO {schema}");
    let pool = PgPoolOptions::new()
        .max_connections(4)
        .after_connect(move |conn, _meta| {
            let sql = search_path.clone();
            Box::pin(async move {
                sqlx::query(&sql).execute(conn).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await
        .expect("Failed to open test pool");

    sqlx::raw_sql(MIGRATIONS)
        .execute(&pool)
        .await
        .expect("Failed to run migrations");

    Some(TestDb { pool, schema })
}
