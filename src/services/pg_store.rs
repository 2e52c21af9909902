//! Postgres-backed session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only used when `DATABASE_URL` is configured. Startup connects, then runs
//! `src/migrations`, which create the `sessions` / `users` tables with
//! `IF NOT EXISTS` so they can be shared with the application that performs
//! the actual logins.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use super::session::{SessionStore, SessionUser, StoreError, generate_token};

#[derive(Clone)]
pub struct PgSessionStore {
    pool: PgPool,
    ttl: Duration,
}

impl PgSessionStore {
    /// Store whose new sessions expire `ttl` after creation.
    #[must_use]
    pub fn new(pool: PgPool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    /// Connect a pool of at most `max_connections` and apply migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or migrations fail.
    pub async fn connect(database_url: &str, max_connections: u32, ttl: Duration) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("src/migrations").run(&pool).await?;
        Ok(Self::new(pool, ttl))
    }
}

#[async_trait::async_trait]
impl SessionStore for PgSessionStore {
    async fn lookup(&self, token: &str) -> Result<Option<SessionUser>, StoreError> {
        let row = sqlx::query(
            r"SELECT u.id, u.name
              FROM sessions s
              JOIN users u ON u.id = s.user_id
              WHERE s.token = $1 AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| SessionUser { user_id: r.get("id"), name: r.get("name") }))
    }

    async fn create(&self, user: &SessionUser) -> Result<String, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO users (id, name) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name",
        )
        .bind(&user.user_id)
        .bind(&user.name)
        .execute(&mut *tx)
        .await?;

        let token = generate_token();
        sqlx::query(
            "INSERT INTO sessions (token, user_id, expires_at)
             VALUES ($1, $2, now() + make_interval(secs => $3))",
        )
        .bind(&token)
        .bind(&user.user_id)
        .bind(self.ttl.as_secs_f64())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(token)
    }

    async fn revoke(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "pg_store_test.rs"]
mod tests;
