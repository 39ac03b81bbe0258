use crate::ensure_affected;
use async_trait::async_trait;
use huhu_core::error::{Result, StorageError};
use huhu_core::repository::{ReadRepository, Repository};
use huhu_core::{Joke, JokeId, Page};
use jiff::Timestamp;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

const SCHEMA: &str = include_str!("../ddl/sqlite/jokes.sql");

/// Path that selects a private in-memory database instead of a file.
pub const MEMORY_PATH: &str = ":memory:";

pub const DEFAULT_PATH: &str = "./jokes.db";

#[derive(Debug, Clone, TypedBuilder)]
pub struct SqliteConfig {
    /// Database file, or [`MEMORY_PATH`].
    #[builder(default = DEFAULT_PATH.to_string(), setter(into))]
    path: String,
    #[builder(default = 5)]
    max_connections: u32,
    #[builder(default = Duration::from_secs(5))]
    busy_timeout: Duration,
    #[builder(default = true)]
    create_if_missing: bool,
}

impl SqliteConfig {
    pub fn path(&self) -> &str {
        &self.path
    }

    fn is_in_memory(&self) -> bool {
        self.path == MEMORY_PATH
    }
}

/// SQLite implementation of the repository contract.
///
/// Rows live in a single `jokes` table. Timestamps are stored as unix
/// microseconds. `update` and `delete` report `NotFound` from the affected-row
/// count, never from the absence of an engine error.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing pool. The schema is not touched.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for the configured database and creates the schema if needed.
    pub async fn connect(config: &SqliteConfig) -> Result<Self> {
        let options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(map_sqlx_error)?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.path)
                .create_if_missing(config.create_if_missing)
                .journal_mode(SqliteJournalMode::Wal)
        };
        let options = options.busy_timeout(config.busy_timeout);

        // Every connection to `:memory:` is its own database, so the pool
        // must hold exactly one connection and never recycle it.
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let repository = Self::new(pool);
        repository.init_schema().await?;
        debug!(path = %config.path, "sqlite repository ready");
        Ok(repository)
    }

    /// Creates the `jokes` table. Idempotent.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn parse_timestamp(column: &str, micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid {column} timestamp '{micros}': {e}"))
    })
}

fn joke_from_row(row: &SqliteRow) -> Result<Joke> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let text: String = row.try_get("text").map_err(map_sqlx_error)?;
    let created_at: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let updated_at: i64 = row.try_get("updated_at").map_err(map_sqlx_error)?;

    Ok(Joke {
        id: JokeId::new(id),
        text,
        created_at: parse_timestamp("created_at", created_at)?,
        updated_at: parse_timestamp("updated_at", updated_at)?,
    })
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get(&self, id: JokeId) -> Result<Joke> {
        let row = sqlx::query(
            r#"
            SELECT id, text, created_at, updated_at
            FROM jokes
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            trace!(%id, "joke not found");
            return Err(StorageError::NotFound(id));
        };

        joke_from_row(&row)
    }

    async fn random(&self) -> Result<Joke> {
        // Count and pick happen in one statement, so a concurrent delete can't
        // make a non-empty table look empty.
        let row = sqlx::query(
            r#"
            SELECT id, text, created_at, updated_at
            FROM jokes
            ORDER BY id
            LIMIT 1
            OFFSET (SELECT abs(random() % max(count(*), 1)) FROM jokes)
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            trace!("no jokes to pick from");
            return Err(StorageError::Empty);
        };

        joke_from_row(&row)
    }

    async fn list(&self, page: Page) -> Result<Vec<Joke>> {
        let offset = i64::try_from(page.offset).unwrap_or(i64::MAX);

        let rows = sqlx::query(
            r#"
            SELECT id, text, created_at, updated_at
            FROM jokes
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(i64::from(page.limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(joke_from_row).collect()
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jokes")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        u64::try_from(count)
            .map_err(|e| StorageError::InvalidData(format!("invalid joke count '{count}': {e}")))
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn create(&self, text: &str) -> Result<JokeId> {
        let now = Timestamp::now().as_microsecond();

        let result = sqlx::query(
            r#"
            INSERT INTO jokes (text, created_at, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(text)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let id = JokeId::new(result.last_insert_rowid());
        debug!(%id, "joke created");
        Ok(id)
    }

    async fn update(&self, id: JokeId, text: &str) -> Result<()> {
        let now = Timestamp::now().as_microsecond();

        // `max` keeps updated_at monotonic if the wall clock steps back.
        let result = sqlx::query(
            r#"
            UPDATE jokes
            SET text = ?, updated_at = max(?, updated_at)
            WHERE id = ?
            "#,
        )
        .bind(text)
        .bind(now)
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        ensure_affected(result.rows_affected(), id)?;
        debug!(%id, "joke updated");
        Ok(())
    }

    async fn delete(&self, id: JokeId) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM jokes
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        ensure_affected(result.rows_affected(), id)?;
        debug!(%id, "joke deleted");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
