//! # corkboard-db
//!
//! PostgreSQL database layer for corkboard.
//!
//! This crate provides:
//! - Connection pool management with bounded retry at startup
//! - The note repository implementation
//!
//! ## Example
//!
//! ```rust,ignore
//! use corkboard_db::{Database, NoteRepository, CreateNoteRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/corkboard").await?;
//!
//!     let note_id = db.notes.insert(CreateNoteRequest {
//!         description: "Hello, world!".to_string(),
//!     }).await?;
//!
//!     println!("Created note: {}", note_id);
//!     Ok(())
//! }
//! ```

pub mod notes;
pub mod pool;

pub use notes::PgNoteRepository;
pub use pool::{create_pool_with_config, create_pool_with_retry, PoolConfig, RetryConfig};

// Re-export core types
pub use corkboard_core::*;

/// Handle to the note store, owned by the composition root and passed
/// explicitly to route handlers (no global connection state).
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Note repository for insert/list operations.
    pub notes: PgNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            notes: PgNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with default pool configuration and no retry.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = pool::create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Connect with bounded retry-with-backoff (startup readiness gate).
    pub async fn connect_with_retry(url: &str, retry: RetryConfig) -> Result<Self> {
        let pool = create_pool_with_retry(url, PoolConfig::default(), retry).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
