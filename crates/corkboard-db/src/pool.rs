//! Database connection pool management.

use std::time::{Duration, Instant};

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use corkboard_core::Result;

/// Default maximum number of connections in the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default connection timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default number of startup connection attempts.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 10;

/// Default delay before the first startup retry, in milliseconds.
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Ceiling for the backoff delay between startup retries.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Pool configuration options.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections to maintain.
    pub min_connections: u32,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Idle connection timeout duration.
    pub idle_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: 1,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

impl PoolConfig {
    /// Create a new pool configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of connections.
    pub fn max_connections(mut self, n: u32) -> Self {
        self.max_connections = n;
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Startup retry policy for the initial connection.
///
/// Bounded attempts with exponential backoff: the delay doubles after each
/// failure up to a 30 second ceiling. After the last attempt the error is
/// returned and the process is expected to exit.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of connection attempts (including the first).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RETRY_ATTEMPTS,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

/// Create a new PostgreSQL connection pool with default configuration.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    create_pool_with_config(database_url, PoolConfig::default()).await
}

/// Create a new PostgreSQL connection pool with custom configuration.
pub async fn create_pool_with_config(database_url: &str, config: PoolConfig) -> Result<PgPool> {
    let start = Instant::now();

    info!(
        subsystem = "database",
        component = "pool",
        op = "create",
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        connect_timeout_secs = config.connect_timeout.as_secs(),
        "Creating database connection pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(config.idle_timeout)
        .connect(database_url)
        .await?;

    info!(
        subsystem = "database",
        component = "pool",
        op = "established",
        pool_size = pool.size(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Database connection pool established"
    );
    Ok(pool)
}

/// Create a pool, retrying with exponential backoff on failure.
///
/// Each failed attempt is logged at warn level with the attempt number and
/// the next delay. Exhausting `max_attempts` returns the last error.
pub async fn create_pool_with_retry(
    database_url: &str,
    config: PoolConfig,
    retry: RetryConfig,
) -> Result<PgPool> {
    let attempts = retry.max_attempts.max(1);
    let mut delay = retry.initial_delay;

    for attempt in 1..=attempts {
        match create_pool_with_config(database_url, config.clone()).await {
            Ok(pool) => return Ok(pool),
            Err(e) if attempt < attempts => {
                warn!(
                    subsystem = "database",
                    component = "pool",
                    op = "retry",
                    attempt,
                    max_attempts = attempts,
                    retry_in_ms = delay.as_millis() as u64,
                    error = %e,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(MAX_RETRY_DELAY);
            }
            Err(e) => {
                warn!(
                    subsystem = "database",
                    component = "pool",
                    op = "exhausted",
                    attempts,
                    error = %e,
                    "Database connection failed, giving up"
                );
                return Err(e);
            }
        }
    }
    unreachable!("retry loop returns on the final attempt")
}
