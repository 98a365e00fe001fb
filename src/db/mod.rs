mod client_repository;
mod models;
pub mod seed;
mod trip_repository;

use crate::config::DatabaseConfig;
use crate::constants::SQLITE_BUSY_TIMEOUT_MS;
use crate::errors::Error;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use tracing::debug;

pub use client_repository::*;
pub use models::*;
pub use trip_repository::*;

/// Tables and lookup indexes, created only when missing
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS country (
    id_country INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS trip (
    id_trip INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    date_from TIMESTAMP NOT NULL,
    date_to TIMESTAMP NOT NULL,
    max_people INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS client (
    id_client INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    telephone TEXT NOT NULL,
    pesel TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS country_trip (
    id_country INTEGER NOT NULL REFERENCES country (id_country),
    id_trip INTEGER NOT NULL REFERENCES trip (id_trip),
    PRIMARY KEY (id_country, id_trip)
);
CREATE TABLE IF NOT EXISTS client_trip (
    id_client INTEGER NOT NULL REFERENCES client (id_client),
    id_trip INTEGER NOT NULL REFERENCES trip (id_trip),
    registered_at TIMESTAMP NOT NULL,
    payment_date TIMESTAMP,
    PRIMARY KEY (id_client, id_trip)
);
CREATE INDEX IF NOT EXISTS ix_client_pesel ON client (pesel);
CREATE INDEX IF NOT EXISTS ix_trip_date_from ON trip (date_from);
";

/// Per-connection SQLite settings applied when the pool opens a connection
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            SQLITE_BUSY_TIMEOUT_MS
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl Database {
    /// Opens a pool on the SQLite file at `db_path` with default settings
    pub fn new(db_path: &str) -> Result<Self, Error> {
        Self::from_config(&DatabaseConfig {
            path: db_path.to_string(),
            ..DatabaseConfig::default()
        })
    }

    /// Opens a pool described by `config`, creating the tables when asked to
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, Error> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.path);
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)?;

        let database = Database {
            pool: Arc::new(pool),
        };

        if config.bootstrap_schema {
            database.ensure_schema()?;
        }

        Ok(database)
    }

    pub fn get_conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>, Error> {
        Ok(self.pool.get()?)
    }

    /// Creates any missing table or index
    pub fn ensure_schema(&self) -> Result<(), Error> {
        let mut conn = self.get_conn()?;
        conn.batch_execute(SCHEMA_SQL)?;
        debug!("Database schema ensured");
        Ok(())
    }

    /// Runs `operation` on a pooled connection on the blocking thread pool
    ///
    /// # Arguments
    /// * `operation` - Synchronous work against the connection
    ///
    /// # Returns
    /// * `Result<T, Error>` - Whatever `operation` returns, or a pool/join error
    pub async fn run<F, T>(&self, operation: F) -> Result<T, Error>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, Error> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            operation(&mut *conn)
        })
        .await?
    }
}
