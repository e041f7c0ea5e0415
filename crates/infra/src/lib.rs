//! `chamados-infra` — relational store over sqlx/SQLite.
//!
//! Store modules expose one async function per operation, taking the shared
//! pool explicitly. Constraint violations are translated into domain errors
//! at this boundary; nothing above it ever sees raw driver errors.

use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous},
};

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};

/// Shared database handle (connection pool + applied migrations).
#[derive(Clone)]
pub struct Db {
    pub pool: SqlitePool,
}

impl Db {
    /// Open (creating if missing) the database at `database_url` and run
    /// pending migrations.
    ///
    /// Foreign keys are enforced on every connection; referential integrity
    /// is load-bearing for ticket creation.
    pub async fn connect(database_url: &str) -> Result<Db, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30))
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Db { pool })
    }
}
