//! Database connection management.

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};

use common::DatabaseConfig;

/// Database wrapper for connection management
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection pool sized from `config`.
    ///
    /// Schema and stored procedures are expected to exist already.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Database connection pool opened"
        );

        Ok(Self { connection })
    }

    /// Hand the pool over to its single owner.
    pub fn into_connection(self) -> DatabaseConnection {
        self.connection
    }
}
