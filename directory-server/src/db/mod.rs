//! Database Module
//!
//! Handles the SurrealDB connection and schema

pub mod models;
pub mod repository;
pub mod search;

use shared::AppError;
use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;

use crate::core::Config;

/// Database handle type used across the crate
pub type Database = Surreal<Any>;

/// Idempotent schema, applied on every start
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
DEFINE INDEX IF NOT EXISTS employee_email ON employee FIELDS email UNIQUE;
DEFINE INDEX IF NOT EXISTS employee_name ON employee FIELDS name;
DEFINE INDEX IF NOT EXISTS employee_reports_to ON employee FIELDS reports_to;
"#;

/// Database service — owns a SurrealDB connection
#[derive(Clone)]
pub struct DbService {
    pub db: Database,
}

impl DbService {
    /// Connect using `config.database_url`, select namespace/database and apply schema
    ///
    /// The engine is picked from the URL scheme: `mem://`, `rocksdb://path`,
    /// `ws://host:port`.
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = any::connect(config.database_url.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        if let (Some(username), Some(password)) = (&config.db_username, &config.db_password) {
            db.signin(Root {
                username: username.as_str(),
                password: password.as_str(),
            })
            .await
            .map_err(|e| AppError::database(format!("Database sign-in failed: {e}")))?;
        }

        db.use_ns(config.db_namespace.as_str())
            .use_db(config.db_database.as_str())
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!(
            url = %config.database_url,
            namespace = %config.db_namespace,
            database = %config.db_database,
            "Database connection established"
        );

        let service = Self { db };
        service.apply_schema().await?;
        Ok(service)
    }

    async fn apply_schema(&self) -> Result<(), AppError> {
        self.db
            .query(SCHEMA)
            .await
            .and_then(|response| response.check())
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
        tracing::info!("Database schema applied");
        Ok(())
    }

    /// Round-trip to the store, used by the health check
    pub async fn ping(db: &Database) -> Result<(), AppError> {
        db.query("RETURN true")
            .await
            .and_then(|response| response.check())
            .map(|_| ())
            .map_err(|e| AppError::database(e.to_string()))
    }
}
