//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{CustomerRepository, DomainError};
use crate::infrastructure::SeaOrmCustomerRepository;
use crate::infrastructure::config::Config;
use crate::infrastructure::db;

/// Shared handles for callers of the data-access layer
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Customer repository
    pub customer_repo: Arc<dyn CustomerRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        let customer_repo = Arc::new(SeaOrmCustomerRepository::new(db.clone()));

        Self { db, customer_repo }
    }

    /// Connect, migrate and wire repositories from configuration.
    pub async fn from_config(config: &Config) -> Result<Self, DomainError> {
        tracing::info!(profile = %config.profile, "Initialising customer store");
        let db = db::init_db(&config.database_url).await?;
        Ok(Self::new(db))
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl AsRef<DatabaseConnection> for AppState {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.db
    }
}
