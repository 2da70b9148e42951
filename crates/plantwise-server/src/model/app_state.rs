use sea_orm::DatabaseConnection;

use plantwise_core::PlantLocks;

use super::config::Configuration;

/// State shared by every request handler
pub struct AppState {
    pub configuration: Configuration,
    pub db: DatabaseConnection,
    pub plant_locks: PlantLocks,
}

impl AppState {
    pub fn new(configuration: Configuration, db: DatabaseConnection) -> Self {
        AppState {
            configuration,
            db,
            plant_locks: PlantLocks::new(),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
