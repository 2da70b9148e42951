//! Shared fixtures for HTTP tests
#![allow(dead_code)]

use std::sync::Arc;

use config::Config;

use plantwise_core::model::{ClientForm, PlantForm};
use plantwise_core::service::tenant;
use plantwise_migration::{Migrator, MigratorTrait};
use plantwise_server::model::constants::{DB_MAX_CONNECTIONS, DB_MIN_CONNECTIONS, DB_URL};
use plantwise_server::{AppState, Configuration};

/// Application state backed by a fresh migrated in-memory database
pub async fn test_state() -> Arc<AppState> {
    let config = Config::builder()
        .set_override(DB_URL, "sqlite::memory:")
        .unwrap()
        .set_override(DB_MAX_CONNECTIONS, 1)
        .unwrap()
        .set_override(DB_MIN_CONNECTIONS, 1)
        .unwrap()
        .build()
        .unwrap();
    let configuration = Configuration::from_config(config);

    let db = configuration.database_connection().await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    Arc::new(AppState::new(configuration, db))
}

/// Initialize the full application over `$state`, mounted under `/api`.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::from($state.clone()))
                .configure(|cfg| plantwise_server::startup::configure_app(cfg, "/api")),
        )
        .await
    };
}

/// Client with one plant, returned as `(client_id, plant_id)`
pub async fn tenant_with_plant(state: &AppState) -> (i64, i64) {
    let client = tenant::create_client(
        state.db(),
        ClientForm {
            name: "Acme".to_string(),
            subscription_plan: None,
        },
    )
    .await
    .unwrap();
    let plant = tenant::create_plant(
        state.db(),
        PlantForm {
            client_id: client.id,
            name: "Main Factory".to_string(),
            location: None,
            model_url: None,
        },
    )
    .await
    .unwrap();
    (client.id, plant.id)
}
