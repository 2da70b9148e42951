//! Shared fixtures for service tests
#![allow(dead_code)]

use plantwise_core::model::{ClientForm, DeviceCreateForm, PlantForm, TemplateForm};
use plantwise_core::service::{device, library, tenant};
use plantwise_migration::{Migrator, MigratorTrait};
use plantwise_persistence::AssetCategory;
use plantwise_persistence::entity::{client, device as device_entity, plant};
use plantwise_persistence::sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh migrated in-memory database
pub async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn create_client(db: &DatabaseConnection, name: &str) -> client::Model {
    tenant::create_client(
        db,
        ClientForm {
            name: name.to_string(),
            subscription_plan: None,
        },
    )
    .await
    .unwrap()
}

pub async fn create_plant(db: &DatabaseConnection, client_id: i64, name: &str) -> plant::Model {
    tenant::create_plant(
        db,
        PlantForm {
            client_id,
            name: name.to_string(),
            location: Some("Plant floor".to_string()),
            model_url: None,
        },
    )
    .await
    .unwrap()
}

pub async fn create_template(db: &DatabaseConnection, name: &str) -> i64 {
    library::create(
        db,
        TemplateForm {
            name: name.to_string(),
            category: Some(AssetCategory::Machine),
            model_file: format!("models/{}.glb", name.to_lowercase()),
            thumbnail: None,
            default_scale: None,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn create_device(
    db: &DatabaseConnection,
    client_id: i64,
    serial_number: &str,
) -> device_entity::Model {
    device::create(
        db,
        DeviceCreateForm {
            client_id,
            name: format!("Sensor {}", serial_number),
            serial_number: serial_number.to_string(),
        },
    )
    .await
    .unwrap()
}

/// Client with one plant
pub async fn tenant_with_plant(db: &DatabaseConnection) -> (client::Model, plant::Model) {
    let client = create_client(db, "Acme").await;
    let plant = create_plant(db, client.id, "Main Factory").await;
    (client, plant)
}
