//! Demo data seeding
//!
//! Creates a demo tenant, plant and two library templates when they are
//! missing. Running it again changes nothing.

use chrono::Utc;
use tracing::info;

use plantwise_common::DEFAULT_SUBSCRIPTION_PLAN;
use plantwise_persistence::AssetCategory;
use plantwise_persistence::entity::{asset_template, client, plant};
use plantwise_persistence::sea_orm::*;

pub const DEMO_CLIENT: &str = "Acme Corp";
pub const DEMO_PLANT: &str = "Main Factory";
pub const DEMO_PLANT_LOCATION: &str = "New York";

const DEMO_TEMPLATES: [(&str, AssetCategory, &str); 2] = [
    ("Generic Machine", AssetCategory::Machine, "models/generic_machine.glb"),
    ("Safety Fence", AssetCategory::Infrastructure, "models/safety_fence.glb"),
];

/// Outcome of a seeding run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub client_id: i64,
    pub plant_id: i64,
    pub created: usize,
}

pub async fn seed_demo_data(db: &DatabaseConnection) -> anyhow::Result<SeedReport> {
    let tx = db.begin().await?;
    let mut created = 0;

    let client = match client::Entity::find()
        .filter(client::Column::Name.eq(DEMO_CLIENT))
        .one(&tx)
        .await?
    {
        Some(existing) => existing,
        None => {
            created += 1;
            client::ActiveModel {
                name: Set(DEMO_CLIENT.to_string()),
                subscription_plan: Set(DEFAULT_SUBSCRIPTION_PLAN.to_string()),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&tx)
            .await?
        }
    };

    let plant = match plant::Entity::find()
        .filter(plant::Column::ClientId.eq(client.id))
        .filter(plant::Column::Name.eq(DEMO_PLANT))
        .one(&tx)
        .await?
    {
        Some(existing) => existing,
        None => {
            created += 1;
            plant::ActiveModel {
                client_id: Set(client.id),
                name: Set(DEMO_PLANT.to_string()),
                location: Set(DEMO_PLANT_LOCATION.to_string()),
                model_url: Set(None),
                created_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(&tx)
            .await?
        }
    };

    for (name, category, model_file) in DEMO_TEMPLATES {
        let exists = asset_template::Entity::find()
            .filter(asset_template::Column::Name.eq(name))
            .one(&tx)
            .await?
            .is_some();
        if exists {
            continue;
        }

        asset_template::ActiveModel {
            name: Set(name.to_string()),
            category: Set(category),
            model_file: Set(model_file.to_string()),
            thumbnail: Set(None),
            default_scale: Set(1.0),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&tx)
        .await?;
        created += 1;
    }

    tx.commit().await?;

    info!(
        client_id = client.id,
        plant_id = plant.id,
        created, "demo data seeded"
    );

    Ok(SeedReport {
        client_id: client.id,
        plant_id: plant.id,
        created,
    })
}
