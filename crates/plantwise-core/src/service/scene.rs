//! Scene reconciliation
//!
//! Makes the persisted assets of one plant exactly equal to a submitted scene.
//! Submitted assets with an id are updated in place (or inserted with that id),
//! assets without an id are created, and every existing asset of the plant that
//! the scene omits is deleted together with its subtree and sensor tags.
//!
//! A save runs in a single transaction while holding the plant's in-process lock
//! and, on backends that support it, a row lock on the plant.

use std::collections::HashSet;

use tracing::{debug, info};

use plantwise_common::PlantwiseError;
use plantwise_persistence::entity::{asset, plant};
use plantwise_persistence::sea_orm::*;

use crate::model::{AssetRecord, SceneAssetDescriptor, SceneItem, ScenePlan};
use crate::service::asset::{ensure_devices, ensure_templates, load_records};
use crate::service::lock::PlantLocks;

const ADVANCE_ASSET_SEQUENCE: &str = "SELECT setval(pg_get_serial_sequence('asset', 'id'), \
     GREATEST((SELECT MAX(id) FROM asset), 1))";

/// Reconcile `plant_id` against `descriptors` and return the saved records in
/// request order.
pub async fn save_scene(
    db: &DatabaseConnection,
    locks: &PlantLocks,
    plant_id: i64,
    descriptors: Vec<SceneAssetDescriptor>,
) -> anyhow::Result<Vec<AssetRecord>> {
    let plan = ScenePlan::build(descriptors)?;

    let _guard = locks.acquire(plant_id).await;
    let tx = db.begin().await?;

    let plant = plant::Entity::find_by_id(plant_id)
        .lock_exclusive()
        .one(&tx)
        .await?
        .ok_or_else(|| PlantwiseError::not_found("plant", plant_id))?;

    ensure_templates(&tx, &plan.template_ids()).await?;
    ensure_devices(&tx, &plan.device_ids(), plant.client_id).await?;

    let submitted = plan.submitted_ids();
    let existing = owned_ids(&tx, plant.id, &submitted).await?;

    let mut ids = vec![0_i64; plan.len()];
    let mut updated = 0;
    let mut inserted = 0;

    for &index in plan.upsert_order() {
        let SceneItem::Upsert { id, fields } = &plan.items()[index] else {
            continue;
        };

        if existing.contains(id) {
            let mut entity = asset::ActiveModel {
                id: Unchanged(*id),
                plant_id: Unchanged(plant.id),
                ..Default::default()
            };
            fields.clone().apply(&mut entity);
            asset::Entity::update(entity).exec(&tx).await?;
            updated += 1;
        } else {
            let mut entity = fields.clone().into_active_model(plant.id);
            entity.id = Set(*id);
            asset::Entity::insert(entity).exec(&tx).await?;
            inserted += 1;
        }
        ids[index] = *id;
    }

    if inserted > 0 && tx.get_database_backend() == DbBackend::Postgres {
        tx.execute_unprepared(ADVANCE_ASSET_SEQUENCE).await?;
    }

    let mut delete = asset::Entity::delete_many().filter(asset::Column::PlantId.eq(plant.id));
    if !submitted.is_empty() {
        delete = delete.filter(asset::Column::Id.is_not_in(submitted.iter().copied()));
    }
    let removed = delete.exec(&tx).await?.rows_affected;

    let mut created = 0;
    let create_indexes: Vec<usize> = plan.create_indexes().collect();
    for index in create_indexes {
        let entity = plan.items()[index]
            .fields()
            .clone()
            .into_active_model(plant.id);
        ids[index] = asset::Entity::insert(entity).exec(&tx).await?.last_insert_id;
        created += 1;
    }

    let records = load_records(&tx, &ids).await?;
    tx.commit().await?;

    info!(
        plant_id = plant.id,
        updated, inserted, created, removed, "scene saved"
    );

    Ok(records)
}

/// Submitted ids already owned by `plant_id`. Fails with a conflict when any
/// submitted id belongs to an asset of another plant.
async fn owned_ids<C: ConnectionTrait>(
    conn: &C,
    plant_id: i64,
    submitted: &[i64],
) -> anyhow::Result<HashSet<i64>> {
    if submitted.is_empty() {
        return Ok(HashSet::new());
    }

    let rows: Vec<(i64, i64)> = asset::Entity::find()
        .select_only()
        .columns([asset::Column::Id, asset::Column::PlantId])
        .filter(asset::Column::Id.is_in(submitted.iter().copied()))
        .into_tuple()
        .all(conn)
        .await?;

    let mut owned = HashSet::with_capacity(rows.len());
    for (id, owner) in rows {
        if owner != plant_id {
            debug!(asset_id = id, owner, plant_id, "asset id claimed by another plant");
            return Err(PlantwiseError::conflict(format!(
                "asset {} belongs to plant {}",
                id, owner
            ))
            .into());
        }
        owned.insert(id);
    }

    Ok(owned)
}
