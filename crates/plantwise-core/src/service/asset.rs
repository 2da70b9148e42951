//! Asset CRUD and record loading shared with the scene reconciler

use std::collections::{BTreeSet, HashMap, HashSet};

use plantwise_common::PlantwiseError;
use plantwise_persistence::entity::{asset, asset_template, device, plant, sensor_tag};
use plantwise_persistence::sea_orm::*;
use plantwise_persistence::{Page, PageParam};

use crate::model::{AssetFields, AssetForm, AssetRecord, SensorTagRecord};
use crate::service::fetch_page;

pub async fn find_page(
    db: &DatabaseConnection,
    plant_id: Option<i64>,
    param: PageParam,
) -> anyhow::Result<Page<AssetRecord>> {
    let mut select = asset::Entity::find();
    if let Some(plant_id) = plant_id {
        select = select.filter(asset::Column::PlantId.eq(plant_id));
    }

    let page = fetch_page(db, select.order_by_asc(asset::Column::Id), param).await?;
    let ids: Vec<i64> = page.page_items.iter().map(|m| m.id).collect();
    let mut tags = tags_by_asset(db, &ids).await?;

    Ok(page.map(|m| {
        let asset_tags = tags.remove(&m.id).unwrap_or_default();
        AssetRecord::new(m, asset_tags)
    }))
}

pub async fn get(db: &DatabaseConnection, id: i64) -> anyhow::Result<AssetRecord> {
    let model = find_model(db, id).await?;
    let tags = tags_by_asset(db, &[id]).await?.remove(&id).unwrap_or_default();

    Ok(AssetRecord::new(model, tags))
}

pub async fn create(db: &DatabaseConnection, form: AssetForm) -> anyhow::Result<AssetRecord> {
    let fields = AssetFields::try_from(form.fields)?;
    let plant = plant::Entity::find_by_id(form.plant_id)
        .one(db)
        .await?
        .ok_or_else(|| {
            PlantwiseError::validation(format!("plant {} does not exist", form.plant_id))
        })?;

    check_fields(db, &plant, &fields).await?;

    let model = fields.into_active_model(plant.id).insert(db).await?;

    Ok(AssetRecord::new(model, Vec::new()))
}

/// Replace every mutable field of an asset. The plant cannot change.
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    form: AssetForm,
) -> anyhow::Result<AssetRecord> {
    let existing = find_model(db, id).await?;
    if existing.plant_id != form.plant_id {
        return Err(PlantwiseError::validation("an asset cannot move to another plant").into());
    }

    let fields = AssetFields::try_from(form.fields)?;
    let plant = plant::Entity::find_by_id(existing.plant_id)
        .one(db)
        .await?
        .ok_or_else(|| PlantwiseError::not_found("plant", existing.plant_id))?;

    check_fields(db, &plant, &fields).await?;
    if let Some(parent_id) = fields.parent_id {
        ensure_not_descendant(db, id, parent_id).await?;
    }

    let mut entity: asset::ActiveModel = existing.into();
    fields.apply(&mut entity);
    let model = entity.update(db).await?;
    let tags = tags_by_asset(db, &[id]).await?.remove(&id).unwrap_or_default();

    Ok(AssetRecord::new(model, tags))
}

/// Delete an asset; its descendants and sensor tags cascade.
pub async fn delete(db: &DatabaseConnection, id: i64) -> anyhow::Result<()> {
    let result = asset::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PlantwiseError::not_found("asset", id).into());
    }

    Ok(())
}

async fn find_model(db: &DatabaseConnection, id: i64) -> anyhow::Result<asset::Model> {
    asset::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlantwiseError::not_found("asset", id).into())
}

async fn check_fields(
    db: &DatabaseConnection,
    plant: &plant::Model,
    fields: &AssetFields,
) -> anyhow::Result<()> {
    if let Some(template_id) = fields.template_id {
        ensure_templates(db, &BTreeSet::from([template_id])).await?;
    }
    if let Some(device_id) = fields.bound_device_id {
        ensure_devices(db, &BTreeSet::from([device_id]), plant.client_id).await?;
    }
    if let Some(parent_id) = fields.parent_id {
        let parent = asset::Entity::find_by_id(parent_id).one(db).await?;
        match parent {
            Some(parent) if parent.plant_id == plant.id => {}
            Some(_) => {
                return Err(PlantwiseError::validation(format!(
                    "parent asset {} belongs to another plant",
                    parent_id
                ))
                .into());
            }
            None => {
                return Err(PlantwiseError::validation(format!(
                    "parent asset {} does not exist",
                    parent_id
                ))
                .into());
            }
        }
    }

    Ok(())
}

/// Reject a reparent that would make `id` its own ancestor.
async fn ensure_not_descendant(
    db: &DatabaseConnection,
    id: i64,
    parent_id: i64,
) -> anyhow::Result<()> {
    let mut visited = HashSet::new();
    let mut cursor = Some(parent_id);

    while let Some(current) = cursor {
        if current == id {
            return Err(PlantwiseError::validation(format!(
                "asset {} cannot be its own ancestor",
                id
            ))
            .into());
        }
        if !visited.insert(current) {
            break;
        }
        cursor = asset::Entity::find_by_id(current)
            .select_only()
            .column(asset::Column::ParentId)
            .into_tuple::<Option<i64>>()
            .one(db)
            .await?
            .flatten();
    }

    Ok(())
}

/// Every id in `ids` must name an existing library template.
pub(crate) async fn ensure_templates<C: ConnectionTrait>(
    conn: &C,
    ids: &BTreeSet<i64>,
) -> anyhow::Result<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let found: HashSet<i64> = asset_template::Entity::find()
        .select_only()
        .column(asset_template::Column::Id)
        .filter(asset_template::Column::Id.is_in(ids.iter().copied()))
        .into_tuple::<i64>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
        return Err(
            PlantwiseError::validation(format!("asset template {} does not exist", missing))
                .into(),
        );
    }

    Ok(())
}

/// Every id in `ids` must name an existing device owned by `client_id`.
pub(crate) async fn ensure_devices<C: ConnectionTrait>(
    conn: &C,
    ids: &BTreeSet<i64>,
    client_id: i64,
) -> anyhow::Result<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let owners: HashMap<i64, i64> = device::Entity::find()
        .select_only()
        .columns([device::Column::Id, device::Column::ClientId])
        .filter(device::Column::Id.is_in(ids.iter().copied()))
        .into_tuple::<(i64, i64)>()
        .all(conn)
        .await?
        .into_iter()
        .collect();

    for id in ids {
        match owners.get(id) {
            None => {
                return Err(
                    PlantwiseError::validation(format!("device {} does not exist", id)).into(),
                );
            }
            Some(owner) if *owner != client_id => {
                return Err(PlantwiseError::validation(format!(
                    "device {} belongs to another client",
                    id
                ))
                .into());
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Sensor tags of the given assets, grouped by asset and ordered by tag id
pub(crate) async fn tags_by_asset<C: ConnectionTrait>(
    conn: &C,
    asset_ids: &[i64],
) -> anyhow::Result<HashMap<i64, Vec<SensorTagRecord>>> {
    let mut grouped: HashMap<i64, Vec<SensorTagRecord>> = HashMap::new();
    if asset_ids.is_empty() {
        return Ok(grouped);
    }

    let tags = sensor_tag::Entity::find()
        .filter(sensor_tag::Column::AssetId.is_in(asset_ids.iter().copied()))
        .order_by_asc(sensor_tag::Column::Id)
        .all(conn)
        .await?;

    for tag in tags {
        grouped
            .entry(tag.asset_id)
            .or_default()
            .push(SensorTagRecord::from(tag));
    }

    Ok(grouped)
}

/// Load full records for `ids`, returned in the same order as `ids`.
pub(crate) async fn load_records<C: ConnectionTrait>(
    conn: &C,
    ids: &[i64],
) -> anyhow::Result<Vec<AssetRecord>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut models: HashMap<i64, asset::Model> = asset::Entity::find()
        .filter(asset::Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let mut tags = tags_by_asset(conn, ids).await?;

    ids.iter()
        .map(|id| {
            let model = models.remove(id).ok_or_else(|| {
                PlantwiseError::InternalError(format!("asset {} vanished while loading", id))
            })?;
            Ok(AssetRecord::new(
                model,
                tags.remove(id).unwrap_or_default(),
            ))
        })
        .collect()
}
