//! Sensor tag CRUD

use plantwise_common::PlantwiseError;
use plantwise_persistence::entity::{asset, sensor_tag};
use plantwise_persistence::sea_orm::*;
use plantwise_persistence::{Page, PageParam};

use crate::model::{SensorTagForm, SensorTagRecord, finite_triple, required_text};
use crate::service::fetch_page;

pub async fn find_page(
    db: &DatabaseConnection,
    asset_id: Option<i64>,
    param: PageParam,
) -> anyhow::Result<Page<SensorTagRecord>> {
    let mut select = sensor_tag::Entity::find();
    if let Some(asset_id) = asset_id {
        select = select.filter(sensor_tag::Column::AssetId.eq(asset_id));
    }

    let page = fetch_page(db, select.order_by_asc(sensor_tag::Column::Id), param).await?;

    Ok(page.map(SensorTagRecord::from))
}

pub async fn get(db: &DatabaseConnection, id: i64) -> anyhow::Result<SensorTagRecord> {
    Ok(find_model(db, id).await?.into())
}

pub async fn create(
    db: &DatabaseConnection,
    form: SensorTagForm,
) -> anyhow::Result<SensorTagRecord> {
    let mut entity = sensor_tag::ActiveModel {
        ..Default::default()
    };
    apply_form(db, &mut entity, form).await?;

    Ok(entity.insert(db).await?.into())
}

pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    form: SensorTagForm,
) -> anyhow::Result<SensorTagRecord> {
    let mut entity: sensor_tag::ActiveModel = find_model(db, id).await?.into();
    apply_form(db, &mut entity, form).await?;

    Ok(entity.update(db).await?.into())
}

pub async fn delete(db: &DatabaseConnection, id: i64) -> anyhow::Result<()> {
    let result = sensor_tag::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PlantwiseError::not_found("sensor tag", id).into());
    }

    Ok(())
}

async fn find_model(db: &DatabaseConnection, id: i64) -> anyhow::Result<sensor_tag::Model> {
    sensor_tag::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlantwiseError::not_found("sensor tag", id).into())
}

async fn apply_form(
    db: &DatabaseConnection,
    entity: &mut sensor_tag::ActiveModel,
    form: SensorTagForm,
) -> anyhow::Result<()> {
    let sensor_id = required_text("sensorId", &form.sensor_id)?;
    let position = finite_triple("position", form.position.unwrap_or_default())?;

    if asset::Entity::find_by_id(form.asset_id).one(db).await?.is_none() {
        return Err(
            PlantwiseError::validation(format!("asset {} does not exist", form.asset_id)).into(),
        );
    }

    entity.asset_id = Set(form.asset_id);
    entity.sensor_id = Set(sensor_id);
    entity.sensor_type = Set(form.sensor_type.unwrap_or_default());
    entity.position_x = Set(position[0]);
    entity.position_y = Set(position[1]);
    entity.position_z = Set(position[2]);

    Ok(())
}
