//! Device registry service
//!
//! Tokens are generated once on registration and never change afterwards.
//! Telemetry columns are only written by [`crate::service::telemetry`].

use chrono::Utc;
use tracing::info;

use plantwise_common::PlantwiseError;
use plantwise_persistence::entity::{client, device};
use plantwise_persistence::sea_orm::*;
use plantwise_persistence::{Page, PageParam};

use crate::model::{DeviceCreateForm, DeviceUpdateForm, required_text};
use crate::service::fetch_page;

pub async fn find_page(
    db: &DatabaseConnection,
    client_id: Option<i64>,
    param: PageParam,
) -> anyhow::Result<Page<device::Model>> {
    let mut select = device::Entity::find();
    if let Some(client_id) = client_id {
        select = select.filter(device::Column::ClientId.eq(client_id));
    }

    fetch_page(db, select.order_by_asc(device::Column::Id), param).await
}

pub async fn get(db: &DatabaseConnection, id: i64) -> anyhow::Result<device::Model> {
    device::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlantwiseError::not_found("device", id).into())
}

pub async fn create(
    db: &DatabaseConnection,
    form: DeviceCreateForm,
) -> anyhow::Result<device::Model> {
    let name = required_text("name", &form.name)?;
    let serial_number = required_text("serial_number", &form.serial_number)?;

    if client::Entity::find_by_id(form.client_id).one(db).await?.is_none() {
        return Err(PlantwiseError::validation(format!(
            "client {} does not exist",
            form.client_id
        ))
        .into());
    }

    if device::Entity::find()
        .filter(device::Column::SerialNumber.eq(serial_number.as_str()))
        .one(db)
        .await?
        .is_some()
    {
        return Err(duplicate_serial(&serial_number).into());
    }

    let entity = device::ActiveModel {
        client_id: Set(form.client_id),
        name: Set(name),
        serial_number: Set(serial_number.clone()),
        token: Set(uuid::Uuid::new_v4().to_string()),
        created_at: Set(Utc::now()),
        last_seen: Set(None),
        latest_telemetry: Set(serde_json::json!({})),
        ..Default::default()
    };

    match entity.insert(db).await {
        Ok(model) => {
            info!(
                device_id = model.id,
                client_id = model.client_id,
                "device registered"
            );
            Ok(model)
        }
        // Lost a race with a concurrent registration of the same serial
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(duplicate_serial(&serial_number).into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Rename a device. Token, tenant, serial number and telemetry are read-only.
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    form: DeviceUpdateForm,
) -> anyhow::Result<device::Model> {
    let mut entity: device::ActiveModel = get(db, id).await?.into();
    entity.name = Set(required_text("name", &form.name)?);

    Ok(entity.update(db).await?)
}

/// Delete a device; assets bound to it are unbound.
pub async fn delete(db: &DatabaseConnection, id: i64) -> anyhow::Result<()> {
    let result = device::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PlantwiseError::not_found("device", id).into());
    }

    Ok(())
}

fn duplicate_serial(serial_number: &str) -> PlantwiseError {
    PlantwiseError::conflict(format!(
        "a device with serial number '{}' already exists",
        serial_number
    ))
}
