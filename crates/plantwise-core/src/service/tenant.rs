//! Tenant directory service: clients and plants

use chrono::Utc;

use plantwise_common::{DEFAULT_SUBSCRIPTION_PLAN, PlantwiseError};
use plantwise_persistence::entity::{client, plant};
use plantwise_persistence::sea_orm::*;
use plantwise_persistence::{Page, PageParam};

use crate::model::{ClientForm, PlantForm, optional_text, required_text};
use crate::service::fetch_page;

pub async fn find_client_page(
    db: &DatabaseConnection,
    param: PageParam,
) -> anyhow::Result<Page<client::Model>> {
    let select = client::Entity::find().order_by_asc(client::Column::Id);

    fetch_page(db, select, param).await
}

pub async fn get_client(db: &DatabaseConnection, id: i64) -> anyhow::Result<client::Model> {
    client::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlantwiseError::not_found("client", id).into())
}

pub async fn create_client(
    db: &DatabaseConnection,
    form: ClientForm,
) -> anyhow::Result<client::Model> {
    let entity = client::ActiveModel {
        name: Set(required_text("name", &form.name)?),
        subscription_plan: Set(subscription_plan(form.subscription_plan.as_deref())?),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    Ok(entity.insert(db).await?)
}

pub async fn update_client(
    db: &DatabaseConnection,
    id: i64,
    form: ClientForm,
) -> anyhow::Result<client::Model> {
    let mut entity: client::ActiveModel = get_client(db, id).await?.into();

    entity.name = Set(required_text("name", &form.name)?);
    entity.subscription_plan = Set(subscription_plan(form.subscription_plan.as_deref())?);

    Ok(entity.update(db).await?)
}

/// Delete a client; its plants, devices and their assets cascade.
pub async fn delete_client(db: &DatabaseConnection, id: i64) -> anyhow::Result<()> {
    let result = client::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PlantwiseError::not_found("client", id).into());
    }

    Ok(())
}

fn subscription_plan(value: Option<&str>) -> Result<String, PlantwiseError> {
    let plan = optional_text("subscription_plan", value)?;
    if plan.is_empty() {
        Ok(DEFAULT_SUBSCRIPTION_PLAN.to_string())
    } else {
        Ok(plan)
    }
}

pub async fn find_plant_page(
    db: &DatabaseConnection,
    client_id: Option<i64>,
    param: PageParam,
) -> anyhow::Result<Page<plant::Model>> {
    let mut select = plant::Entity::find();
    if let Some(client_id) = client_id {
        select = select.filter(plant::Column::ClientId.eq(client_id));
    }

    fetch_page(db, select.order_by_asc(plant::Column::Id), param).await
}

pub async fn get_plant(db: &DatabaseConnection, id: i64) -> anyhow::Result<plant::Model> {
    plant::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlantwiseError::not_found("plant", id).into())
}

pub async fn create_plant(db: &DatabaseConnection, form: PlantForm) -> anyhow::Result<plant::Model> {
    ensure_client(db, form.client_id).await?;

    let entity = plant::ActiveModel {
        client_id: Set(form.client_id),
        name: Set(required_text("name", &form.name)?),
        location: Set(optional_text("location", form.location.as_deref())?),
        model_url: Set(model_url(form.model_url)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    Ok(entity.insert(db).await?)
}

/// Update a plant's own fields. The owning client cannot change.
pub async fn update_plant(
    db: &DatabaseConnection,
    id: i64,
    form: PlantForm,
) -> anyhow::Result<plant::Model> {
    let existing = get_plant(db, id).await?;
    if existing.client_id != form.client_id {
        return Err(PlantwiseError::validation("a plant cannot move to another client").into());
    }

    let mut entity: plant::ActiveModel = existing.into();
    entity.name = Set(required_text("name", &form.name)?);
    entity.location = Set(optional_text("location", form.location.as_deref())?);
    entity.model_url = Set(model_url(form.model_url));

    Ok(entity.update(db).await?)
}

/// Delete a plant; its assets and their sensor tags cascade.
pub async fn delete_plant(db: &DatabaseConnection, id: i64) -> anyhow::Result<()> {
    let result = plant::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PlantwiseError::not_found("plant", id).into());
    }

    Ok(())
}

async fn ensure_client(db: &DatabaseConnection, client_id: i64) -> anyhow::Result<()> {
    if client::Entity::find_by_id(client_id).one(db).await?.is_none() {
        return Err(
            PlantwiseError::validation(format!("client {} does not exist", client_id)).into(),
        );
    }

    Ok(())
}

fn model_url(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
