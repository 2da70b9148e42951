//! Asset library service

use chrono::Utc;

use plantwise_common::PlantwiseError;
use plantwise_persistence::entity::asset_template;
use plantwise_persistence::sea_orm::*;
use plantwise_persistence::{AssetCategory, Page, PageParam};

use crate::model::{TemplateForm, required_text};
use crate::service::fetch_page;

pub async fn find_page(
    db: &DatabaseConnection,
    category: Option<AssetCategory>,
    param: PageParam,
) -> anyhow::Result<Page<asset_template::Model>> {
    let mut select = asset_template::Entity::find();
    if let Some(category) = category {
        select = select.filter(asset_template::Column::Category.eq(category));
    }

    fetch_page(db, select.order_by_asc(asset_template::Column::Id), param).await
}

pub async fn get(db: &DatabaseConnection, id: i64) -> anyhow::Result<asset_template::Model> {
    asset_template::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| PlantwiseError::not_found("asset template", id).into())
}

pub async fn create(
    db: &DatabaseConnection,
    form: TemplateForm,
) -> anyhow::Result<asset_template::Model> {
    let mut entity = asset_template::ActiveModel {
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    apply_form(&mut entity, form)?;

    Ok(entity.insert(db).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    form: TemplateForm,
) -> anyhow::Result<asset_template::Model> {
    let mut entity: asset_template::ActiveModel = get(db, id).await?.into();
    apply_form(&mut entity, form)?;

    Ok(entity.update(db).await?)
}

/// Delete a template; assets instanced from it keep their rows with no template.
pub async fn delete(db: &DatabaseConnection, id: i64) -> anyhow::Result<()> {
    let result = asset_template::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(PlantwiseError::not_found("asset template", id).into());
    }

    Ok(())
}

fn apply_form(
    entity: &mut asset_template::ActiveModel,
    form: TemplateForm,
) -> Result<(), PlantwiseError> {
    let default_scale = form.default_scale.unwrap_or(1.0);
    if !default_scale.is_finite() || default_scale <= 0.0 {
        return Err(PlantwiseError::validation(
            "'default_scale' must be a positive number",
        ));
    }
    let model_file = form.model_file.trim();
    if model_file.is_empty() {
        return Err(PlantwiseError::validation("'model_file' must not be empty"));
    }

    entity.name = Set(required_text("name", &form.name)?);
    entity.category = Set(form.category.unwrap_or_default());
    entity.model_file = Set(model_file.to_string());
    entity.thumbnail = Set(form
        .thumbnail
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty()));
    entity.default_scale = Set(default_scale);

    Ok(())
}
