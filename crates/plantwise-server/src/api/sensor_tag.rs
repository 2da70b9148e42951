//! Sensor tag endpoints

use actix_web::{HttpResponse, Responder, Scope, delete, get, post, put, web};

use plantwise_core::model::SensorTagForm;
use plantwise_core::service::sensor_tag;
use plantwise_persistence::PageParam;

use crate::api::model::AssetFilter;
use crate::error::AppError;
use crate::model::AppState;

#[get("")]
async fn find_sensor_tags(
    data: web::Data<AppState>,
    page: web::Query<PageParam>,
    filter: web::Query<AssetFilter>,
) -> Result<impl Responder, AppError> {
    let result = sensor_tag::find_page(data.db(), filter.asset, page.into_inner()).await?;
    Ok(web::Json(result))
}

#[get("/{id}")]
async fn get_sensor_tag(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let tag = sensor_tag::get(data.db(), path.into_inner()).await?;
    Ok(web::Json(tag))
}

#[post("")]
async fn create_sensor_tag(
    data: web::Data<AppState>,
    form: web::Json<SensorTagForm>,
) -> Result<impl Responder, AppError> {
    let tag = sensor_tag::create(data.db(), form.into_inner()).await?;
    Ok(HttpResponse::Created().json(tag))
}

#[put("/{id}")]
async fn update_sensor_tag(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<SensorTagForm>,
) -> Result<impl Responder, AppError> {
    let tag = sensor_tag::update(data.db(), path.into_inner(), form.into_inner()).await?;
    Ok(web::Json(tag))
}

#[delete("/{id}")]
async fn delete_sensor_tag(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    sensor_tag::delete(data.db(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn routes() -> Scope {
    web::scope("/sensor-tags")
        .service(find_sensor_tags)
        .service(get_sensor_tag)
        .service(create_sensor_tag)
        .service(update_sensor_tag)
        .service(delete_sensor_tag)
}
