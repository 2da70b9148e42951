//! Device registry endpoints

use actix_web::{HttpResponse, Responder, Scope, delete, get, post, put, web};

use plantwise_core::model::{DeviceCreateForm, DeviceUpdateForm};
use plantwise_core::service::device;
use plantwise_persistence::PageParam;

use crate::api::model::ClientFilter;
use crate::error::AppError;
use crate::model::AppState;

#[get("")]
async fn find_devices(
    data: web::Data<AppState>,
    page: web::Query<PageParam>,
    filter: web::Query<ClientFilter>,
) -> Result<impl Responder, AppError> {
    let result = device::find_page(data.db(), filter.client, page.into_inner()).await?;
    Ok(web::Json(result))
}

#[get("/{id}")]
async fn get_device(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let device = device::get(data.db(), path.into_inner()).await?;
    Ok(web::Json(device))
}

#[post("")]
async fn create_device(
    data: web::Data<AppState>,
    form: web::Json<DeviceCreateForm>,
) -> Result<impl Responder, AppError> {
    let device = device::create(data.db(), form.into_inner()).await?;
    Ok(HttpResponse::Created().json(device))
}

#[put("/{id}")]
async fn update_device(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<DeviceUpdateForm>,
) -> Result<impl Responder, AppError> {
    let device = device::update(data.db(), path.into_inner(), form.into_inner()).await?;
    Ok(web::Json(device))
}

#[delete("/{id}")]
async fn delete_device(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    device::delete(data.db(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn routes() -> Scope {
    web::scope("/devices")
        .service(find_devices)
        .service(get_device)
        .service(create_device)
        .service(update_device)
        .service(delete_device)
}
