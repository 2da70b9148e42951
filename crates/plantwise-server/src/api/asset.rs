//! Asset endpoints

use actix_web::{HttpResponse, Responder, Scope, delete, get, post, put, web};

use plantwise_core::model::AssetForm;
use plantwise_core::service::asset;
use plantwise_persistence::PageParam;

use crate::api::model::PlantFilter;
use crate::error::AppError;
use crate::model::AppState;

#[get("")]
async fn find_assets(
    data: web::Data<AppState>,
    page: web::Query<PageParam>,
    filter: web::Query<PlantFilter>,
) -> Result<impl Responder, AppError> {
    let result = asset::find_page(data.db(), filter.plant, page.into_inner()).await?;
    Ok(web::Json(result))
}

#[get("/{id}")]
async fn get_asset(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let record = asset::get(data.db(), path.into_inner()).await?;
    Ok(web::Json(record))
}

#[post("")]
async fn create_asset(
    data: web::Data<AppState>,
    form: web::Json<AssetForm>,
) -> Result<impl Responder, AppError> {
    let record = asset::create(data.db(), form.into_inner()).await?;
    Ok(HttpResponse::Created().json(record))
}

#[put("/{id}")]
async fn update_asset(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<AssetForm>,
) -> Result<impl Responder, AppError> {
    let record = asset::update(data.db(), path.into_inner(), form.into_inner()).await?;
    Ok(web::Json(record))
}

#[delete("/{id}")]
async fn delete_asset(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    asset::delete(data.db(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn routes() -> Scope {
    web::scope("/assets")
        .service(find_assets)
        .service(get_asset)
        .service(create_asset)
        .service(update_asset)
        .service(delete_asset)
}
