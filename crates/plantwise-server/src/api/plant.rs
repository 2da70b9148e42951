//! Plant endpoints

use actix_web::{HttpResponse, Responder, Scope, delete, get, post, put, web};

use plantwise_core::model::PlantForm;
use plantwise_core::service::tenant;
use plantwise_persistence::PageParam;

use crate::api::model::ClientFilter;
use crate::error::AppError;
use crate::model::AppState;

#[get("")]
async fn find_plants(
    data: web::Data<AppState>,
    page: web::Query<PageParam>,
    filter: web::Query<ClientFilter>,
) -> Result<impl Responder, AppError> {
    let result = tenant::find_plant_page(data.db(), filter.client, page.into_inner()).await?;
    Ok(web::Json(result))
}

#[get("/{id}")]
async fn get_plant(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let plant = tenant::get_plant(data.db(), path.into_inner()).await?;
    Ok(web::Json(plant))
}

#[post("")]
async fn create_plant(
    data: web::Data<AppState>,
    form: web::Json<PlantForm>,
) -> Result<impl Responder, AppError> {
    let plant = tenant::create_plant(data.db(), form.into_inner()).await?;
    Ok(HttpResponse::Created().json(plant))
}

#[put("/{id}")]
async fn update_plant(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<PlantForm>,
) -> Result<impl Responder, AppError> {
    let plant = tenant::update_plant(data.db(), path.into_inner(), form.into_inner()).await?;
    Ok(web::Json(plant))
}

#[delete("/{id}")]
async fn delete_plant(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let id = path.into_inner();
    tenant::delete_plant(data.db(), id).await?;
    data.plant_locks.remove(id);
    Ok(HttpResponse::NoContent().finish())
}

pub fn routes() -> Scope {
    web::scope("/plants")
        .service(find_plants)
        .service(get_plant)
        .service(create_plant)
        .service(update_plant)
        .service(delete_plant)
}
