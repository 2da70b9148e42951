//! Client endpoints

use actix_web::{HttpResponse, Responder, Scope, delete, get, post, put, web};

use plantwise_core::model::ClientForm;
use plantwise_core::service::tenant;
use plantwise_persistence::PageParam;

use crate::error::AppError;
use crate::model::AppState;

#[get("")]
async fn find_clients(
    data: web::Data<AppState>,
    page: web::Query<PageParam>,
) -> Result<impl Responder, AppError> {
    let result = tenant::find_client_page(data.db(), page.into_inner()).await?;
    Ok(web::Json(result))
}

#[get("/{id}")]
async fn get_client(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let client = tenant::get_client(data.db(), path.into_inner()).await?;
    Ok(web::Json(client))
}

#[post("")]
async fn create_client(
    data: web::Data<AppState>,
    form: web::Json<ClientForm>,
) -> Result<impl Responder, AppError> {
    let client = tenant::create_client(data.db(), form.into_inner()).await?;
    Ok(HttpResponse::Created().json(client))
}

#[put("/{id}")]
async fn update_client(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<ClientForm>,
) -> Result<impl Responder, AppError> {
    let client = tenant::update_client(data.db(), path.into_inner(), form.into_inner()).await?;
    Ok(web::Json(client))
}

#[delete("/{id}")]
async fn delete_client(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    tenant::delete_client(data.db(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn routes() -> Scope {
    web::scope("/clients")
        .service(find_clients)
        .service(get_client)
        .service(create_client)
        .service(update_client)
        .service(delete_client)
}
