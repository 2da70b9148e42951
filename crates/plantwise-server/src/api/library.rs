//! Asset library endpoints

use actix_web::{HttpResponse, Responder, Scope, delete, get, post, put, web};

use plantwise_core::model::TemplateForm;
use plantwise_core::service::library;
use plantwise_persistence::PageParam;

use crate::api::model::CategoryFilter;
use crate::error::AppError;
use crate::model::AppState;

#[get("")]
async fn find_templates(
    data: web::Data<AppState>,
    page: web::Query<PageParam>,
    filter: web::Query<CategoryFilter>,
) -> Result<impl Responder, AppError> {
    let category = filter.category()?;
    let result = library::find_page(data.db(), category, page.into_inner()).await?;
    Ok(web::Json(result))
}

#[get("/{id}")]
async fn get_template(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let template = library::get(data.db(), path.into_inner()).await?;
    Ok(web::Json(template))
}

#[post("")]
async fn create_template(
    data: web::Data<AppState>,
    form: web::Json<TemplateForm>,
) -> Result<impl Responder, AppError> {
    let template = library::create(data.db(), form.into_inner()).await?;
    Ok(HttpResponse::Created().json(template))
}

#[put("/{id}")]
async fn update_template(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Json<TemplateForm>,
) -> Result<impl Responder, AppError> {
    let template = library::update(data.db(), path.into_inner(), form.into_inner()).await?;
    Ok(web::Json(template))
}

#[delete("/{id}")]
async fn delete_template(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    library::delete(data.db(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn routes() -> Scope {
    web::scope("/assets")
        .service(find_templates)
        .service(get_template)
        .service(create_template)
        .service(update_template)
        .service(delete_template)
}
