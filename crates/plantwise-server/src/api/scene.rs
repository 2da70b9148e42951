//! Scene save endpoint

use actix_web::{Responder, post, web};
use tracing::debug;

use plantwise_core::model::SceneSaveRequest;
use plantwise_core::service::scene;

use crate::error::AppError;
use crate::model::AppState;

/// Replace the assets of a plant with the submitted scene and return the
/// saved records in request order.
#[post("/save_scene")]
pub async fn save_scene(
    data: web::Data<AppState>,
    request: web::Json<SceneSaveRequest>,
) -> Result<impl Responder, AppError> {
    let SceneSaveRequest { plant_id, assets } = request.into_inner();
    debug!(plant_id, submitted = assets.len(), "scene save requested");

    let records = scene::save_scene(data.db(), &data.plant_locks, plant_id, assets).await?;
    Ok(web::Json(records))
}
