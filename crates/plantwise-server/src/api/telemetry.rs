//! Telemetry ingress endpoint

use actix_web::{HttpRequest, Responder, http::header, post, web};
use tracing::warn;

use plantwise_common::PlantwiseError;
use plantwise_core::service::telemetry;

use crate::error::AppError;
use crate::model::AppState;
use crate::model::response::StatusBody;

/// Record the latest reading of the device owning the bearer token.
///
/// The token is checked before the body is parsed, so an unauthenticated
/// request with a malformed body still gets a 401.
#[post("/telemetry")]
pub async fn ingest(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<impl Responder, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = telemetry::extract_bearer_token(authorization).inspect_err(|_| {
        warn!(peer = ?req.peer_addr(), "telemetry rejected: missing bearer token");
    })?;

    telemetry::ingest(data.db(), token, &body)
        .await
        .inspect_err(|e| {
            if let Some(PlantwiseError::Authentication(_)) = e.downcast_ref::<PlantwiseError>() {
                warn!(peer = ?req.peer_addr(), "telemetry rejected: unknown token");
            }
        })?;

    Ok(web::Json(StatusBody::ok()))
}
