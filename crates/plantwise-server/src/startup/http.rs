//! HTTP server setup

use std::sync::Arc;

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpRequest, HttpServer, dev::Server, web};

use plantwise_common::ErrorKind;
use plantwise_common::error::{MEDIA_TYPE_ERROR, PARAMETER_MISSING, PARAMETER_VALIDATE_ERROR};

use crate::api::{health, route};
use crate::model::AppState;
use crate::model::response::ErrorBody;

fn bad_request(body: ErrorBody) -> actix_web::Error {
    let cause = body.error.clone();
    InternalError::from_response(cause, body.http_response()).into()
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let code = match &err {
        JsonPayloadError::ContentType => MEDIA_TYPE_ERROR,
        JsonPayloadError::Deserialize(e) if e.is_eof() => PARAMETER_MISSING,
        _ => PARAMETER_VALIDATE_ERROR,
    };
    let body = ErrorBody::new(err.to_string(), ErrorKind::Validation, code);
    bad_request(body)
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorBody::new(err.to_string(), ErrorKind::Validation, PARAMETER_VALIDATE_ERROR);
    bad_request(body)
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorBody::new(err.to_string(), ErrorKind::Validation, PARAMETER_VALIDATE_ERROR);
    bad_request(body)
}

/// Extractor configs rendering malformed bodies, queries and paths as the
/// standard error body.
pub fn error_handlers(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::PathConfig::default().error_handler(path_error));
}

/// Register the health check and the API routes under `context_path`.
pub fn configure_app(cfg: &mut web::ServiceConfig, context_path: &str) {
    error_handlers(cfg);
    cfg.service(health::health)
        .service(route::routes(context_path));
}

/// Creates and binds the HTTP server.
pub fn main_server(
    app_state: Arc<AppState>,
    context_path: String,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(web::Data::from(app_state.clone()))
            .configure(|cfg| configure_app(cfg, &context_path))
    })
    .bind((address, port))?
    .run())
}
