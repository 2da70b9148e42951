//! Mapping of service errors onto HTTP responses

use std::fmt::{Display, Formatter};

use actix_web::{HttpResponse, http::StatusCode};
use tracing::error;

use plantwise_common::error::{DATA_ACCESS_ERROR, SERVER_ERROR};
use plantwise_common::{ErrorKind, PlantwiseError};

use crate::model::response::ErrorBody;

/// Wrapper carrying a service error across the handler boundary
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<PlantwiseError> for AppError {
    fn from(value: PlantwiseError) -> Self {
        AppError {
            inner: value.into(),
        }
    }
}

impl AppError {
    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }

    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    fn body(&self) -> ErrorBody {
        if let Some(e) = self.downcast_ref::<PlantwiseError>() {
            return ErrorBody::new(e.to_string(), e.kind(), e.error_code());
        }
        if let Some(e) = self.downcast_ref::<sea_orm::DbErr>() {
            return ErrorBody::new(e.to_string(), ErrorKind::Internal, DATA_ACCESS_ERROR);
        }
        ErrorBody::new(self.inner.to_string(), ErrorKind::Internal, SERVER_ERROR)
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.body().kind.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let body = self.body();
        if body.kind == ErrorKind::Internal {
            error!(error = ?self.inner, "request failed");
        }
        body.http_response()
    }
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;

    #[test]
    fn test_domain_errors_map_to_status() {
        let cases = [
            (PlantwiseError::validation("bad"), StatusCode::BAD_REQUEST),
            (PlantwiseError::not_found("plant", 9), StatusCode::NOT_FOUND),
            (
                PlantwiseError::Authentication("no".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (PlantwiseError::conflict("taken"), StatusCode::CONFLICT),
            (
                PlantwiseError::InternalError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let err = AppError::from(err);
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_response().status(), status);
        }
    }

    #[test]
    fn test_database_error_is_internal() {
        let err = AppError::from(anyhow::Error::from(sea_orm::DbErr::Custom(
            "connection reset".to_string(),
        )));
        let body = err.body();
        assert_eq!(body.kind, ErrorKind::Internal);
        assert_eq!(body.code, DATA_ACCESS_ERROR.code);
    }

    #[test]
    fn test_unknown_error_is_internal() {
        let err = AppError::from(anyhow::anyhow!("unexpected"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body().error, "unexpected");
        assert!(err.inner().downcast_ref::<PlantwiseError>().is_none());
    }
}
