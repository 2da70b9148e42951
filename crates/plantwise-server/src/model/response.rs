//! HTTP response bodies

use actix_web::{HttpResponse, HttpResponseBuilder, http::StatusCode};
use serde::{Deserialize, Serialize};

use plantwise_common::{ErrorCode, ErrorKind};

/// Body of every error response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
    pub code: i32,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>, kind: ErrorKind, code: ErrorCode<'_>) -> Self {
        ErrorBody {
            error: message.into(),
            kind,
            code: code.code,
        }
    }

    pub fn http_response(self) -> HttpResponse {
        let status = StatusCode::from_u16(self.kind.status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponseBuilder::new(status).json(self)
    }
}

/// `{"status": ...}` acknowledgement
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    pub fn ok() -> Self {
        StatusBody {
            status: "ok".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantwise_common::error::RESOURCE_CONFLICT;

    #[test]
    fn test_error_body_status_follows_kind() {
        let response =
            ErrorBody::new("serial taken", ErrorKind::Conflict, RESOURCE_CONFLICT).http_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_error_body_wire_shape() {
        let body = ErrorBody::new("serial taken", ErrorKind::Conflict, RESOURCE_CONFLICT);
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"error": "serial taken", "kind": "conflict", "code": 20005})
        );
    }
}
