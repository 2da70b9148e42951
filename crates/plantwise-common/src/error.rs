//! Error types and error codes for Plantwise
//!
//! This module defines:
//! - `PlantwiseError`: Application-specific error enum
//! - `ErrorKind`: Machine-readable error category surfaced to API callers
//! - `ErrorCode`: Structured error codes for API responses

use serde::{Deserialize, Serialize};

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum PlantwiseError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl PlantwiseError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlantwiseError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        PlantwiseError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PlantwiseError::Conflict(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PlantwiseError::Validation(_) => ErrorKind::Validation,
            PlantwiseError::NotFound { .. } => ErrorKind::NotFound,
            PlantwiseError::Authentication(_) => ErrorKind::Authentication,
            PlantwiseError::Conflict(_) => ErrorKind::Conflict,
            PlantwiseError::InternalError(_) => ErrorKind::Internal,
        }
    }

    pub fn error_code(&self) -> ErrorCode<'static> {
        match self {
            PlantwiseError::Validation(_) => PARAMETER_VALIDATE_ERROR,
            PlantwiseError::NotFound { .. } => RESOURCE_NOT_FOUND,
            PlantwiseError::Authentication(_) => ACCESS_DENIED,
            PlantwiseError::Conflict(_) => RESOURCE_CONFLICT,
            PlantwiseError::InternalError(_) => SERVER_ERROR,
        }
    }
}

/// Error category reported to API callers in the `kind` field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Authentication,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Authentication => "authentication",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Internal => "internal",
        }
    }

    /// HTTP status code the kind maps to
    pub fn status(self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Authentication => 401,
            ErrorKind::Conflict => 409,
            ErrorKind::Internal => 500,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

// General error codes
pub const PARAMETER_MISSING: ErrorCode<'static> = ErrorCode {
    code: 10000,
    message: "parameter missing",
};

pub const ACCESS_DENIED: ErrorCode<'static> = ErrorCode {
    code: 10001,
    message: "access denied",
};

pub const DATA_ACCESS_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "data access error",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const MEDIA_TYPE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20003,
    message: "MediaType Error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};
