//! Plantwise Common - Shared types used across all Plantwise components
//!
//! This crate provides:
//! - The domain error taxonomy (`PlantwiseError`, `ErrorKind`)
//! - Structured error codes for API responses

pub mod error;

pub use error::{ErrorCode, ErrorKind, PlantwiseError};

/// Default name given to scene assets submitted without one
pub const DEFAULT_ASSET_NAME: &str = "Untitled";

/// Default subscription plan for new clients
pub const DEFAULT_SUBSCRIPTION_PLAN: &str = "BASIC";

/// Maximum length of name-like string fields
pub const MAX_NAME_LENGTH: usize = 255;
