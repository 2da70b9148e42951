//! Plantwise Persistence - Database entities and persistence types
//!
//! This crate provides:
//! - SeaORM entity definitions for the tenant, library, device and scene tables
//! - Shared column enums (`AssetCategory`, `SensorType`)
//! - Pagination types for list queries

pub mod entity;
pub mod model;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

pub use model::{Page, PageParam};
