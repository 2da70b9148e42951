//! Plantwise Server - HTTP surface of the Plantwise asset management backend
//!
//! This crate provides:
//! - Layered configuration (file, environment, command line)
//! - Multi-file logging
//! - actix-web handlers for tenants, library, devices, assets, scene save
//!   and telemetry ingress
//! - Mapping of service errors onto HTTP responses

pub mod api;
pub mod error;
pub mod model;
pub mod startup;

pub use error::AppError;
pub use model::{AppState, Cli, Configuration};
