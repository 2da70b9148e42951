//! Plantwise Core - Domain models and services
//!
//! This crate provides:
//! - Tenant directory (clients and plants), asset library, device registry,
//!   asset and sensor tag CRUD
//! - Scene reconciliation: make a plant's assets equal a submitted scene
//! - Telemetry ingress: bearer-token device authentication and latest reading
//! - Per-plant locks serializing concurrent scene saves
//! - Demo data seeding

pub mod model;
pub mod service;

pub use model::*;
pub use service::lock::PlantLocks;
