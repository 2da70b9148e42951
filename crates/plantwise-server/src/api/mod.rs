//! HTTP API
//!
//! - `tenants` - clients and plants
//! - `library` - asset templates
//! - `devices` - device registry and telemetry ingress
//! - `assets` - asset and sensor tag CRUD and scene save

pub mod asset;
pub mod client;
pub mod device;
pub mod health;
pub mod library;
pub mod model;
pub mod plant;
pub mod route;
pub mod scene;
pub mod sensor_tag;
pub mod telemetry;
