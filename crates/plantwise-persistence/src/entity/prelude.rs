//! `SeaORM` entity prelude

pub use super::asset::Entity as Asset;
pub use super::asset_template::Entity as AssetTemplate;
pub use super::client::Entity as Client;
pub use super::device::Entity as Device;
pub use super::plant::Entity as Plant;
pub use super::sea_orm_active_enums::{AssetCategory, SensorType};
pub use super::sensor_tag::Entity as SensorTag;
