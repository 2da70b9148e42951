//! `SeaORM` entities

pub mod prelude;

pub mod asset;
pub mod asset_template;
pub mod client;
pub mod device;
pub mod plant;
pub mod sea_orm_active_enums;
pub mod sensor_tag;
