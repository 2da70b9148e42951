//! Enum columns shared by the library and scene entities

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Library template category
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    #[sea_orm(string_value = "MACHINE")]
    Machine,
    #[sea_orm(string_value = "SENSOR")]
    Sensor,
    #[sea_orm(string_value = "INFRASTRUCTURE")]
    Infrastructure,
    #[default]
    #[sea_orm(string_value = "OTHER")]
    Other,
}

impl std::str::FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "MACHINE" => Ok(AssetCategory::Machine),
            "SENSOR" => Ok(AssetCategory::Sensor),
            "INFRASTRUCTURE" => Ok(AssetCategory::Infrastructure),
            "OTHER" => Ok(AssetCategory::Other),
            _ => Err(format!("Invalid category: {}", s)),
        }
    }
}

/// Kind of sensor a tag represents
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    #[sea_orm(string_value = "TEMPERATURE")]
    Temperature,
    #[sea_orm(string_value = "VIBRATION")]
    Vibration,
    #[default]
    #[sea_orm(string_value = "OTHER")]
    Other,
}
