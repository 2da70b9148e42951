//! `SeaORM` Entity for asset table
//!
//! An asset is one placed instance in a plant scene. `parent_id` forms a tree
//! within a single plant; deleting a parent cascades to its descendants.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "asset")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub plant_id: i64,
    pub template_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub name: String,
    pub asset_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub rotation_z: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub scale_z: f64,
    pub bound_device_id: Option<i64>,
    /// Transform property name -> telemetry key, e.g. `rotation_y -> rpm`
    pub telemetry_mapping: Json,
    pub config: Json,
}

impl Model {
    pub fn position(&self) -> [f64; 3] {
        [self.position_x, self.position_y, self.position_z]
    }

    pub fn rotation(&self) -> [f64; 3] {
        [self.rotation_x, self.rotation_y, self.rotation_z]
    }

    pub fn scale(&self) -> [f64; 3] {
        [self.scale_x, self.scale_y, self.scale_z]
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::plant::Entity",
        from = "Column::PlantId",
        to = "super::plant::Column::Id",
        on_delete = "Cascade"
    )]
    Plant,
    #[sea_orm(
        belongs_to = "super::asset_template::Entity",
        from = "Column::TemplateId",
        to = "super::asset_template::Column::Id",
        on_delete = "SetNull"
    )]
    AssetTemplate,
    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::BoundDeviceId",
        to = "super::device::Column::Id",
        on_delete = "SetNull"
    )]
    Device,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_delete = "Cascade"
    )]
    Parent,
    #[sea_orm(has_many = "super::sensor_tag::Entity")]
    SensorTag,
}

impl Related<super::plant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plant.def()
    }
}

impl Related<super::asset_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssetTemplate.def()
    }
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl Related<super::sensor_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SensorTag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
