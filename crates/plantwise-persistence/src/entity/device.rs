//! `SeaORM` Entity for device table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "device")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning tenant
    pub client_id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub serial_number: String,
    /// Bearer secret, generated once on creation
    #[sea_orm(unique)]
    pub token: String,
    pub created_at: DateTimeUtc,
    pub last_seen: Option<DateTimeUtc>,
    /// Latest telemetry payload, stored verbatim
    pub latest_telemetry: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id",
        on_delete = "Cascade"
    )]
    Client,
    #[sea_orm(has_many = "super::asset::Entity")]
    Asset,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
