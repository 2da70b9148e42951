//! Asset and sensor tag records
//!
//! Records use the same camelCase keys the scene editor submits, so a record
//! returned by a scene save can be sent back unchanged as a descriptor.

use serde::{Deserialize, Serialize};

use plantwise_persistence::SensorType;
use plantwise_persistence::entity::{asset, sensor_tag};

use super::scene::SceneAssetDescriptor;

/// Full asset record as returned by the API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub id: i64,
    pub plant_id: i64,
    /// Library template id
    pub asset_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub name: String,
    pub asset_type: String,
    pub description: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    pub bound_device_id: Option<i64>,
    pub telemetry_mapping: serde_json::Value,
    pub config: serde_json::Value,
    pub sensor_tags: Vec<SensorTagRecord>,
}

impl AssetRecord {
    pub fn new(model: asset::Model, sensor_tags: Vec<SensorTagRecord>) -> Self {
        Self {
            id: model.id,
            plant_id: model.plant_id,
            asset_id: model.template_id,
            parent_id: model.parent_id,
            position: model.position(),
            rotation: model.rotation(),
            scale: model.scale(),
            name: model.name,
            asset_type: model.asset_type,
            description: model.description,
            bound_device_id: model.bound_device_id,
            telemetry_mapping: model.telemetry_mapping,
            config: model.config,
            sensor_tags,
        }
    }
}

/// Sensor tag record, embedded in assets and returned by the tag endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorTagRecord {
    pub id: i64,
    pub asset_id: i64,
    pub sensor_id: String,
    pub sensor_type: SensorType,
    pub position: [f64; 3],
}

impl From<sensor_tag::Model> for SensorTagRecord {
    fn from(value: sensor_tag::Model) -> Self {
        Self {
            id: value.id,
            asset_id: value.asset_id,
            sensor_id: value.sensor_id,
            sensor_type: value.sensor_type,
            position: [value.position_x, value.position_y, value.position_z],
        }
    }
}

/// Create/update body for a single asset
///
/// Shares the field set and defaults of a scene descriptor; `id` inside the
/// descriptor part is ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetForm {
    #[serde(alias = "plant", alias = "plant_id")]
    pub plant_id: i64,
    #[serde(flatten)]
    pub fields: SceneAssetDescriptor,
}

/// Create/update body for a sensor tag
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorTagForm {
    #[serde(alias = "asset", alias = "asset_id")]
    pub asset_id: i64,
    #[serde(alias = "sensor_id")]
    pub sensor_id: String,
    #[serde(default, alias = "sensor_type")]
    pub sensor_type: Option<SensorType>,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
}
