//! Scene-save request types and the validated reconciliation plan
//!
//! A submitted scene is turned into a [`ScenePlan`] before any store access.
//! Building the plan resolves field defaults, classifies every descriptor as
//! [`SceneItem::Upsert`] or [`SceneItem::Create`], and checks the shape of the
//! submission as a whole: duplicate ids, parent references and cycles.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use sea_orm::ActiveValue::Set;
use serde::Deserialize;

use plantwise_common::{DEFAULT_ASSET_NAME, MAX_NAME_LENGTH, PlantwiseError};
use plantwise_persistence::entity::asset;

use super::{finite_triple, optional_text};

const DEFAULT_POSITION: [f64; 3] = [0.0, 0.0, 0.0];
const DEFAULT_ROTATION: [f64; 3] = [0.0, 0.0, 0.0];
const DEFAULT_SCALE: [f64; 3] = [1.0, 1.0, 1.0];

/// Body of `POST /assets/save_scene`
#[derive(Clone, Debug, Deserialize)]
pub struct SceneSaveRequest {
    #[serde(alias = "plantId")]
    pub plant_id: i64,
    pub assets: Vec<SceneAssetDescriptor>,
}

/// One asset as submitted by the scene editor
///
/// Every field is optional on the wire. Unknown keys, including any plant
/// reference, are ignored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneAssetDescriptor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// Library template id
    #[serde(default, alias = "asset_id", alias = "template")]
    pub asset_id: Option<i64>,
    #[serde(default, alias = "parent_id", alias = "parent")]
    pub parent_id: Option<i64>,
    #[serde(default, alias = "asset_type")]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    #[serde(default)]
    pub rotation: Option<[f64; 3]>,
    #[serde(default)]
    pub scale: Option<[f64; 3]>,
    #[serde(default, alias = "bound_device_id", alias = "bound_device")]
    pub bound_device_id: Option<i64>,
    #[serde(default, alias = "telemetry_mapping")]
    pub telemetry_mapping: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub config: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Resolved column values of an asset, defaults applied
#[derive(Clone, Debug, PartialEq)]
pub struct AssetFields {
    pub name: String,
    pub template_id: Option<i64>,
    pub parent_id: Option<i64>,
    pub asset_type: String,
    pub description: String,
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
    pub bound_device_id: Option<i64>,
    pub telemetry_mapping: serde_json::Value,
    pub config: serde_json::Value,
}

impl TryFrom<SceneAssetDescriptor> for AssetFields {
    type Error = PlantwiseError;

    fn try_from(value: SceneAssetDescriptor) -> Result<Self, Self::Error> {
        let name = match value.name.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_ASSET_NAME.to_string(),
            Some(name) if name.chars().count() > MAX_NAME_LENGTH => {
                return Err(PlantwiseError::validation(format!(
                    "'name' must be at most {} characters",
                    MAX_NAME_LENGTH
                )));
            }
            Some(name) => name.to_string(),
        };

        let telemetry_mapping = value.telemetry_mapping.unwrap_or_default();
        if telemetry_mapping.keys().any(|k| k.trim().is_empty()) {
            return Err(PlantwiseError::validation(
                "'telemetryMapping' keys must not be empty",
            ));
        }

        Ok(Self {
            name,
            template_id: value.asset_id,
            parent_id: value.parent_id,
            asset_type: optional_text("assetType", value.asset_type.as_deref())?,
            description: value.description.unwrap_or_default(),
            position: finite_triple("position", value.position.unwrap_or(DEFAULT_POSITION))?,
            rotation: finite_triple("rotation", value.rotation.unwrap_or(DEFAULT_ROTATION))?,
            scale: finite_triple("scale", value.scale.unwrap_or(DEFAULT_SCALE))?,
            bound_device_id: value.bound_device_id,
            telemetry_mapping: serde_json::Value::Object(
                telemetry_mapping
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect(),
            ),
            config: serde_json::Value::Object(value.config.unwrap_or_default()),
        })
    }
}

impl AssetFields {
    /// Overwrite every mutable column of `model`.
    pub fn apply(self, model: &mut asset::ActiveModel) {
        model.name = Set(self.name);
        model.template_id = Set(self.template_id);
        model.parent_id = Set(self.parent_id);
        model.asset_type = Set(self.asset_type);
        model.description = Set(self.description);
        model.position_x = Set(self.position[0]);
        model.position_y = Set(self.position[1]);
        model.position_z = Set(self.position[2]);
        model.rotation_x = Set(self.rotation[0]);
        model.rotation_y = Set(self.rotation[1]);
        model.rotation_z = Set(self.rotation[2]);
        model.scale_x = Set(self.scale[0]);
        model.scale_y = Set(self.scale[1]);
        model.scale_z = Set(self.scale[2]);
        model.bound_device_id = Set(self.bound_device_id);
        model.telemetry_mapping = Set(self.telemetry_mapping);
        model.config = Set(self.config);
    }

    /// New row for `plant_id`; the id is left to the caller.
    pub fn into_active_model(self, plant_id: i64) -> asset::ActiveModel {
        let mut model = asset::ActiveModel {
            plant_id: Set(plant_id),
            ..Default::default()
        };
        self.apply(&mut model);
        model
    }
}

/// A classified descriptor
#[derive(Clone, Debug, PartialEq)]
pub enum SceneItem {
    /// Update the row with this id, or insert it with exactly this id
    Upsert { id: i64, fields: AssetFields },
    /// Insert with a server-assigned id
    Create { fields: AssetFields },
}

impl SceneItem {
    pub fn id(&self) -> Option<i64> {
        match self {
            SceneItem::Upsert { id, .. } => Some(*id),
            SceneItem::Create { .. } => None,
        }
    }

    pub fn fields(&self) -> &AssetFields {
        match self {
            SceneItem::Upsert { fields, .. } | SceneItem::Create { fields } => fields,
        }
    }
}

/// Validated scene, ready to be written
#[derive(Clone, Debug)]
pub struct ScenePlan {
    items: Vec<SceneItem>,
    upsert_order: Vec<usize>,
}

impl ScenePlan {
    pub fn build(descriptors: Vec<SceneAssetDescriptor>) -> Result<Self, PlantwiseError> {
        let mut items = Vec::with_capacity(descriptors.len());
        let mut seen = HashSet::new();

        for (index, descriptor) in descriptors.into_iter().enumerate() {
            let id = descriptor.id;
            let fields = AssetFields::try_from(descriptor).map_err(|e| {
                PlantwiseError::validation(format!("assets[{}]: {}", index, e))
            })?;

            items.push(match id {
                Some(id) => {
                    if !seen.insert(id) {
                        return Err(PlantwiseError::validation(format!(
                            "assets[{}]: duplicate id {}",
                            index, id
                        )));
                    }
                    SceneItem::Upsert { id, fields }
                }
                None => SceneItem::Create { fields },
            });
        }

        for (index, item) in items.iter().enumerate() {
            if let Some(parent_id) = item.fields().parent_id
                && !seen.contains(&parent_id)
            {
                return Err(PlantwiseError::validation(format!(
                    "assets[{}]: parent {} is not part of the submitted scene",
                    index, parent_id
                )));
            }
        }

        let upsert_order = parent_first_order(&items)?;

        Ok(Self {
            items,
            upsert_order,
        })
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Indexes of the upsert items, every parent before its children
    pub fn upsert_order(&self) -> &[usize] {
        &self.upsert_order
    }

    /// Indexes of the create items in request order
    pub fn create_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| matches!(item, SceneItem::Create { .. }))
            .map(|(index, _)| index)
    }

    pub fn submitted_ids(&self) -> Vec<i64> {
        self.items.iter().filter_map(SceneItem::id).collect()
    }

    pub fn template_ids(&self) -> BTreeSet<i64> {
        self.items
            .iter()
            .filter_map(|item| item.fields().template_id)
            .collect()
    }

    pub fn device_ids(&self) -> BTreeSet<i64> {
        self.items
            .iter()
            .filter_map(|item| item.fields().bound_device_id)
            .collect()
    }
}

/// Kahn's algorithm over the upsert items. Create items never act as parents,
/// so they are left out.
fn parent_first_order(items: &[SceneItem]) -> Result<Vec<usize>, PlantwiseError> {
    let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut queue = VecDeque::new();
    let mut total = 0;

    for (index, item) in items.iter().enumerate() {
        if item.id().is_none() {
            continue;
        }
        total += 1;
        match item.fields().parent_id {
            Some(parent_id) => children.entry(parent_id).or_default().push(index),
            None => queue.push_back(index),
        }
    }

    let mut order = Vec::with_capacity(total);
    while let Some(index) = queue.pop_front() {
        order.push(index);
        if let Some(id) = items[index].id()
            && let Some(kids) = children.remove(&id)
        {
            queue.extend(kids);
        }
    }

    if order.len() != total {
        return Err(PlantwiseError::validation(
            "asset parent references form a cycle",
        ));
    }
    Ok(order)
}
