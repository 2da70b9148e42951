//! Asset library forms

use serde::{Deserialize, Serialize};

use plantwise_persistence::AssetCategory;

/// Create/update body for a library template
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TemplateForm {
    pub name: String,
    #[serde(default)]
    pub category: Option<AssetCategory>,
    /// Opaque model file reference
    #[serde(alias = "file")]
    pub model_file: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub default_scale: Option<f64>,
}
