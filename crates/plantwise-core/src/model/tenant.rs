//! Tenant directory forms

use serde::{Deserialize, Serialize};

/// Create/update body for a client
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ClientForm {
    pub name: String,
    /// Defaults to `BASIC`
    #[serde(default)]
    pub subscription_plan: Option<String>,
}

/// Create/update body for a plant
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PlantForm {
    #[serde(alias = "client")]
    pub client_id: i64,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub model_url: Option<String>,
}
