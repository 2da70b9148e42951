//! Device registry forms
//!
//! Neither form carries a token or telemetry: the token is generated on
//! creation and telemetry is written only by the ingress path.

use serde::{Deserialize, Serialize};

/// Create body for a device
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeviceCreateForm {
    #[serde(alias = "tenant")]
    pub client_id: i64,
    pub name: String,
    pub serial_number: String,
}

/// Update body for a device
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeviceUpdateForm {
    pub name: String,
}
