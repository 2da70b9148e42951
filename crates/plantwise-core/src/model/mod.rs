//! Data models for the Plantwise services
//!
//! - `tenant` - client and plant forms
//! - `library` - asset template forms
//! - `device` - device forms
//! - `asset` - asset and sensor tag records and forms
//! - `scene` - scene-save descriptors and the validated reconciliation plan

pub mod asset;
pub mod device;
pub mod library;
pub mod scene;
pub mod tenant;

pub use asset::{AssetForm, AssetRecord, SensorTagForm, SensorTagRecord};
pub use device::{DeviceCreateForm, DeviceUpdateForm};
pub use library::TemplateForm;
pub use scene::{AssetFields, SceneAssetDescriptor, SceneItem, ScenePlan, SceneSaveRequest};
pub use tenant::{ClientForm, PlantForm};

use plantwise_common::{MAX_NAME_LENGTH, PlantwiseError};

/// Trim a required name-like field and check its length.
pub fn required_text(field: &str, value: &str) -> Result<String, PlantwiseError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PlantwiseError::validation(format!(
            "'{}' must not be empty",
            field
        )));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(PlantwiseError::validation(format!(
            "'{}' must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(trimmed.to_string())
}

/// Same as [`required_text`] but for optional fields, where blank means empty.
pub fn optional_text(field: &str, value: Option<&str>) -> Result<String, PlantwiseError> {
    match value.map(str::trim) {
        None | Some("") => Ok(String::new()),
        Some(v) => required_text(field, v),
    }
}

/// Reject triples containing NaN or infinite components.
pub fn finite_triple(field: &str, value: [f64; 3]) -> Result<[f64; 3], PlantwiseError> {
    if value.iter().all(|v| v.is_finite()) {
        Ok(value)
    } else {
        Err(PlantwiseError::validation(format!(
            "'{}' must contain finite numbers",
            field
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("name", "  Pump ").unwrap(), "Pump");
    }

    #[test]
    fn test_required_text_rejects_blank_and_long() {
        assert!(required_text("name", "   ").is_err());
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(required_text("name", &long).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text("location", None).unwrap(), "");
        assert_eq!(optional_text("location", Some("  ")).unwrap(), "");
        assert_eq!(optional_text("location", Some(" NY ")).unwrap(), "NY");
    }

    #[test]
    fn test_finite_triple() {
        assert!(finite_triple("scale", [1.0, 1.0, 1.0]).is_ok());
        assert!(finite_triple("scale", [f64::NAN, 1.0, 1.0]).is_err());
        assert!(finite_triple("scale", [f64::INFINITY, 1.0, 1.0]).is_err());
    }
}
