//! Query parameters of the list endpoints

use serde::Deserialize;

use plantwise_common::PlantwiseError;
use plantwise_persistence::AssetCategory;

#[derive(Debug, Default, Deserialize)]
pub struct ClientFilter {
    pub client: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

impl CategoryFilter {
    pub fn category(&self) -> Result<Option<AssetCategory>, PlantwiseError> {
        match self.category.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value
                .parse::<AssetCategory>()
                .map(Some)
                .map_err(PlantwiseError::validation),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlantFilter {
    pub plant: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssetFilter {
    pub asset: Option<i64>,
}
