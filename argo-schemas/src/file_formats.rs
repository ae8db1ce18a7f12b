use crate::{
    intent::{IntentKeywords, RegionMarkers},
    region::Region,
    unit::SensorUnit,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogFile {
    pub schema_version: String,
    pub units: Vec<SensorUnit>,
    pub regions: Vec<Region>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IntentFile {
    pub schema_version: String,
    pub intents: Vec<IntentKeywords>,
    #[serde(default)]
    pub region_markers: Option<Vec<RegionMarkers>>,
    #[serde(default)]
    pub default_region: Option<String>,
}
