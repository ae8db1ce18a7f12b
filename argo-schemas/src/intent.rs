use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of categories a free-text question can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    TemperatureProfile,
    SalinityProfile,
    FloatLocations,
    Comparison,
    RecentData,
    General,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::TemperatureProfile => "temperature_profile",
            Intent::SalinityProfile => "salinity_profile",
            Intent::FloatLocations => "float_locations",
            Intent::Comparison => "comparison",
            Intent::RecentData => "recent_data",
            Intent::General => "general",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationKind {
    TemperatureProfile,
    SalinityProfile,
    FloatMap,
    ComparisonMap,
}

/// One row of the ordered keyword table. Earlier rows win ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentKeywords {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

/// Maps textual markers onto a region id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMarkers {
    pub region_id: String,
    pub markers: Vec<String>,
}
