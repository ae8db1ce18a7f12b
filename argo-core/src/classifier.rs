//! Keyword-driven intent classification and entity extraction.

use crate::error::ArgoError;
use argo_schemas::{
    file_formats::IntentFile,
    intent::{Intent, IntentKeywords, RegionMarkers},
};
use regex::Regex;

pub const DEFAULT_REGION: &str = "indian_ocean";
pub const UNIT_ID_LENGTH: usize = 7;

/// Classifies free text by substring containment over an ordered keyword
/// table. All matching is done on the lower-cased input.
#[derive(Debug, Clone)]
pub struct QueryClassifier {
    intents: Vec<IntentKeywords>,
    region_markers: Vec<RegionMarkers>,
    default_region: String,
    digit_runs: Regex,
}

impl QueryClassifier {
    pub fn new(
        intents: Vec<IntentKeywords>,
        region_markers: Vec<RegionMarkers>,
        default_region: impl Into<String>,
    ) -> Result<Self, ArgoError> {
        if let Some(empty) = intents.iter().find(|row| row.keywords.is_empty()) {
            return Err(ArgoError::EmptyKeywordSet(empty.intent.to_string()));
        }
        let digit_runs = Regex::new(r"\d+")
            .map_err(|e| ArgoError::ConfigError(format!("invalid identifier pattern: {e}")))?;
        Ok(Self {
            intents: lowercase_keywords(intents),
            region_markers: region_markers
                .into_iter()
                .map(|r| RegionMarkers {
                    region_id: r.region_id,
                    markers: r.markers.into_iter().map(|m| m.to_lowercase()).collect(),
                })
                .collect(),
            default_region: default_region.into(),
            digit_runs,
        })
    }

    /// Builds a classifier from a YAML intent file, keeping the built-in
    /// region markers where the file does not provide its own.
    pub fn from_file(file: IntentFile) -> Result<Self, ArgoError> {
        Self::new(
            file.intents,
            file.region_markers.unwrap_or_else(default_region_markers),
            file.default_region.unwrap_or_else(|| DEFAULT_REGION.to_string()),
        )
    }

    pub fn builtin() -> Result<Self, ArgoError> {
        Self::new(default_intents(), default_region_markers(), DEFAULT_REGION)
    }

    pub fn intents(&self) -> &[IntentKeywords] {
        &self.intents
    }

    pub fn classify(&self, text: &str) -> Intent {
        let lowered = text.to_lowercase();
        self.intents
            .iter()
            .find(|row| row.keywords.iter().any(|k| lowered.contains(k.as_str())))
            .map_or(Intent::General, |row| row.intent)
    }

    /// Always yields a region id, falling back to the default region.
    pub fn extract_region(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        self.region_markers
            .iter()
            .find(|r| r.markers.iter().any(|m| lowered.contains(m.as_str())))
            .map_or_else(|| self.default_region.clone(), |r| r.region_id.clone())
    }

    /// The first run of digits that is exactly seven long.
    pub fn extract_unit_identifier(&self, text: &str) -> Option<String> {
        self.digit_runs
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|run| run.len() == UNIT_ID_LENGTH)
            .map(str::to_string)
    }
}

fn lowercase_keywords(intents: Vec<IntentKeywords>) -> Vec<IntentKeywords> {
    intents
        .into_iter()
        .map(|row| IntentKeywords {
            intent: row.intent,
            keywords: row.keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        })
        .collect()
}

fn keywords(intent: Intent, words: &[&str]) -> IntentKeywords {
    IntentKeywords {
        intent,
        keywords: words.iter().map(|w| w.to_string()).collect(),
    }
}

/// "profile" sits with salinity so that "salinity profile" is not taken
/// by the temperature row, which is checked first.
pub fn default_intents() -> Vec<IntentKeywords> {
    vec![
        keywords(Intent::TemperatureProfile, &["temperature", "temp", "depth"]),
        keywords(Intent::SalinityProfile, &["salinity", "salt", "profile"]),
        keywords(Intent::FloatLocations, &["float", "location", "where", "position"]),
        keywords(Intent::Comparison, &["compare", "comparison", "between", "vs", "versus"]),
        keywords(Intent::RecentData, &["recent", "latest", "current", "now", "today"]),
    ]
}

pub fn default_region_markers() -> Vec<RegionMarkers> {
    let markers = |region_id: &str, words: &[&str]| RegionMarkers {
        region_id: region_id.to_string(),
        markers: words.iter().map(|w| w.to_string()).collect(),
    };
    vec![
        markers("arabian_sea", &["arabian sea", "arabian"]),
        markers("bay_of_bengal", &["bay of bengal", "bengal", "bay"]),
        markers("equator", &["equator", "equatorial"]),
    ]
}
