use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArgoError {
    #[error("Sensor unit '{0}' is listed more than once in the catalog")]
    DuplicateUnit(String),

    #[error("Sensor unit with an empty identifier found in the catalog")]
    EmptyUnitId,

    #[error("Region '{0}' has an inverted {1} range")]
    InvalidRegion(String, &'static str),

    #[error("Keyword table for intent '{0}' has no keywords")]
    EmptyKeywordSet(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
