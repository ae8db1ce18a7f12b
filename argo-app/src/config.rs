use anyhow::{Context, Result};
use argo_core::{catalog::Catalog, classifier::QueryClassifier};
use argo_schemas::file_formats::IntentFile;
use serde::de::DeserializeOwned;
use std::{fs, path::Path};
use tracing::info;

pub const CATALOG_FILE: &str = "catalog.yaml";
pub const INTENTS_FILE: &str = "intents.yaml";

/// The static tables a session runs against. Any file missing from the
/// knowledge base directory falls back to the built-in table.
pub struct KnowledgeBase {
    pub catalog: Catalog,
    pub classifier: QueryClassifier,
}

impl KnowledgeBase {
    pub fn load(base_path: Option<&Path>) -> Result<Self> {
        let Some(base_path) = base_path else {
            info!("using built-in catalog and keyword table");
            return Self::builtin();
        };
        info!("Loading knowledge base from '{}'...", base_path.display());

        let catalog_path = base_path.join(CATALOG_FILE);
        let catalog = if catalog_path.is_file() {
            Catalog::load(&catalog_path)
                .with_context(|| format!("Failed to load catalog from {:?}", catalog_path))?
        } else {
            Catalog::builtin()
        };

        let intents_path = base_path.join(INTENTS_FILE);
        let classifier = if intents_path.is_file() {
            let file: IntentFile = load_yaml_file(&intents_path)?;
            QueryClassifier::from_file(file)
                .with_context(|| format!("Invalid keyword table in {:?}", intents_path))?
        } else {
            QueryClassifier::builtin()?
        };

        info!(
            units = catalog.units().len(),
            regions = catalog.regions().len(),
            intents = classifier.intents().len(),
            "Knowledge base loaded successfully."
        );
        Ok(Self { catalog, classifier })
    }

    pub fn builtin() -> Result<Self> {
        Ok(Self {
            catalog: Catalog::builtin(),
            classifier: QueryClassifier::builtin()?,
        })
    }
}

fn load_yaml_file<F: DeserializeOwned>(path: &Path) -> Result<F> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse YAML from {:?}", path))
}
