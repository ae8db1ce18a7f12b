//! Turns a free-text question into a [`QueryResult`]: classification,
//! entity extraction, then one of four template-driven handlers.

use crate::{classifier::QueryClassifier, generator::DataGenerator};
use argo_schemas::{
    intent::{Intent, VisualizationKind},
    profile::{Parameter, Profile},
    unit::SensorUnit,
};
use tracing::{debug, info};

/// The two regions the comparison handler always reports on.
pub const COMPARISON_REGIONS: [&str; 2] = ["arabian_sea", "bay_of_bengal"];

#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup {
    pub region_id: String,
    pub display_name: String,
    pub units: Vec<SensorUnit>,
}

/// Structured data attached to a result, tagged by how it is drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Visualization {
    TemperatureProfile(Profile),
    SalinityProfile(Profile),
    FloatMap(Vec<SensorUnit>),
    ComparisonMap(Vec<RegionGroup>),
}

impl Visualization {
    pub fn kind(&self) -> VisualizationKind {
        match self {
            Visualization::TemperatureProfile(_) => VisualizationKind::TemperatureProfile,
            Visualization::SalinityProfile(_) => VisualizationKind::SalinityProfile,
            Visualization::FloatMap(_) => VisualizationKind::FloatMap,
            Visualization::ComparisonMap(_) => VisualizationKind::ComparisonMap,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub intent: Intent,
    pub region: String,
    pub response_text: String,
    pub title: String,
    /// `None` when there was nothing to show.
    pub visualization: Option<Visualization>,
}

impl QueryResult {
    pub fn visualization_kind(&self) -> Option<VisualizationKind> {
        self.visualization.as_ref().map(Visualization::kind)
    }
}

pub struct QueryProcessor {
    classifier: QueryClassifier,
    generator: DataGenerator,
}

impl QueryProcessor {
    pub fn new(classifier: QueryClassifier, generator: DataGenerator) -> Self {
        Self { classifier, generator }
    }

    pub fn classifier(&self) -> &QueryClassifier {
        &self.classifier
    }

    /// Never fails; degraded cases come back as a result without data.
    pub fn process(&mut self, text: &str) -> QueryResult {
        let intent = self.classifier.classify(text);
        let region = self.classifier.extract_region(text);
        let unit_id = self.classifier.extract_unit_identifier(text);
        info!(%intent, %region, unit_id = ?unit_id, "query classified");

        match intent {
            Intent::TemperatureProfile => self.handle_temperature(region, unit_id.as_deref()),
            Intent::FloatLocations => self.handle_locations(region),
            Intent::Comparison => self.handle_comparison(),
            Intent::SalinityProfile | Intent::RecentData | Intent::General => {
                self.handle_general(intent, region)
            }
        }
    }

    fn handle_temperature(&mut self, region: String, unit_id: Option<&str>) -> QueryResult {
        if let Some(unit_id) = unit_id {
            if let Some(profile) = self.newest_profile(unit_id) {
                let surface = profile.surface_value(Parameter::Temperature).unwrap_or_default();
                let (depth, deepest) = profile.deepest(Parameter::Temperature).unwrap_or_default();
                return QueryResult {
                    intent: Intent::TemperatureProfile,
                    response_text: format!(
                        "Temperature profile for ARGO float {unit_id}: Surface temperature is {surface:.1}°C, \
                         decreasing to {deepest:.1}°C at {depth:.0}m depth (a drop of {:.1}°C).",
                        surface - deepest
                    ),
                    title: format!("Temperature Profile - Float {unit_id}"),
                    visualization: Some(Visualization::TemperatureProfile(profile)),
                    region,
                };
            }
            debug!(unit_id, "unit not found, falling back to region");
        }

        let name = self.display_name(&region);
        let title = format!("Temperature Profile - {name}");
        let first_unit = self
            .generator
            .filter_units_by_region(&region)
            .into_iter()
            .next();

        match first_unit.and_then(|u| self.newest_profile(&u.unit_id)) {
            Some(profile) => {
                let surface = profile.surface_value(Parameter::Temperature).unwrap_or_default();
                QueryResult {
                    intent: Intent::TemperatureProfile,
                    response_text: format!(
                        "Temperature profiles in {name} show typical tropical ocean patterns with warm \
                         surface waters (~{surface:.1}°C) and cooler deep waters."
                    ),
                    title,
                    visualization: Some(Visualization::TemperatureProfile(profile)),
                    region,
                }
            }
            None => QueryResult {
                intent: Intent::TemperatureProfile,
                response_text: format!(
                    "No temperature data available for the specified criteria: \
                     there are no ARGO floats in the {name}."
                ),
                title,
                visualization: None,
                region,
            },
        }
    }

    fn handle_locations(&mut self, region: String) -> QueryResult {
        let units = self.generator.filter_units_by_region(&region);
        let active = units.iter().filter(|u| u.is_active()).count();
        let name = self.display_name(&region);

        QueryResult {
            intent: Intent::FloatLocations,
            response_text: format!(
                "Found {active} active ARGO floats in the {name}. These floats are continuously \
                 collecting temperature and salinity data from the ocean surface to 2000m depth."
            ),
            title: format!("ARGO Float Locations - {name}"),
            visualization: Some(Visualization::FloatMap(units)),
            region,
        }
    }

    fn handle_comparison(&mut self) -> QueryResult {
        let groups: Vec<RegionGroup> = COMPARISON_REGIONS
            .iter()
            .map(|&region_id| RegionGroup {
                region_id: region_id.to_string(),
                display_name: self.display_name(region_id),
                units: self.generator.filter_units_by_region(region_id),
            })
            .collect();

        let [first, second] = [&groups[0], &groups[1]];
        QueryResult {
            intent: Intent::Comparison,
            response_text: format!(
                "Regional comparison: {} has {} floats while {} has {} floats. The Arabian Sea \
                 typically shows higher salinity due to increased evaporation rates.",
                first.display_name,
                first.units.len(),
                second.display_name,
                second.units.len()
            ),
            title: format!(
                "Regional Comparison - {} vs {}",
                first.display_name, second.display_name
            ),
            region: first.region_id.clone(),
            visualization: Some(Visualization::ComparisonMap(groups)),
        }
    }

    fn handle_general(&mut self, intent: Intent, region: String) -> QueryResult {
        let units = self.generator.filter_units_by_region(&region);
        let name = self.display_name(&region);

        QueryResult {
            intent,
            response_text: format!(
                "The {name} has {} ARGO floats providing valuable oceanographic data. These \
                 autonomous instruments measure temperature, salinity, and pressure profiles from \
                 surface to 2000m depth every 10 days.",
                units.len()
            ),
            title: format!("ARGO Network - {name}"),
            visualization: Some(Visualization::FloatMap(units)),
            region,
        }
    }

    fn newest_profile(&mut self, unit_id: &str) -> Option<Profile> {
        self.generator
            .get_profiles(unit_id, 1)
            .and_then(|profiles| profiles.into_iter().next())
    }

    fn display_name(&self, region_id: &str) -> String {
        self.generator.catalog().display_name(region_id).to_string()
    }
}
