//! The static configuration store: sensor units and named regions.

use crate::error::ArgoError;
use argo_schemas::{
    file_formats::CatalogFile,
    region::Region,
    unit::{SensorUnit, UnitStatus},
};
use chrono::NaiveDate;
use std::{collections::HashSet, fs, path::Path};

/// Immutable table of units and regions. Regions keep declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    units: Vec<SensorUnit>,
    regions: Vec<Region>,
}

impl Catalog {
    pub fn new(units: Vec<SensorUnit>, regions: Vec<Region>) -> Result<Self, ArgoError> {
        let mut seen = HashSet::new();
        for unit in &units {
            if unit.unit_id.trim().is_empty() {
                return Err(ArgoError::EmptyUnitId);
            }
            if !seen.insert(unit.unit_id.as_str()) {
                return Err(ArgoError::DuplicateUnit(unit.unit_id.clone()));
            }
        }
        for region in &regions {
            if region.latitude_range.0 > region.latitude_range.1 {
                return Err(ArgoError::InvalidRegion(region.region_id.clone(), "latitude"));
            }
            if region.longitude_range.0 > region.longitude_range.1 {
                return Err(ArgoError::InvalidRegion(region.region_id.clone(), "longitude"));
            }
        }
        Ok(Self { units, regions })
    }

    pub fn from_file(file: CatalogFile) -> Result<Self, ArgoError> {
        Self::new(file.units, file.regions)
    }

    /// Reads and validates a YAML catalog file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ArgoError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content =
            fs::read_to_string(path).map_err(|e| ArgoError::FileIO(display.clone(), e))?;
        let file: CatalogFile =
            serde_yaml::from_str(&content).map_err(|e| ArgoError::YamlParsing(display, e))?;
        Self::from_file(file)
    }

    /// The Indian Ocean demo deployment.
    pub fn builtin() -> Self {
        let units = vec![
            unit("2902746", 15.2, 68.5, UnitStatus::Active, (2023, 1, 15), 45),
            unit("2902747", 12.8, 75.3, UnitStatus::Active, (2023, 2, 20), 38),
            unit("2902748", 8.1, 73.2, UnitStatus::Inactive, (2022, 11, 10), 67),
            unit("2902749", 20.5, 70.1, UnitStatus::Active, (2023, 3, 5), 32),
            unit("2902750", 6.3, 79.8, UnitStatus::Active, (2023, 1, 28), 41),
            unit("2902751", 18.7, 63.2, UnitStatus::Active, (2023, 4, 12), 28),
            unit("2902752", 10.4, 77.6, UnitStatus::Active, (2023, 2, 8), 35),
        ];
        let regions = vec![
            region("arabian_sea", "Arabian Sea", (10.0, 25.0), (55.0, 80.0)),
            region("bay_of_bengal", "Bay of Bengal", (5.0, 22.0), (80.0, 100.0)),
            region("indian_ocean", "Indian Ocean", (-10.0, 30.0), (40.0, 100.0)),
            region("equator", "Near Equator", (-5.0, 5.0), (40.0, 100.0)),
        ];
        Self { units, regions }
    }

    pub fn units(&self) -> &[SensorUnit] {
        &self.units
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn unit(&self, unit_id: &str) -> Option<&SensorUnit> {
        self.units.iter().find(|u| u.unit_id == unit_id)
    }

    /// Case-insensitive region lookup.
    pub fn region(&self, region_id: &str) -> Option<&Region> {
        let wanted = region_id.to_lowercase();
        self.regions.iter().find(|r| r.region_id.to_lowercase() == wanted)
    }

    pub fn display_name<'a>(&'a self, region_id: &'a str) -> &'a str {
        self.region(region_id).map_or(region_id, |r| r.display_name.as_str())
    }

    pub fn active_count(&self) -> usize {
        self.units.iter().filter(|u| u.is_active()).count()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn unit(
    id: &str,
    latitude: f64,
    longitude: f64,
    status: UnitStatus,
    (y, m, d): (i32, u32, u32),
    cycle_count: u32,
) -> SensorUnit {
    SensorUnit {
        unit_id: id.to_string(),
        latitude,
        longitude,
        status,
        deployment_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        cycle_count,
    }
}

fn region(id: &str, name: &str, lat: (f64, f64), lon: (f64, f64)) -> Region {
    Region {
        region_id: id.to_string(),
        display_name: name.to_string(),
        latitude_range: lat,
        longitude_range: lon,
    }
}
