use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    Active,
    Inactive,
}

impl UnitStatus {
    pub fn is_active(self) -> bool {
        matches!(self, UnitStatus::Active)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitStatus::Active => "Active",
            UnitStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single profiling float as listed in the static catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorUnit {
    pub unit_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: UnitStatus,
    pub deployment_date: NaiveDate,
    pub cycle_count: u32,
}

impl SensorUnit {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_deserializes_from_yaml() {
        let yaml = r#"
unit_id: "2902746"
latitude: 15.2
longitude: 68.5
status: Active
deployment_date: 2023-01-15
cycle_count: 45
"#;
        let unit: SensorUnit = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(unit.unit_id, "2902746");
        assert!(unit.is_active());
        assert_eq!(unit.deployment_date, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(UnitStatus::Inactive.to_string(), "Inactive");
        assert!(!UnitStatus::Inactive.is_active());
    }
}
