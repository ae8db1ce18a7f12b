use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One depth-indexed snapshot of a unit. `depths`, `temperatures` and
/// `salinities` always share length and index order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub date: NaiveDate,
    pub unit_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub depths: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub salinities: Vec<f64>,
}

impl Profile {
    pub fn values(&self, parameter: Parameter) -> &[f64] {
        match parameter {
            Parameter::Temperature => &self.temperatures,
            Parameter::Salinity => &self.salinities,
        }
    }

    pub fn surface_value(&self, parameter: Parameter) -> Option<f64> {
        self.values(parameter).first().copied()
    }

    /// The deepest sample as `(depth, value)`.
    pub fn deepest(&self, parameter: Parameter) -> Option<(f64, f64)> {
        let depth = self.depths.last()?;
        let value = self.values(parameter).last()?;
        Some((*depth, *value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Temperature,
    Salinity,
}

impl Parameter {
    pub fn label(self) -> &'static str {
        match self {
            Parameter::Temperature => "Temperature",
            Parameter::Salinity => "Salinity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Parameter::Temperature => "°C",
            Parameter::Salinity => "PSU",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_and_deepest_values() {
        let profile = Profile {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            unit_id: "2902746".to_string(),
            latitude: 15.0,
            longitude: 68.0,
            depths: vec![0.0, 50.0, 100.0],
            temperatures: vec![28.0, 27.5, 20.0],
            salinities: vec![35.1, 35.0, 34.8],
        };
        assert_eq!(profile.surface_value(Parameter::Temperature), Some(28.0));
        assert_eq!(profile.deepest(Parameter::Salinity), Some((100.0, 34.8)));
    }

    #[test]
    fn test_empty_profile_has_no_surface_value() {
        let profile = Profile {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            unit_id: "x".to_string(),
            latitude: 0.0,
            longitude: 0.0,
            depths: vec![],
            temperatures: vec![],
            salinities: vec![],
        };
        assert_eq!(profile.surface_value(Parameter::Temperature), None);
        assert_eq!(profile.deepest(Parameter::Temperature), None);
    }
}
