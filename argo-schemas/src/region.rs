use serde::{Deserialize, Serialize};

/// A named latitude/longitude bounding box. Bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: String,
    pub display_name: String,
    pub latitude_range: (f64, f64),
    pub longitude_range: (f64, f64),
}

impl Region {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let (lat_min, lat_max) = self.latitude_range;
        let (lon_min, lon_max) = self.longitude_range;
        (lat_min..=lat_max).contains(&latitude) && (lon_min..=lon_max).contains(&longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arabian_sea() -> Region {
        Region {
            region_id: "arabian_sea".to_string(),
            display_name: "Arabian Sea".to_string(),
            latitude_range: (10.0, 25.0),
            longitude_range: (55.0, 80.0),
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let region = arabian_sea();
        assert!(region.contains(10.0, 55.0));
        assert!(region.contains(25.0, 80.0));
        assert!(region.contains(15.2, 68.5));
        assert!(!region.contains(6.3, 79.8));
        assert!(!region.contains(15.0, 80.1));
    }
}
