//! Synthetic profile generation for the units in a [`Catalog`].

use crate::{catalog::Catalog, export::ExportRow};
use argo_schemas::{profile::Profile, unit::SensorUnit};
use chrono::{Datelike, Days, Local, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;
use tracing::debug;

pub const DEFAULT_SEED: u64 = 42;
pub const DEPTH_STEP: f64 = 50.0;
pub const MAX_DEPTH: f64 = 1950.0;
pub const TEMPERATURE_FLOOR: f64 = 2.0;
pub const SALINITY_BAND: (f64, f64) = (30.0, 38.0);
pub const BASE_SURFACE_TEMPERATURE: f64 = 26.0;
pub const SURFACE_SALINITY: f64 = 35.0;
pub const EXPORT_PROFILES_PER_UNIT: usize = 3;

const MIXED_LAYER_DEPTH: f64 = 50.0;
const THERMOCLINE_DEPTH: f64 = 200.0;
const HALOCLINE_DEPTH: f64 = 100.0;
const DAYS_PER_PROFILE: u64 = 30;
const MAX_DATE_JITTER_DAYS: u64 = 10;
const POSITION_JITTER_DEG: f64 = 0.5;

/// `0, 50, ..., 1950`.
pub fn depth_levels() -> Vec<f64> {
    let steps = (MAX_DEPTH / DEPTH_STEP) as usize;
    (0..=steps).map(|i| i as f64 * DEPTH_STEP).collect()
}

/// Owns the random stream. Every call advances it, so only the first
/// call after construction is reproducible from the seed alone.
pub struct DataGenerator {
    catalog: Catalog,
    rng: StdRng,
    reference_date: NaiveDate,
}

impl DataGenerator {
    pub fn new(catalog: Catalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
            reference_date: Local::now().date_naive(),
        }
    }

    /// Pins the date profiles are counted back from.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn generate_temperature_series(&mut self, surface_value: f64) -> Vec<(f64, f64)> {
        depth_levels()
            .into_iter()
            .map(|depth| {
                let value = if depth <= MIXED_LAYER_DEPTH {
                    surface_value + self.rng.gen_range(-1.0..=1.0)
                } else if depth <= THERMOCLINE_DEPTH {
                    surface_value - (depth - MIXED_LAYER_DEPTH) * 0.1
                        + self.rng.gen_range(-2.0..=2.0)
                } else {
                    let deep = surface_value - 20.0 - (depth - THERMOCLINE_DEPTH) * 0.002;
                    deep.max(TEMPERATURE_FLOOR) + self.rng.gen_range(-1.0..=1.0)
                };
                (depth, value.max(TEMPERATURE_FLOOR))
            })
            .collect()
    }

    pub fn generate_salinity_series(&mut self, surface_value: f64) -> Vec<(f64, f64)> {
        let (low, high) = SALINITY_BAND;
        depth_levels()
            .into_iter()
            .map(|depth| {
                let noise = if depth <= HALOCLINE_DEPTH {
                    self.rng.gen_range(-0.5..=0.5)
                } else {
                    self.rng.gen_range(-1.0..=1.0)
                };
                (depth, (surface_value + noise).clamp(low, high))
            })
            .collect()
    }

    /// Returns `None` for an unknown unit, otherwise up to `count` profiles
    /// roughly a month apart, newest first. Generation stops at the first
    /// date that would fall before `NaiveDate::MIN`.
    pub fn get_profiles(&mut self, unit_id: &str, count: usize) -> Option<Vec<Profile>> {
        let unit = self.catalog.unit(unit_id)?.clone();

        // Stops early once the dates would run past the calendar's start.
        let mut profiles: Vec<Profile> = (0..count as u64)
            .map_while(|i| self.generate_profile(&unit, i))
            .collect();
        profiles.sort_by(|a, b| b.date.cmp(&a.date));

        debug!(unit_id, count = profiles.len(), "generated profiles");
        Some(profiles)
    }

    fn generate_profile(&mut self, unit: &SensorUnit, months_back: u64) -> Option<Profile> {
        let jitter = self.rng.gen_range(0..=MAX_DATE_JITTER_DAYS);
        let offset = DAYS_PER_PROFILE.checked_mul(months_back)?.checked_add(jitter)?;
        let date = self.reference_date.checked_sub_days(Days::new(offset))?;

        let seasonal = (2.0 * PI * f64::from(date.ordinal()) / 365.25).sin() * 3.0;
        let surface_temperature =
            BASE_SURFACE_TEMPERATURE + seasonal + (unit.latitude - 10.0) * 0.2;

        let temperature_series = self.generate_temperature_series(surface_temperature);
        let salinity_series = self.generate_salinity_series(SURFACE_SALINITY);

        let latitude =
            unit.latitude + self.rng.gen_range(-POSITION_JITTER_DEG..=POSITION_JITTER_DEG);
        let longitude =
            unit.longitude + self.rng.gen_range(-POSITION_JITTER_DEG..=POSITION_JITTER_DEG);

        let (depths, temperatures): (Vec<f64>, Vec<f64>) = temperature_series.into_iter().unzip();
        let salinities = salinity_series.into_iter().map(|(_, s)| s).collect();

        Some(Profile {
            date,
            unit_id: unit.unit_id.clone(),
            latitude,
            longitude,
            depths,
            temperatures,
            salinities,
        })
    }

    /// Units inside the named region. An unknown name yields the full table.
    pub fn filter_units_by_region(&self, region_name: &str) -> Vec<SensorUnit> {
        match self.catalog.region(region_name) {
            Some(region) => self
                .catalog
                .units()
                .iter()
                .filter(|u| region.contains(u.latitude, u.longitude))
                .cloned()
                .collect(),
            None => {
                debug!(region_name, "unknown region, returning every unit");
                self.catalog.units().to_vec()
            }
        }
    }

    /// One row per (unit, profile, depth).
    pub fn export_flat_table(&mut self) -> Vec<ExportRow> {
        let unit_ids: Vec<String> = self
            .catalog
            .units()
            .iter()
            .map(|u| u.unit_id.clone())
            .collect();

        let mut rows = Vec::new();
        for unit_id in unit_ids {
            let profiles = self
                .get_profiles(&unit_id, EXPORT_PROFILES_PER_UNIT)
                .unwrap_or_default();
            for profile in &profiles {
                rows.extend(ExportRow::from_profile(profile));
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn generator() -> DataGenerator {
        DataGenerator::new(Catalog::builtin(), DEFAULT_SEED)
            .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn test_depth_levels_cover_surface_to_1950() {
        let depths = depth_levels();
        assert_eq!(depths.len(), 40);
        assert_eq!(depths.first(), Some(&0.0));
        assert_eq!(depths.last(), Some(&1950.0));
    }

    #[test]
    fn test_cold_surface_is_clamped_to_floor() {
        let mut gen = generator();
        let series = gen.generate_temperature_series(-10.0);
        assert!(series.iter().all(|&(_, t)| t >= TEMPERATURE_FLOOR));
        assert!(series[..4].iter().all(|&(_, t)| t == TEMPERATURE_FLOOR));
    }

    #[test]
    fn test_temperature_decays_with_depth() {
        let mut gen = generator();
        let series = gen.generate_temperature_series(28.0);
        let surface = series[0].1;
        let deep = series.last().unwrap().1;
        assert!(surface > 26.9 && surface < 29.1);
        assert!(deep < 10.0);
    }

    #[test]
    fn test_unknown_unit_has_no_profiles() {
        let mut gen = generator();
        assert!(gen.get_profiles("0000000", 3).is_none());
    }

    #[test]
    fn test_profiles_are_newest_first_and_aligned() {
        let mut gen = generator();
        let profiles = gen.get_profiles("2902746", 6).unwrap();
        assert_eq!(profiles.len(), 6);
        for pair in profiles.windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
        for p in &profiles {
            assert_eq!(p.depths.len(), p.temperatures.len());
            assert_eq!(p.depths.len(), p.salinities.len());
            assert_eq!(p.unit_id, "2902746");
            assert!((p.latitude - 15.2).abs() <= 0.5);
            assert!((p.longitude - 68.5).abs() <= 0.5);
        }
        let newest = profiles[0].date;
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(newest <= reference && reference - newest <= Duration::days(10));
    }

    #[test]
    fn test_profiles_stop_at_earliest_representable_date() {
        let start = NaiveDate::MIN.checked_add_days(Days::new(100)).unwrap();
        let mut gen =
            DataGenerator::new(Catalog::builtin(), DEFAULT_SEED).with_reference_date(start);
        let profiles = gen.get_profiles("2902746", 6).unwrap();
        assert!(profiles.len() >= 3 && profiles.len() < 6);
        assert!(profiles.iter().all(|p| p.date >= NaiveDate::MIN && p.date <= start));
    }

    #[test]
    fn test_huge_count_is_bounded_by_calendar() {
        let start = NaiveDate::MIN.checked_add_days(Days::new(365)).unwrap();
        let mut gen =
            DataGenerator::new(Catalog::builtin(), DEFAULT_SEED).with_reference_date(start);
        let profiles = gen.get_profiles("2902750", usize::MAX).unwrap();
        assert!(profiles.len() <= 13);
    }

    #[test]
    fn test_zero_count_yields_empty_list() {
        let mut gen = generator();
        assert_eq!(gen.get_profiles("2902746", 0), Some(vec![]));
    }

    #[test]
    fn test_same_seed_reproduces_first_generation() {
        let mut a = generator();
        let mut b = generator();
        assert_eq!(a.get_profiles("2902750", 2), b.get_profiles("2902750", 2));
    }

    #[test]
    fn test_region_filter_is_idempotent() {
        let gen = generator();
        let ids = |units: Vec<SensorUnit>| -> BTreeSet<String> {
            units.into_iter().map(|u| u.unit_id).collect()
        };
        let first = ids(gen.filter_units_by_region("arabian_sea"));
        let second = ids(gen.filter_units_by_region("arabian_sea"));
        assert_eq!(first, second);
        let expected: BTreeSet<String> = ["2902746", "2902747", "2902749", "2902751", "2902752"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(first, expected);
    }

    #[test]
    fn test_overlapping_regions_share_units() {
        let gen = generator();
        let arabian = gen.filter_units_by_region("arabian_sea");
        let ocean = gen.filter_units_by_region("indian_ocean");
        assert!(arabian.iter().all(|u| ocean.contains(u)));
        assert_eq!(ocean.len(), 7);
    }

    #[test]
    fn test_unknown_region_returns_full_table() {
        let gen = generator();
        assert_eq!(gen.filter_units_by_region("atlantis").len(), 7);
        assert!(gen.filter_units_by_region("equator").is_empty());
    }

    #[test]
    fn test_export_flat_table_row_count() {
        let mut gen = generator();
        let rows = gen.export_flat_table();
        assert_eq!(rows.len(), 7 * EXPORT_PROFILES_PER_UNIT * 40);
        assert!(rows.iter().all(|r| r.temperature >= TEMPERATURE_FLOOR));
    }

    proptest! {
        #[test]
        fn prop_temperature_never_below_floor(surface in -40.0f64..60.0, seed in any::<u64>()) {
            let mut gen = DataGenerator::new(Catalog::builtin(), seed);
            let series = gen.generate_temperature_series(surface);
            prop_assert_eq!(series.len(), 40);
            prop_assert!(series.iter().all(|&(_, t)| t >= TEMPERATURE_FLOOR));
        }

        #[test]
        fn prop_salinity_within_band(surface in 0.0f64..60.0, seed in any::<u64>()) {
            let mut gen = DataGenerator::new(Catalog::builtin(), seed);
            let series = gen.generate_salinity_series(surface);
            prop_assert_eq!(series.len(), 40);
            prop_assert!(series.iter().all(|&(_, s)| (30.0..=38.0).contains(&s)));
        }
    }
}
