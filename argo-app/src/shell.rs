use crate::{map, plotting};
use anyhow::{Context, Result};
use argo_core::{
    catalog::Catalog,
    generator::DataGenerator,
    responder::{QueryProcessor, QueryResult, Visualization},
};
use argo_schemas::{
    profile::{Parameter, Profile},
    unit::SensorUnit,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Quick-select questions offered to new users.
pub const SAMPLE_QUERIES: [&str; 5] = [
    "Show me temperature profiles near the equator",
    "Where are the ARGO floats in Arabian Sea?",
    "Compare Arabian Sea and Bay of Bengal",
    "What's the salinity profile for float 2902746?",
    "Show recent temperature data",
];

/// Answers one question: prints the response and writes whatever
/// visuals the result carries into `out_dir`.
pub fn answer_query(
    processor: &mut QueryProcessor,
    query: &str,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let result = processor.process(query);

    println!("\n--- [Response] {} ---", result.title);
    println!("{}", result.response_text);

    let written = render_result(&result, out_dir)?;
    if written.is_empty() {
        println!("(no visualization for this query)");
    }
    for path in &written {
        println!("  - {}", path.display());
    }
    Ok(written)
}

/// Dispatches a result to the matching renderer and writes the artifacts.
pub fn render_result(result: &QueryResult, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let Some(visualization) = &result.visualization else {
        return Ok(Vec::new());
    };
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    let mut written = Vec::new();
    match visualization {
        Visualization::TemperatureProfile(profile) => {
            written.push(write_depth_chart(
                out_dir,
                profile,
                Parameter::Temperature,
                &result.title,
            )?);
            // Every temperature answer also shows the matching salinity profile.
            let salinity_title = result.title.replace("Temperature", "Salinity");
            written.push(write_depth_chart(
                out_dir,
                profile,
                Parameter::Salinity,
                &salinity_title,
            )?);
        }
        Visualization::SalinityProfile(profile) => {
            written.push(write_depth_chart(
                out_dir,
                profile,
                Parameter::Salinity,
                &result.title,
            )?);
        }
        Visualization::FloatMap(units) => {
            written.push(write_map(out_dir, "float_map.html", units, &result.title)?);
        }
        Visualization::ComparisonMap(groups) => {
            let chart = plotting::comparison_chart(groups, &result.title);
            written.push(write_artifact(out_dir, "regional_comparison.svg", &chart.render_svg()?)?);

            let combined: Vec<SensorUnit> =
                groups.iter().flat_map(|g| g.units.iter().cloned()).collect();
            written.push(write_map(
                out_dir,
                "comparison_map.html",
                &combined,
                "Combined Float Locations",
            )?);
        }
    }

    info!(kind = ?visualization.kind(), files = written.len(), "visualization rendered");
    Ok(written)
}

/// Renders the surface time series of one unit. `Ok(None)` when the unit
/// is unknown or produced no profiles.
pub fn render_history(
    generator: &mut DataGenerator,
    unit_id: &str,
    count: usize,
    parameter: Parameter,
    out_dir: &Path,
) -> Result<Option<PathBuf>> {
    let Some(profiles) = generator.get_profiles(unit_id, count) else {
        warn!(unit_id, "unknown sensor unit");
        return Ok(None);
    };
    let Some(chart) = plotting::time_series(&profiles, parameter) else {
        return Ok(None);
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;
    let file_name = format!("{}_{}_time_series.svg", unit_id, parameter.label().to_lowercase());
    let path = write_artifact(out_dir, &file_name, &chart.render_svg()?)?;

    for (date, value) in &chart.points {
        println!("  {}  {:>6.2} {}", date, value, parameter.unit());
    }
    Ok(Some(path))
}

pub fn print_samples() {
    println!("Try these queries:");
    for (i, query) in SAMPLE_QUERIES.iter().enumerate() {
        println!("  {}. {}", i + 1, query);
    }
}

pub fn print_status(catalog: &Catalog) {
    println!("\n--- [System Status] ---");
    println!("{} ARGO floats loaded ({} active)", catalog.units().len(), catalog.active_count());
    println!("Regions:");
    for region in catalog.regions() {
        println!(
            "  - {:<14} {:<14} lat {:>6.1}..{:<6.1} lon {:>6.1}..{:<6.1}",
            region.region_id,
            region.display_name,
            region.latitude_range.0,
            region.latitude_range.1,
            region.longitude_range.0,
            region.longitude_range.1
        );
    }
    println!("Floats:");
    for unit in catalog.units() {
        println!(
            "  - {} | {:>6.2}, {:>6.2} | {:<8} | deployed {} | {:>3} cycles",
            unit.unit_id,
            unit.latitude,
            unit.longitude,
            unit.status,
            unit.deployment_date,
            unit.cycle_count
        );
    }
}

fn write_depth_chart(
    out_dir: &Path,
    profile: &Profile,
    parameter: Parameter,
    title: &str,
) -> Result<PathBuf> {
    let chart = plotting::depth_chart(profile, parameter, title);
    let file_name = format!("{}_profile.svg", parameter.label().to_lowercase());
    write_artifact(out_dir, &file_name, &chart.render_svg()?)
}

fn write_map(
    out_dir: &Path,
    file_name: &str,
    units: &[SensorUnit],
    title: &str,
) -> Result<PathBuf> {
    let html = map::float_map(units, title).to_html()?;
    write_artifact(out_dir, file_name, &html)
}

fn write_artifact(out_dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    let path = out_dir.join(file_name);
    fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argo_core::{classifier::QueryClassifier, generator::DEFAULT_SEED};

    fn processor() -> QueryProcessor {
        QueryProcessor::new(
            QueryClassifier::builtin().unwrap(),
            DataGenerator::new(Catalog::builtin(), DEFAULT_SEED),
        )
    }

    #[test]
    fn test_float_map_result_writes_one_page() {
        let dir = tempfile::tempdir().unwrap();
        let result = processor().process("Where are the ARGO floats in Arabian Sea?");
        let written = render_result(&result, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("float_map.html")]);
        let html = fs::read_to_string(&written[0]).unwrap();
        assert!(html.contains("ARGO Float Locations - Arabian Sea"));
    }

    #[test]
    fn test_temperature_result_writes_both_depth_charts() {
        let dir = tempfile::tempdir().unwrap();
        let result = processor().process("temperature of float 2902746");
        let written = render_result(&result, dir.path()).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("temperature_profile.svg"),
                dir.path().join("salinity_profile.svg"),
            ]
        );
        let temperature = fs::read_to_string(&written[0]).unwrap();
        assert!(temperature.contains("Temperature Profile - Float 2902746"));
        let salinity = fs::read_to_string(&written[1]).unwrap();
        assert!(salinity.contains("Salinity Profile - Float 2902746"));
        assert!(!salinity.contains("Temperature Profile"));
    }

    #[test]
    fn test_comparison_result_writes_chart_and_combined_map() {
        let dir = tempfile::tempdir().unwrap();
        let result = processor().process("Compare Arabian Sea and Bay of Bengal");
        let written = render_result(&result, dir.path()).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("regional_comparison.svg"),
                dir.path().join("comparison_map.html"),
            ]
        );
        let svg = fs::read_to_string(&written[0]).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Arabian Sea"));
        let html = fs::read_to_string(&written[1]).unwrap();
        assert!(html.contains("Combined Float Locations"));
    }

    #[test]
    fn test_result_without_data_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never_created");
        let result = processor().process("Show me temperature profiles near the equator");
        assert!(render_result(&result, &out).unwrap().is_empty());
        assert!(!out.exists());
    }

    #[test]
    fn test_history_for_unknown_unit_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut generator = DataGenerator::new(Catalog::builtin(), DEFAULT_SEED);
        let path = render_history(&mut generator, "0000000", 6, Parameter::Temperature, dir.path())
            .unwrap();
        assert!(path.is_none());
    }

    #[test]
    fn test_sample_queries_all_produce_a_response() {
        let mut p = processor();
        for query in SAMPLE_QUERIES {
            assert!(!p.process(query).response_text.is_empty());
        }
    }
}
