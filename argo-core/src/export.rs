use crate::error::ArgoError;
use argo_schemas::profile::Profile;
use chrono::NaiveDate;
use csv::Writer;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub float_id: String,
    pub date: NaiveDate,
    pub latitude: f64,
    pub longitude: f64,
    pub depth: f64,
    pub temperature: f64,
    pub salinity: f64,
}

impl ExportRow {
    pub fn from_profile(profile: &Profile) -> Vec<ExportRow> {
        profile
            .depths
            .iter()
            .zip(&profile.temperatures)
            .zip(&profile.salinities)
            .map(|((depth, temperature), salinity)| ExportRow {
                float_id: profile.unit_id.clone(),
                date: profile.date,
                latitude: profile.latitude,
                longitude: profile.longitude,
                depth: *depth,
                temperature: *temperature,
                salinity: *salinity,
            })
            .collect()
    }
}

/// Writes the rows as CSV with a header line, creating the parent
/// directory when needed. Returns the number of data rows written.
pub fn write_csv<P: AsRef<Path>>(rows: &[ExportRow], path: P) -> Result<usize, ArgoError> {
    let path = path.as_ref();
    let path_label = path.display().to_string();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ArgoError::FileIO(path_label.clone(), e))?;
    }

    let mut writer =
        Writer::from_path(path).map_err(|e| ArgoError::CsvError(path_label.clone(), e))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| ArgoError::CsvError(path_label.clone(), e))?;
    }
    writer.flush().map_err(|e| ArgoError::FileIO(path_label.clone(), e))?;

    info!(path = %path_label, rows = rows.len(), "flat table exported");
    Ok(rows.len())
}
