//! Personal dataset reader
//!
//! Loads `personal.csv` (columns `full_name`, `birthyear`, `deathyear`,
//! `birthplace`) produced by the join stage. Year columns come out of a
//! dataframe export, so a column with gaps is written as floats (`1850.0`).

use serde::{de, Deserialize, Deserializer};
use std::path::Path;
use tracing::{debug, warn};
use wim_common::{Error, Result};

/// File name of the personal dataset inside the data folder
pub const PERSONAL_CSV: &str = "personal.csv";

/// One row of the personal dataset
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PersonRecord {
    /// Full name, used as the join key for text files
    pub full_name: String,
    #[serde(rename = "birthyear", default, deserialize_with = "deserialize_year")]
    pub birth_year: Option<i32>,
    #[serde(rename = "deathyear", default, deserialize_with = "deserialize_year")]
    pub death_year: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub birthplace: Option<String>,
}

/// Records loaded from the CSV plus the count of rejected rows
#[derive(Debug, Clone, Default)]
pub struct PersonLoad {
    pub records: Vec<PersonRecord>,
    pub skipped: usize,
}

/// Read all person records from a CSV file, in file order
///
/// Rows that fail to parse, or have an empty `full_name`, are skipped with a
/// warning. A missing file is [`Error::NotFound`].
pub fn read_persons(path: &Path) -> Result<PersonLoad> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut load = PersonLoad::default();

    for (idx, row) in reader.deserialize::<PersonRecord>().enumerate() {
        // Header is line 1
        let line = idx + 2;
        match row {
            Ok(record) if record.full_name.trim().is_empty() => {
                warn!(line, "Skipping row with empty full_name");
                load.skipped += 1;
            }
            Ok(record) => load.records.push(record),
            Err(e) => {
                warn!(line, error = %e, "Skipping unreadable row");
                load.skipped += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        records = load.records.len(),
        skipped = load.skipped,
        "Loaded personal dataset"
    );

    Ok(load)
}

/// Parse a year cell: `1850`, `1850.0`, or blank/`nan` for missing
fn parse_year(raw: &str) -> Option<Option<i32>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Some(None);
    }
    if let Ok(year) = raw.parse::<i32>() {
        return Some(Some(year));
    }
    match raw.parse::<f64>() {
        Ok(year) if year.is_finite() && year.abs() < i32::MAX as f64 => Some(Some(year.trunc() as i32)),
        _ => None,
    }
}

fn deserialize_year<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_year(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid year '{}'", raw))),
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
