//! ERDDAP CSV ingest
//!
//! Parses `.csvp` responses (one header row, ISO-8601 `time` first, then one
//! column per requested variable) into columnar observations, averages them
//! into hourly bins, and lays them on a fixed grid ending at the current hour.

use super::error::{ErddapError, ErddapResult};
use crate::series::Sample;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

const HOUR_SECS: i64 = 3600;

/// One named column of samples
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub samples: Vec<Sample>,
}

/// Columnar observations sharing one timestamp axis (Unix seconds)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observations {
    pub timestamps: Vec<i64>,
    pub columns: Vec<Column>,
}

impl Observations {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Samples of a named column
    pub fn column(&self, name: &str) -> Option<&[Sample]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.samples.as_slice())
    }
}

fn parse_sample(field: &str, row: usize) -> ErddapResult<Sample> {
    let field = field.trim();
    if field.is_empty() || field.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    let value: f64 = field
        .parse()
        .map_err(|_| ErddapError::Parse(format!("row {}: invalid number {:?}", row, field)))?;

    Ok(value.is_finite().then_some(value))
}

/// Parse a `.csvp` body; `names` label the columns after `time`
pub fn parse_csv(text: &str, names: &[String]) -> ErddapResult<Observations> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let mut timestamps = Vec::new();
    let mut columns: Vec<Column> = names
        .iter()
        .map(|name| Column {
            name: name.clone(),
            samples: Vec::new(),
        })
        .collect();

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        if record.len() != names.len() + 1 {
            return Err(ErddapError::Parse(format!(
                "row {}: expected {} fields, found {}",
                row,
                names.len() + 1,
                record.len()
            )));
        }

        let time = &record[0];
        let timestamp = DateTime::parse_from_rfc3339(time.trim())
            .map_err(|e| ErddapError::Parse(format!("row {}: invalid time {:?}: {}", row, time, e)))?
            .with_timezone(&Utc)
            .timestamp();
        timestamps.push(timestamp);

        for (column, field) in columns.iter_mut().zip(record.iter().skip(1)) {
            column.samples.push(parse_sample(field, row)?);
        }
    }

    tracing::debug!(rows = timestamps.len(), columns = names.len(), "Parsed ERDDAP CSV");
    Ok(Observations {
        timestamps,
        columns,
    })
}

/// Average observations into contiguous hourly bins
///
/// Bins are labeled by their start. Hours with no valid sample in a column
/// are `None`; the grid runs from the first to the last observed hour.
pub fn resample_hourly(obs: &Observations) -> Observations {
    if obs.is_empty() {
        return Observations {
            timestamps: Vec::new(),
            columns: obs
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    samples: Vec::new(),
                })
                .collect(),
        };
    }

    // bucket start -> per-column (sum, count)
    let mut buckets: BTreeMap<i64, Vec<(f64, usize)>> = BTreeMap::new();
    for (row, ts) in obs.timestamps.iter().enumerate() {
        let bucket = ts.div_euclid(HOUR_SECS) * HOUR_SECS;
        let sums = buckets
            .entry(bucket)
            .or_insert_with(|| vec![(0.0, 0); obs.columns.len()]);

        for (slot, column) in sums.iter_mut().zip(&obs.columns) {
            if let Some(v) = column.samples.get(row).copied().flatten() {
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    let first = *buckets.keys().next().unwrap_or(&0);
    let last = *buckets.keys().next_back().unwrap_or(&0);
    let timestamps: Vec<i64> = (first..=last).step_by(HOUR_SECS as usize).collect();

    let columns = obs
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| Column {
            name: column.name.clone(),
            samples: timestamps
                .iter()
                .map(|ts| {
                    buckets
                        .get(ts)
                        .map(|sums| sums[idx])
                        .filter(|(_, count)| *count > 0)
                        .map(|(sum, count)| sum / count as f64)
                })
                .collect(),
        })
        .collect();

    Observations {
        timestamps,
        columns,
    }
}

/// Reindex hourly observations onto `days` of hours ending at `now`
///
/// `now` is rounded to the nearest hour; the grid has `days * 24 + 1` points.
/// Hours without data, including hours after the last observation, are
/// `None`.
pub fn fill_to_present(hourly: &Observations, now: DateTime<Utc>, days: i64) -> Observations {
    let end = (now.timestamp() + HOUR_SECS / 2).div_euclid(HOUR_SECS) * HOUR_SECS;
    let start = end - days * 24 * HOUR_SECS;
    let timestamps: Vec<i64> = (start..=end).step_by(HOUR_SECS as usize).collect();

    let position: HashMap<i64, usize> = hourly
        .timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| (*ts, i))
        .collect();

    let columns = hourly
        .columns
        .iter()
        .map(|column| Column {
            name: column.name.clone(),
            samples: timestamps
                .iter()
                .map(|ts| {
                    position
                        .get(ts)
                        .and_then(|i| column.samples.get(*i).copied().flatten())
                })
                .collect(),
        })
        .collect();

    Observations {
        timestamps,
        columns,
    }
}
