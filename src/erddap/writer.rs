//! Dashboard document writer
//!
//! Assembles the dashboard document from resampled station data and writes
//! it as `{erddap-id}.json`.

use super::error::{ErddapError, ErddapResult};
use super::ingest::Observations;
use super::params::StationParams;
use crate::dashboard::TrackedVariable;
use crate::document::{StationDocument, VariableData};
use crate::series::{rolling_mean, round_to, trend_slope, Sample, WindowKind};
use std::path::{Path, PathBuf};

/// Width of the centered smoothing window, in hours
pub const ROLLING_WINDOW: usize = 6;

fn round_samples(samples: &[Sample], decimals: u32) -> Vec<Sample> {
    samples
        .iter()
        .map(|s| s.map(|v| round_to(v, decimals)))
        .collect()
}

/// Build the dashboard document for a station
///
/// `hourly` is the resampled feed the slopes are fit on; `filled` is the
/// same data on the fixed grid that is published. Arrow scales come from the
/// tracked variable of the same name.
pub fn build_document(
    params: &StationParams,
    hourly: &Observations,
    filled: &Observations,
    tracked: &[TrackedVariable],
) -> ErddapResult<StationDocument> {
    let mut doc = StationDocument::new(
        Some(params.station_name.clone()).filter(|n| !n.is_empty()),
        filled.timestamps.clone(),
    );

    for var in &params.data_variables {
        let name = &var.short_name;
        let values = filled.column(name).unwrap_or_default();

        let slope = hourly
            .column(name)
            .and_then(trend_slope)
            .map(|s| round_to(s, 3));

        let slope_scale = tracked
            .iter()
            .find(|t| &t.name == name)
            .and_then(|t| t.slope_scale);

        let rolling = if var.wants_rolling() {
            let smoothed = rolling_mean(
                values,
                ROLLING_WINDOW,
                WindowKind::Hamming,
                true,
                ROLLING_WINDOW,
            );
            round_samples(&smoothed, 2)
        } else {
            Vec::new()
        };

        tracing::debug!(variable = %name, ?slope, ?slope_scale, "Assembled variable");

        let data = VariableData {
            values: round_samples(values, 2),
            units: var.units.clone(),
            slope,
            slope_scale,
            rolling,
        };
        doc.insert_variable(name.clone(), &data)?;
    }

    Ok(doc)
}

/// Write `{erddap_id}.json` into `out_dir`, returning the file path
pub fn write_document(
    doc: &StationDocument,
    out_dir: &Path,
    erddap_id: &str,
) -> ErddapResult<PathBuf> {
    std::fs::create_dir_all(out_dir).map_err(|e| ErddapError::Io {
        path: out_dir.to_path_buf(),
        error: e.to_string(),
    })?;

    let path = out_dir.join(format!("{}.json", erddap_id));
    let json = doc.to_json_pretty()?;

    std::fs::write(&path, json).map_err(|e| ErddapError::Io {
        path: path.clone(),
        error: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), "Wrote dashboard document");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erddap::ingest::Column;
    use crate::erddap::params::DataVariable;
    use tempfile::tempdir;

    fn params() -> StationParams {
        StationParams {
            erddap_id: "morro-bay-bs1".to_string(),
            station_name: "Morro Bay BS1".to_string(),
            data_provider: "Cal Poly".to_string(),
            past_days: 14,
            data_variables: vec![
                DataVariable {
                    var_id: "sea_water_temperature".to_string(),
                    short_name: "Temperature".to_string(),
                    units: "C".to_string(),
                    running_mean: Some(serde_json::Value::Bool(true)),
                },
                DataVariable {
                    var_id: "sea_water_turbidity".to_string(),
                    short_name: "Turbidity".to_string(),
                    units: "NTU".to_string(),
                    running_mean: None,
                },
            ],
            comments: None,
        }
    }

    fn observations(len: usize) -> Observations {
        Observations {
            timestamps: (0..len as i64).map(|i| i * 3600).collect(),
            columns: vec![
                Column {
                    name: "Temperature".to_string(),
                    samples: (0..len).map(|i| Some(12.0 + 0.01 * i as f64)).collect(),
                },
                Column {
                    name: "Turbidity".to_string(),
                    samples: (0..len).map(|i| (i % 2 == 0).then_some(1.234)).collect(),
                },
            ],
        }
    }

    #[test]
    fn test_build_document() {
        let obs = observations(200);
        let doc = build_document(&params(), &obs, &obs, &TrackedVariable::defaults()).unwrap();

        assert_eq!(doc.name.as_deref(), Some("Morro Bay BS1"));
        assert_eq!(doc.datetime.len(), 200);

        let temp = doc.variable("Temperature").unwrap();
        assert_eq!(temp.units, "C");
        assert_eq!(temp.slope_scale, Some(10.0));
        // 0.01 per hour is 3.36 per 14 days
        let slope = temp.slope.unwrap();
        assert!((slope - 3.36).abs() < 0.05, "slope: {}", slope);
        assert_eq!(temp.rolling.len(), 200);
        assert_eq!(temp.rolling[0], None);
        assert!(temp.rolling[100].is_some());

        let turbidity = doc.variable("Turbidity").unwrap();
        assert_eq!(turbidity.values[0], Some(1.23));
        assert_eq!(turbidity.values[1], None);
        assert_eq!(turbidity.slope_scale, None);
        assert!(turbidity.rolling.is_empty());
    }

    #[test]
    fn test_short_feed_has_no_slope() {
        let obs = observations(5);
        let doc = build_document(&params(), &obs, &obs, &[]).unwrap();
        assert_eq!(doc.variable("Temperature").unwrap().slope, None);
    }

    #[test]
    fn test_write_document() {
        let dir = tempdir().unwrap();
        let obs = observations(30);
        let doc = build_document(&params(), &obs, &obs, &TrackedVariable::defaults()).unwrap();

        let path = write_document(&doc, &dir.path().join("out"), "morro-bay-bs1").unwrap();
        assert!(path.ends_with("morro-bay-bs1.json"));

        let text = std::fs::read_to_string(&path).unwrap();
        let restored = StationDocument::from_json(&text).unwrap();
        assert_eq!(restored, doc);
    }
}
