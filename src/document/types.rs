//! Dashboard document types
//!
//! Wire format:
//!
//! ```json
//! {
//!   "name": "Morro Bay BS1",
//!   "datetime": [100, 200, 300],
//!   "Temperature": {
//!     "values": [20.1, null, 20.5],
//!     "units": "C",
//!     "slope": 0.42,
//!     "slope_scale": 10
//!   }
//! }
//! ```
//!
//! Missing samples are written as JSON `null`. Older documents used the
//! string `"null"`, which is still accepted on input.

use super::error::{DocumentError, DocumentResult};
use crate::series::{Sample, TimeSeries};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A complete dashboard document for one station
///
/// Variable entries are kept as raw JSON and decoded on access, so a
/// malformed or unrelated top-level entry only fails its own lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationDocument {
    /// Station display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unix timestamps in seconds, shared by every variable
    pub datetime: Vec<i64>,
    /// Remaining top-level entries keyed by name
    #[serde(flatten)]
    entries: BTreeMap<String, Value>,
}

/// Samples and metadata for one measured variable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VariableData {
    #[serde(deserialize_with = "deserialize_samples")]
    pub values: Vec<Sample>,
    #[serde(default)]
    pub units: String,
    /// Expected change over 14 days
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub slope: Option<f64>,
    /// Full range of the arrow scale, in units
    #[serde(default, deserialize_with = "deserialize_optional_number")]
    pub slope_scale: Option<f64>,
    /// Smoothed copy of `values`, when the station asks for one
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "deserialize_samples"
    )]
    pub rolling: Vec<Sample>,
}

/// Slope paired with the scale it is drawn against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub slope: f64,
    pub scale: f64,
}

impl VariableData {
    /// Trend for the arrow, when both slope and a positive scale are present
    pub fn trend(&self) -> Option<Trend> {
        let slope = self.slope.filter(|s| s.is_finite())?;
        let scale = self.slope_scale.filter(|s| s.is_finite() && *s > 0.0)?;
        Some(Trend { slope, scale })
    }
}

impl StationDocument {
    /// Empty document over a timestamp axis
    pub fn new(name: Option<String>, datetime: Vec<i64>) -> Self {
        Self {
            name,
            datetime,
            entries: BTreeMap::new(),
        }
    }

    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> DocumentResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Add or replace a variable
    pub fn insert_variable(
        &mut self,
        name: impl Into<String>,
        data: &VariableData,
    ) -> DocumentResult<()> {
        self.entries.insert(name.into(), serde_json::to_value(data)?);
        Ok(())
    }

    /// Decode a variable by name
    pub fn variable(&self, name: &str) -> DocumentResult<VariableData> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| DocumentError::VariableNotFound(name.to_string()))?;

        VariableData::deserialize(entry).map_err(|e| DocumentError::InvalidVariable {
            name: name.to_string(),
            error: e.to_string(),
        })
    }

    /// Build the validated time series for a variable
    pub fn series(&self, name: &str) -> DocumentResult<TimeSeries> {
        let data = self.variable(name)?;
        self.series_for(name, &data)
    }

    /// Validated time series of already decoded variable data
    pub fn series_for(&self, name: &str, data: &VariableData) -> DocumentResult<TimeSeries> {
        Ok(TimeSeries::new(
            name,
            data.units.clone(),
            self.datetime.clone(),
            data.values.clone(),
        )?)
    }

    /// Names of the object-valued top-level entries
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, value)| value.is_object())
            .map(|(name, _)| name.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn is_missing_marker(text: &str) -> bool {
    matches!(text.trim(), "" | "null" | "NaN" | "nan")
}

fn raw_to_sample(raw: Option<RawNumber>) -> Result<Sample, String> {
    match raw {
        None => Ok(None),
        Some(RawNumber::Number(v)) if v.is_finite() => Ok(Some(v)),
        Some(RawNumber::Number(_)) => Ok(None),
        Some(RawNumber::Text(t)) if is_missing_marker(&t) => Ok(None),
        Some(RawNumber::Text(t)) => Err(format!("expected a number or null, found {:?}", t)),
    }
}

fn deserialize_samples<'de, D>(deserializer: D) -> Result<Vec<Sample>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<Option<RawNumber>> = Vec::deserialize(deserializer)?;
    raw.into_iter()
        .enumerate()
        .map(|(i, r)| raw_to_sample(r).map_err(|e| D::Error::custom(format!("sample {}: {}", i, e))))
        .collect()
}

fn deserialize_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<RawNumber> = Option::deserialize(deserializer)?;
    raw_to_sample(raw).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"{
        "name": "Morro Bay BS1",
        "datetime": [100, 200, 300],
        "Temperature": {
            "values": [20.1, "null", 20.5],
            "units": "C",
            "slope": 1.25,
            "slope_scale": 10
        },
        "pH": {
            "values": [null, null, null],
            "units": "total scale",
            "slope": null,
            "slope_scale": "null"
        }
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = StationDocument::from_json(EXAMPLE).unwrap();

        assert_eq!(doc.name.as_deref(), Some("Morro Bay BS1"));
        assert_eq!(doc.datetime, vec![100, 200, 300]);
        assert_eq!(doc.variable_names().collect::<Vec<_>>(), vec!["Temperature", "pH"]);

        let temp = doc.variable("Temperature").unwrap();
        assert_eq!(temp.values, vec![Some(20.1), None, Some(20.5)]);
        assert_eq!(temp.units, "C");
        assert_eq!(temp.trend(), Some(Trend { slope: 1.25, scale: 10.0 }));

        let ph = doc.variable("pH").unwrap();
        assert_eq!(ph.values, vec![None, None, None]);
        assert_eq!(ph.slope, None);
        assert_eq!(ph.slope_scale, None);
        assert_eq!(ph.trend(), None);
    }

    #[test]
    fn test_series_from_document() {
        let doc = StationDocument::from_json(EXAMPLE).unwrap();
        let series = doc.series("Temperature").unwrap();

        assert_eq!(series.mean(), Some(20.3));
        let latest = series.latest().unwrap();
        assert_eq!((latest.value, latest.timestamp), (20.5, 300));
    }

    #[test]
    fn test_missing_variable() {
        let doc = StationDocument::from_json(EXAMPLE).unwrap();
        assert!(matches!(
            doc.series("Salinity"),
            Err(DocumentError::VariableNotFound(_))
        ));
    }

    #[test]
    fn test_length_mismatch_is_per_variable() {
        let doc = StationDocument::from_json(
            r#"{"datetime": [1, 2], "A": {"values": [1.0]}, "B": {"values": [1.0, 2.0]}}"#,
        )
        .unwrap();

        assert!(matches!(doc.series("A"), Err(DocumentError::Series(_))));
        assert!(doc.series("B").is_ok());
    }

    #[test]
    fn test_bad_entry_fails_only_its_lookup() {
        let doc = StationDocument::from_json(
            r#"{
                "datetime": [100, 200, 300],
                "comments": "sensor swapped 5/1",
                "Temperature": {"values": [20.1, null, 20.5], "units": "C"},
                "Salinity": {"values": [33.1, "offline", 33.2], "units": "PSU"}
            }"#,
        )
        .unwrap();

        assert_eq!(doc.series("Temperature").unwrap().mean(), Some(20.3));
        assert!(matches!(
            doc.variable("Salinity"),
            Err(DocumentError::InvalidVariable { ref name, .. }) if name == "Salinity"
        ));
        assert!(matches!(
            doc.variable("comments"),
            Err(DocumentError::InvalidVariable { .. })
        ));
        assert_eq!(
            doc.variable_names().collect::<Vec<_>>(),
            vec!["Salinity", "Temperature"]
        );
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let result = StationDocument::from_json(r#"{"datetime": "yesterday"}"#);
        assert!(matches!(result, Err(DocumentError::Parse(_))));
    }

    #[test]
    fn test_slope_without_scale_has_no_trend() {
        let data = VariableData {
            values: vec![Some(1.0)],
            slope: Some(0.5),
            ..Default::default()
        };
        assert_eq!(data.trend(), None);
    }

    #[test]
    fn test_inserted_variable_writes_null() {
        let mut doc = StationDocument::new(Some("Morro Bay BS1".to_string()), vec![100, 200]);
        let data = VariableData {
            values: vec![Some(8.0), None],
            units: "total scale".to_string(),
            ..Default::default()
        };
        doc.insert_variable("pH", &data).unwrap();

        let json = doc.to_json_pretty().unwrap();
        assert!(!json.contains("\"null\""));

        let restored = StationDocument::from_json(&json).unwrap();
        assert_eq!(restored, doc);
        assert_eq!(restored.variable("pH").unwrap(), data);
    }
}
