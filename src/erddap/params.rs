//! Station parameter files
//!
//! A parameter file names the ERDDAP dataset, how many days to request, and
//! the variables to pull from it:
//!
//! ```json
//! {
//!   "erddap-id": "morro-bay-bs1",
//!   "station-name": "Morro Bay BS1",
//!   "data-provider": "Cal Poly",
//!   "past_days": 14,
//!   "data_variables": [
//!     {"var-id": "sea_water_temperature", "short_name": "Temperature", "units": "C", "running_mean": true}
//!   ]
//! }
//! ```

use super::error::{ErddapError, ErddapResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default CeNCOOS tabledap endpoint
pub const DEFAULT_BASE_URL: &str = "http://erddap.cencoos.org/erddap/tabledap/";

/// Parameters for one station
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationParams {
    #[serde(rename = "erddap-id")]
    pub erddap_id: String,
    #[serde(rename = "station-name", default)]
    pub station_name: String,
    #[serde(rename = "data-provider", default)]
    pub data_provider: String,
    #[serde(default = "default_past_days")]
    pub past_days: u32,
    pub data_variables: Vec<DataVariable>,
    #[serde(default)]
    pub comments: Option<String>,
}

fn default_past_days() -> u32 {
    7
}

/// One variable to request from the dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataVariable {
    /// ERDDAP variable name
    #[serde(rename = "var-id")]
    pub var_id: String,
    /// Display name, used as the document key
    pub short_name: String,
    #[serde(default)]
    pub units: String,
    /// Present when the variable should carry a smoothed series
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub running_mean: Option<serde_json::Value>,
}

impl DataVariable {
    pub fn wants_rolling(&self) -> bool {
        !matches!(self.running_mean, None | Some(serde_json::Value::Bool(false)))
    }
}

impl StationParams {
    /// Load parameters from a JSON file
    pub fn load(path: &Path) -> ErddapResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ErddapError::Params {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ErddapError::Params {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Tabledap `.csvp` request for every variable over the last `past_days`
    pub fn build_url(&self, base_url: &str) -> String {
        let mut url = String::from(base_url);
        if !url.ends_with('/') {
            url.push('/');
        }

        url.push_str(&urlencoding::encode(&self.erddap_id));
        url.push_str(".csvp?time");
        for var in &self.data_variables {
            url.push_str("%2C");
            url.push_str(&urlencoding::encode(&var.var_id));
        }
        url.push_str(&format!("&time>now-{}days", self.past_days));
        url
    }

    /// Display names in request order
    pub fn short_names(&self) -> Vec<String> {
        self.data_variables
            .iter()
            .map(|v| v.short_name.clone())
            .collect()
    }

    /// Units in request order
    pub fn units(&self) -> Vec<String> {
        self.data_variables.iter().map(|v| v.units.clone()).collect()
    }

    /// Variables that should carry a smoothed series
    pub fn rolling(&self) -> Vec<&str> {
        self.data_variables
            .iter()
            .filter(|v| v.wants_rolling())
            .map(|v| v.short_name.as_str())
            .collect()
    }
}
