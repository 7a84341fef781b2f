use serde::{Deserialize, Serialize};

/// One row of an AQS `sampleData` reply.
///
/// Only the fields used downstream are kept; the API sends more.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sample {
    pub state_code: String,
    pub county_code: String,
    pub site_number: String,
    pub parameter_code: String,
    #[serde(default)]
    pub poc: Option<i64>,
    /// Human readable parameter name, e.g. "Ozone".
    pub parameter: String,
    /// `YYYY-MM-DD`
    pub date_local: String,
    /// `HH:MM`
    pub time_local: String,
    #[serde(default)]
    pub date_gmt: Option<String>,
    #[serde(default)]
    pub time_gmt: Option<String>,
    /// Null when the monitor reported no value for the hour.
    #[serde(default)]
    pub sample_measurement: Option<f64>,
    #[serde(default)]
    pub units_of_measure: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub(crate) struct Header {
    pub status: String,
    #[serde(default)]
    pub rows: Option<u64>,
    #[serde(default)]
    pub error: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct Reply {
    #[serde(rename = "Header")]
    pub header: Vec<Header>,
    #[serde(rename = "Data", default)]
    pub data: Vec<Sample>,
}
