//! Client for the EPA Air Quality System (AQS) `sampleData` API.
//!
//! [`AqsClient::fetch_measurements`] pulls raw sample rows for a county or a
//! monitoring site; [`samples_to_frame`] pivots them into one row per
//! timestamp and one column per parameter, ready for `lagframe`.

pub mod client;
mod error;
pub mod frame;
pub mod models;
pub mod request;

pub use client::AqsClient;
pub use error::{AqsError, Result};
pub use frame::samples_to_frame;
pub use models::Sample;
pub use request::{Credentials, Location, MeasurementRequest};
