//! Lagged-feature tables for time-series regression.
//!
//! The entry point is [`build_lag_window`], which takes an ordered
//! observation table (one row per time step) and lines up past values of
//! every variable with present and future values of a target column.

mod error;
pub mod transform;
mod utils;
pub mod window;

pub use error::{Result, WindowError};
pub use transform::{
    inverse_log_transform, inverse_log_transform_column, log_transform, log_transform_column,
};
pub use window::{build_lag_window, LagWindow, WindowShape};
