use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WindowError>;

#[derive(Error, Debug)]
pub enum WindowError {
    /// Lag count below zero or horizon below one.
    #[error("Invalid window configuration: {0}")]
    ConfigurationError(String),

    /// The table is too short for a single anchor row to survive.
    #[error("Not enough rows: {rows} rows cannot cover {lags} lags and a horizon of {horizon}")]
    EmptyInputError {
        rows: usize,
        lags: usize,
        horizon: usize,
    },

    #[error("Missing column '{0}'")]
    MissingColumnError(String),

    #[error("Column '{0}' is not numeric")]
    NonNumericColumnError(String),

    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}
