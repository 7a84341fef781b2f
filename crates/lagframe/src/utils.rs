use polars::prelude::*;

use crate::{Result, WindowError};

/// Reads a column as `f64`, casting integer and decimal-string columns.
/// Nulls are kept as `None`.
pub(crate) fn extract_f64_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(|_| WindowError::MissingColumnError(name.to_string()))?;

    let values = column
        .strict_cast(&DataType::Float64)
        .map_err(|_| WindowError::NonNumericColumnError(name.to_string()))?
        .f64()?
        .to_vec();

    Ok(values)
}
