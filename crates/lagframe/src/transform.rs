//! `log10(y + 1)` scaling for skewed, non-negative measurements such as
//! pollutant concentrations, and its inverse for mapping predictions back.

use num_traits::AsPrimitive;
use polars::prelude::*;

use crate::utils::extract_f64_column;
use crate::Result;

/// `log10(y + 1)` for every value.
///
/// Accepts anything iterable over primitive numbers (`f32`, `i64`, `u64`,
/// ...), converted with `as f64`; pass `slice.iter().copied()` for borrowed
/// data.
pub fn log_transform<I>(values: I) -> Vec<f64>
where
    I: IntoIterator,
    I::Item: AsPrimitive<f64>,
{
    values.into_iter().map(|y| log1p10(y.as_())).collect()
}

/// `10^y - 1` for every value. Undoes [`log_transform`].
pub fn inverse_log_transform<I>(values: I) -> Vec<f64>
where
    I: IntoIterator,
    I::Item: AsPrimitive<f64>,
{
    values.into_iter().map(|y| exp10m1(y.as_())).collect()
}

/// Replaces column `name` of `df` with its [`log_transform`]. Nulls stay null.
pub fn log_transform_column(df: &mut DataFrame, name: &str) -> Result<()> {
    map_column(df, name, log1p10)
}

/// Replaces column `name` of `df` with its [`inverse_log_transform`].
pub fn inverse_log_transform_column(df: &mut DataFrame, name: &str) -> Result<()> {
    map_column(df, name, exp10m1)
}

fn log1p10(y: f64) -> f64 {
    (y + 1.0).log10()
}

fn exp10m1(y: f64) -> f64 {
    10f64.powf(y) - 1.0
}

fn map_column(df: &mut DataFrame, name: &str, f: fn(f64) -> f64) -> Result<()> {
    let mapped: Vec<Option<f64>> = extract_f64_column(df, name)?
        .into_iter()
        .map(|v| v.map(f))
        .collect();

    df.with_column(Series::new(name.into(), mapped))?;
    Ok(())
}
