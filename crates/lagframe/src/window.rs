use polars::prelude::*;

use crate::utils::extract_f64_column;
use crate::{Result, WindowError};

/// Validated lag and horizon counts.
///
/// `lags` is how many past rows of every variable go into an output row,
/// `horizon` how many target values starting at the anchor row itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowShape {
    lags: usize,
    horizon: usize,
}

impl WindowShape {
    /// Counts arrive signed so that values read from user input can be
    /// rejected instead of wrapping.
    pub fn new(lags: i64, horizon: i64) -> Result<Self> {
        if lags < 0 {
            return Err(WindowError::ConfigurationError(format!(
                "lag count must be at least 0, got {}",
                lags
            )));
        }
        if horizon < 1 {
            return Err(WindowError::ConfigurationError(format!(
                "horizon count must be at least 1, got {}",
                horizon
            )));
        }

        // no table holds more than usize::MAX rows
        Ok(WindowShape {
            lags: usize::try_from(lags).unwrap_or(usize::MAX),
            horizon: usize::try_from(horizon).unwrap_or(usize::MAX),
        })
    }

    pub fn lags(&self) -> usize {
        self.lags
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Number of anchor rows that survive for an input of `rows` rows.
    pub fn output_rows(&self, rows: usize) -> usize {
        match self.lags.checked_add(self.horizon) {
            Some(window) => rows.saturating_add(1).saturating_sub(window),
            None => 0,
        }
    }

    /// Number of output columns for a table of `variables` columns, or
    /// `None` when it does not fit in `usize`.
    pub fn column_count(&self, variables: usize) -> Option<usize> {
        self.lags
            .checked_mul(variables)
            .and_then(|lagged| lagged.checked_add(self.horizon))
    }

    /// Output column names in output order: lag blocks from the oldest lag
    /// down, each in variable order, then the target horizon.
    ///
    /// Names are produced lazily, so a shape too large for any table can
    /// still be inspected with `take`.
    pub fn column_names<'a, S: AsRef<str>>(
        &self,
        variables: &'a [S],
        target: &'a str,
    ) -> impl Iterator<Item = String> + 'a {
        (1..=self.lags)
            .rev()
            .flat_map(move |k| variables.iter().map(move |v| lag_column_name(v.as_ref(), k)))
            .chain((0..self.horizon).map(move |k| horizon_column_name(target, k)))
    }
}

/// A target column plus a window shape, reusable across tables.
#[derive(Debug, Clone)]
pub struct LagWindow {
    target: String,
    shape: WindowShape,
}

impl LagWindow {
    pub fn new(target: &str, lags: i64, horizon: i64) -> Result<Self> {
        Ok(LagWindow {
            target: target.to_string(),
            shape: WindowShape::new(lags, horizon)?,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn shape(&self) -> WindowShape {
        self.shape
    }

    /// Builds the shifted table for `table`.
    ///
    /// Anchor `i` survives when `i - lags >= 0` and `i + horizon - 1` is
    /// still a row of `table`. Every other anchor is dropped rather than
    /// null-filled, so surviving anchors are `lags..=n - horizon` in input
    /// order.
    pub fn apply(&self, table: &DataFrame) -> Result<DataFrame> {
        let variables: Vec<String> = table
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        let Some(target_idx) = variables.iter().position(|v| v == &self.target) else {
            return Err(WindowError::MissingColumnError(self.target.clone()));
        };

        let n = table.height();
        let rows = self.shape.output_rows(n);
        if rows == 0 {
            return Err(WindowError::EmptyInputError {
                rows: n,
                lags: self.shape.lags,
                horizon: self.shape.horizon,
            });
        }

        let data = variables
            .iter()
            .map(|v| extract_f64_column(table, v))
            .collect::<Result<Vec<_>>>()?;

        let lags = self.shape.lags;
        let mut columns: Vec<Column> =
            Vec::with_capacity(self.shape.column_count(variables.len()).unwrap_or(0));

        // lag k of anchor i sits at row i - k, so the block starts at lags - k
        for k in (1..=lags).rev() {
            let start = lags - k;
            for (name, values) in variables.iter().zip(&data) {
                columns.push(window_column(lag_column_name(name, k), &values[start..start + rows]));
            }
        }

        let target = &data[target_idx];
        for k in 0..self.shape.horizon {
            let start = lags + k;
            columns.push(window_column(
                horizon_column_name(&self.target, k),
                &target[start..start + rows],
            ));
        }

        log::debug!(
            "lag window over '{}': {} rows in, {} rows out, {} anchors dropped, {} columns",
            self.target,
            n,
            rows,
            n - rows,
            columns.len()
        );

        Ok(DataFrame::new(columns)?)
    }
}

/// Aligns `lags` past rows of every column of `table` with `horizon` values
/// of `target`, starting at the anchor row.
///
/// ```
/// use polars::prelude::*;
///
/// let table = df!("x" => [10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
/// let shifted = lagframe::build_lag_window(&table, "x", 1, 1).unwrap();
///
/// assert_eq!(shifted.height(), 4);
/// assert_eq!(
///     shifted.column("x (t-1)").unwrap().f64().unwrap().to_vec(),
///     vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0)]
/// );
/// ```
pub fn build_lag_window(
    table: &DataFrame,
    target: &str,
    lags: i64,
    horizon: i64,
) -> Result<DataFrame> {
    LagWindow::new(target, lags, horizon)?.apply(table)
}

fn lag_column_name(variable: &str, k: usize) -> String {
    format!("{} (t-{})", variable, k)
}

fn horizon_column_name(target: &str, k: usize) -> String {
    if k == 0 {
        format!("{} (t)", target)
    } else {
        format!("{} (t+{})", target, k)
    }
}

fn window_column(name: String, values: &[Option<f64>]) -> Column {
    Series::new(name.into(), values.to_vec()).into_column()
}
