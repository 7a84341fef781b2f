use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;
use polars::prelude::*;

use crate::models::Sample;
use crate::{AqsError, Result};

pub const TIMESTAMP_COLUMN: &str = "timestamp";

/// Pivots raw samples into an observation table.
///
/// Rows are the distinct local sample times in ascending order. The first
/// column is an `i64` timestamp in seconds since the epoch, reading the
/// local date and time as if they were UTC. One `f64` column per parameter
/// name follows in first-seen order. A parameter that did not report at a
/// time that another parameter did is null there. When several instruments
/// report the same parameter for the same time, the first sample wins.
///
/// Hours for which no parameter reported at all produce no row. Gaps are
/// not filled, so on a gappy series `(t-1)` in a lag window is the previous
/// reported hour, not necessarily the previous clock hour. Compare
/// consecutive timestamps to detect this.
pub fn samples_to_frame(samples: &[Sample]) -> Result<DataFrame> {
    let mut parameters: Vec<String> = Vec::new();
    let mut parameter_idx: HashMap<&str, usize> = HashMap::new();
    let mut rows: BTreeMap<NaiveDateTime, HashMap<usize, Option<f64>>> = BTreeMap::new();
    let mut duplicates = 0usize;

    for sample in samples {
        let sampled_at = sample_time(sample)?;
        let idx = *parameter_idx
            .entry(sample.parameter.as_str())
            .or_insert_with(|| {
                parameters.push(sample.parameter.clone());
                parameters.len() - 1
            });

        let row = rows.entry(sampled_at).or_default();
        if row.contains_key(&idx) {
            duplicates += 1;
            continue;
        }
        row.insert(idx, sample.sample_measurement);
    }

    if duplicates > 0 {
        log::warn!(
            "Dropped {} duplicate samples (same parameter and hour)",
            duplicates
        );
    }

    let timestamps: Vec<i64> = rows
        .keys()
        .map(|sampled_at| sampled_at.and_utc().timestamp())
        .collect();

    let mut columns = vec![Series::new(TIMESTAMP_COLUMN.into(), timestamps).into_column()];
    for (idx, name) in parameters.iter().enumerate() {
        let values: Vec<Option<f64>> = rows
            .values()
            .map(|row| row.get(&idx).copied().flatten())
            .collect();
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }

    log::debug!(
        "Pivoted {} samples into {} rows x {} parameters",
        samples.len(),
        rows.len(),
        parameters.len()
    );

    Ok(DataFrame::new(columns)?)
}

fn sample_time(sample: &Sample) -> Result<NaiveDateTime> {
    let local = format!("{} {}", sample.date_local, sample.time_local);
    NaiveDateTime::parse_from_str(&local, "%Y-%m-%d %H:%M").map_err(|e| {
        AqsError::TimestampError(format!(
            "{} sample at '{}': {}",
            sample.parameter, local, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(parameter: &str, date: &str, time: &str, value: Option<f64>) -> Sample {
        Sample {
            state_code: "37".to_string(),
            county_code: "183".to_string(),
            site_number: "0014".to_string(),
            parameter_code: if parameter == "Ozone" { "44201" } else { "62101" }.to_string(),
            poc: Some(1),
            parameter: parameter.to_string(),
            date_local: date.to_string(),
            time_local: time.to_string(),
            date_gmt: None,
            time_gmt: None,
            sample_measurement: value,
            units_of_measure: None,
            method: None,
        }
    }

    fn f64s(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
        df.column(name).unwrap().f64().unwrap().to_vec()
    }

    #[test]
    fn pivots_by_hour_and_parameter() {
        let samples = vec![
            sample("Ozone", "2020-05-01", "01:00", Some(0.030)),
            sample("Ozone", "2020-05-01", "00:00", Some(0.031)),
            sample("Outdoor Temperature", "2020-05-01", "00:00", Some(61.0)),
            sample("Outdoor Temperature", "2020-05-01", "02:00", Some(59.0)),
        ];
        let df = samples_to_frame(&samples).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["timestamp", "Ozone", "Outdoor Temperature"]);

        // 2020-05-01T00:00:00Z
        let midnight = 1_588_291_200i64;
        assert_eq!(
            df.column(TIMESTAMP_COLUMN).unwrap().i64().unwrap().to_vec(),
            vec![Some(midnight), Some(midnight + 3600), Some(midnight + 7200)]
        );

        assert_eq!(f64s(&df, "Ozone"), vec![Some(0.031), Some(0.030), None]);
        assert_eq!(
            f64s(&df, "Outdoor Temperature"),
            vec![Some(61.0), None, Some(59.0)]
        );
    }

    #[test]
    fn first_sample_wins_on_duplicates() {
        let samples = vec![
            sample("Ozone", "2020-05-01", "00:00", Some(0.031)),
            sample("Ozone", "2020-05-01", "00:00", Some(0.045)),
        ];
        let df = samples_to_frame(&samples).unwrap();

        assert_eq!(df.height(), 1);
        assert_eq!(f64s(&df, "Ozone"), vec![Some(0.031)]);
    }

    #[test]
    fn missing_measurement_stays_null() {
        let samples = vec![sample("Ozone", "2020-05-01", "00:00", None)];
        let df = samples_to_frame(&samples).unwrap();
        assert_eq!(f64s(&df, "Ozone"), vec![None]);
    }

    #[test]
    fn rows_sort_by_time_across_days() {
        let samples = vec![
            sample("Ozone", "2020-05-02", "00:00", Some(0.020)),
            sample("Ozone", "2020-05-01", "23:00", Some(0.025)),
        ];
        let df = samples_to_frame(&samples).unwrap();

        assert_eq!(f64s(&df, "Ozone"), vec![Some(0.025), Some(0.020)]);
        let timestamps = df.column(TIMESTAMP_COLUMN).unwrap().i64().unwrap().to_vec();
        assert_eq!(timestamps[1].unwrap() - timestamps[0].unwrap(), 3600);
    }

    #[test]
    fn unreported_hours_are_not_filled() {
        let samples = vec![
            sample("Ozone", "2020-05-01", "00:00", Some(0.031)),
            sample("Ozone", "2020-05-01", "03:00", Some(0.028)),
        ];
        let df = samples_to_frame(&samples).unwrap();

        assert_eq!(df.height(), 2);
        let timestamps = df.column(TIMESTAMP_COLUMN).unwrap().i64().unwrap().to_vec();
        assert_eq!(timestamps[1].unwrap() - timestamps[0].unwrap(), 3 * 3600);
    }

    #[test]
    fn malformed_time_is_rejected() {
        let samples = vec![sample("Ozone", "2020-05-01", "noon", Some(0.031))];
        assert!(matches!(
            samples_to_frame(&samples),
            Err(AqsError::TimestampError(_))
        ));
    }

    #[test]
    fn no_samples_gives_timestamp_only() {
        let df = samples_to_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 1);
    }

    #[test]
    fn feeds_the_lag_window() {
        let samples: Vec<Sample> = (0..6)
            .map(|h| {
                sample(
                    "Ozone",
                    "2020-05-01",
                    &format!("{:02}:00", h),
                    Some(0.01 * h as f64),
                )
            })
            .collect();
        let table = samples_to_frame(&samples)
            .unwrap()
            .drop(TIMESTAMP_COLUMN)
            .unwrap();

        let lagged = lagframe::build_lag_window(&table, "Ozone", 2, 2).unwrap();
        assert_eq!(lagged.height(), 3);
        assert_eq!(
            f64s(&lagged, "Ozone (t-2)"),
            vec![Some(0.0), Some(0.01), Some(0.02)]
        );
    }
}
