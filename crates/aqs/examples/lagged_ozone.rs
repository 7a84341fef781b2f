//! Fetches a quarter of hourly ozone and temperature readings for one site,
//! log-scales ozone and prints the lagged feature table.
//!
//! Needs `AQS_EMAIL` and `AQS_KEY` in the environment or a `.env` file.
//! RUST_LOG=debug shows the window bookkeeping.

use anyhow::{Context, Result};
use aqs::frame::TIMESTAMP_COLUMN;
use aqs::{samples_to_frame, AqsClient, Location, MeasurementRequest};
use chrono::NaiveDate;
use dotenv::dotenv;
use lagframe::{build_lag_window, log_transform_column};

const TARGET: &str = "Ozone";
const LAGS: i64 = 24;
const HORIZON: i64 = 6;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let client = AqsClient::from_env().context("AQS credentials are not configured")?;

    let begin = NaiveDate::from_ymd_opt(2020, 1, 1).context("bad begin date")?;
    let end = NaiveDate::from_ymd_opt(2020, 3, 31).context("bad end date")?;
    let request = MeasurementRequest::new(
        Location::site("37", "183", "0014"),
        &["44201", "62101"],
        begin,
        end,
    );

    let samples = client
        .fetch_measurements(&request)
        .await
        .context("Failed to fetch measurements")?;

    let mut table = samples_to_frame(&samples)?.drop(TIMESTAMP_COLUMN)?;
    log::info!("Observation table: {} rows x {} columns", table.height(), table.width());

    log_transform_column(&mut table, TARGET)?;
    let lagged = build_lag_window(&table, TARGET, LAGS, HORIZON)?;

    log::info!(
        "Lagged table: {} rows x {} columns",
        lagged.height(),
        lagged.width()
    );
    println!("{}", lagged.head(Some(10)));

    Ok(())
}
