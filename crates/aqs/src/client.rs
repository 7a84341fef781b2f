use reqwest::Url;

use crate::models::{Reply, Sample};
use crate::request::{Credentials, MeasurementRequest};
use crate::{AqsError, Result};

pub const DEFAULT_BASE_URL: &str = "https://aqs.epa.gov/data/api";

/// Header status the API uses for a well-formed query with no rows.
const NO_DATA_STATUS: &str = "No data matched your selection";

#[derive(Debug, Clone)]
pub struct AqsClient {
    base_url: String,
    credentials: Credentials,
    client: reqwest::Client,
}

impl AqsClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: Credentials, base_url: &str) -> Self {
        AqsClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
            client: reqwest::Client::new(),
        }
    }

    /// Credentials from `AQS_EMAIL` / `AQS_KEY`, endpoint from `AQS_BASE_URL`
    /// when set.
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env()?;
        Ok(match std::env::var("AQS_BASE_URL") {
            Ok(base_url) => Self::with_base_url(credentials, &base_url),
            Err(_) => Self::new(credentials),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL, credentials included.
    pub fn request_url(&self, request: &MeasurementRequest) -> Result<Url> {
        let endpoint = format!("{}/{}", self.base_url, request.location.endpoint());
        Url::parse_with_params(&endpoint, request.query_pairs(&self.credentials))
            .map_err(|e| AqsError::InvalidRequest(format!("bad URL '{}': {}", endpoint, e)))
    }

    /// Fetches raw sample rows for `request`.
    ///
    /// One call, no retries. A non-2xx status or a failed reply header is a
    /// [`AqsError::RemoteError`]; an empty selection is `Ok(vec![])`.
    pub async fn fetch_measurements(&self, request: &MeasurementRequest) -> Result<Vec<Sample>> {
        request.validate()?;
        let url = self.request_url(request)?;

        log::info!(
            "Fetching {} for params {} from {} to {}",
            request.location.endpoint(),
            request.params.join(","),
            request.begin,
            request.end
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("AQS replied {}: {}", status, body);
            return Err(AqsError::RemoteError(format!("HTTP {}: {}", status, body)));
        }

        let body = response.text().await?;
        let samples = parse_reply(&body)?;
        log::info!("Received {} samples", samples.len());
        Ok(samples)
    }
}

/// Decodes a `sampleData` reply body and checks its header.
pub fn parse_reply(body: &str) -> Result<Vec<Sample>> {
    let reply: Reply = serde_json::from_str(body)?;

    let Some(header) = reply.header.first() else {
        return Err(AqsError::RemoteError("reply has no header".to_string()));
    };

    match header.status.as_str() {
        "Success" => {
            if let Some(rows) = header.rows {
                if rows as usize != reply.data.len() {
                    log::warn!(
                        "Header announced {} rows but {} were decoded",
                        rows,
                        reply.data.len()
                    );
                }
            }
            Ok(reply.data)
        }
        NO_DATA_STATUS => {
            log::warn!("AQS returned no data for the selection");
            Ok(Vec::new())
        }
        other => {
            let message = if header.error.is_empty() {
                other.to_string()
            } else {
                format!("{}: {}", other, header.error.join("; "))
            };
            log::error!("AQS request failed: {}", message);
            Err(AqsError::RemoteError(message))
        }
    }
}
