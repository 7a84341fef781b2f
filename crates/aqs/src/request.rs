use chrono::{Datelike, NaiveDate};

use crate::{AqsError, Result};

/// The API accepts at most this many parameter codes per request.
pub const MAX_PARAMS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Every monitor in a county.
    County { state: String, county: String },
    /// A single monitoring site.
    Site {
        state: String,
        county: String,
        site: String,
    },
}

impl Location {
    pub fn county(state: &str, county: &str) -> Self {
        Location::County {
            state: state.to_string(),
            county: county.to_string(),
        }
    }

    pub fn site(state: &str, county: &str, site: &str) -> Self {
        Location::Site {
            state: state.to_string(),
            county: county.to_string(),
            site: site.to_string(),
        }
    }

    /// Path under `sampleData/` for this kind of location.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Location::County { .. } => "sampleData/byCounty",
            Location::Site { .. } => "sampleData/bySite",
        }
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Location::County { state, county } => {
                vec![("state", state.clone()), ("county", county.clone())]
            }
            Location::Site {
                state,
                county,
                site,
            } => vec![
                ("state", state.clone()),
                ("county", county.clone()),
                ("site", site.clone()),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub key: String,
}

impl Credentials {
    pub fn new(email: &str, key: &str) -> Self {
        Credentials {
            email: email.to_string(),
            key: key.to_string(),
        }
    }

    /// Reads `AQS_EMAIL` and `AQS_KEY`.
    pub fn from_env() -> Result<Self> {
        let email =
            std::env::var("AQS_EMAIL").map_err(|_| AqsError::MissingCredentials("AQS_EMAIL"))?;
        let key = std::env::var("AQS_KEY").map_err(|_| AqsError::MissingCredentials("AQS_KEY"))?;
        Ok(Credentials { email, key })
    }
}

/// Parameters for one `sampleData` call.
#[derive(Debug, Clone)]
pub struct MeasurementRequest {
    pub location: Location,
    /// AQS parameter codes, e.g. "44201" for ozone.
    pub params: Vec<String>,
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl MeasurementRequest {
    pub fn new(location: Location, params: &[&str], begin: NaiveDate, end: NaiveDate) -> Self {
        MeasurementRequest {
            location,
            params: params.iter().map(|p| p.to_string()).collect(),
            begin,
            end,
        }
    }

    /// Checks the constraints the API enforces: one to five parameters and a
    /// date range inside a single calendar year.
    pub fn validate(&self) -> Result<()> {
        if self.params.is_empty() {
            return Err(AqsError::InvalidRequest(
                "at least one parameter code is required".to_string(),
            ));
        }
        if self.params.len() > MAX_PARAMS {
            return Err(AqsError::InvalidRequest(format!(
                "at most {} parameter codes per request, got {}",
                MAX_PARAMS,
                self.params.len()
            )));
        }
        if self.params.iter().any(|p| p.trim().is_empty()) {
            return Err(AqsError::InvalidRequest(
                "parameter codes must not be blank".to_string(),
            ));
        }
        if self.begin > self.end {
            return Err(AqsError::InvalidRequest(format!(
                "begin date {} is after end date {}",
                self.begin, self.end
            )));
        }
        if self.begin.year() != self.end.year() {
            return Err(AqsError::InvalidRequest(format!(
                "begin and end must fall in the same year, got {} and {}",
                self.begin.year(),
                self.end.year()
            )));
        }
        Ok(())
    }

    /// Query string pairs in the order the API documents them.
    pub(crate) fn query_pairs(&self, credentials: &Credentials) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("email", credentials.email.clone()),
            ("key", credentials.key.clone()),
            ("param", self.params.join(",")),
            ("bdate", format_date(self.begin)),
            ("edate", format_date(self.end)),
        ];
        pairs.extend(self.location.query_pairs());
        pairs
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ozone(begin: NaiveDate, end: NaiveDate) -> MeasurementRequest {
        MeasurementRequest::new(Location::county("37", "183"), &["44201"], begin, end)
    }

    #[test]
    fn valid_request_passes() {
        assert!(ozone(date(2020, 1, 1), date(2020, 12, 31)).validate().is_ok());
    }

    #[test]
    fn single_day_is_valid() {
        assert!(ozone(date(2021, 6, 1), date(2021, 6, 1)).validate().is_ok());
    }

    #[test]
    fn range_across_years_is_rejected() {
        assert!(matches!(
            ozone(date(2020, 12, 1), date(2021, 1, 31)).validate(),
            Err(AqsError::InvalidRequest(_))
        ));
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(matches!(
            ozone(date(2020, 3, 1), date(2020, 2, 1)).validate(),
            Err(AqsError::InvalidRequest(_))
        ));
    }

    #[test]
    fn parameter_count_is_bounded() {
        let location = Location::site("06", "037", "1103");
        let none = MeasurementRequest::new(location.clone(), &[], date(2020, 1, 1), date(2020, 1, 2));
        let six = MeasurementRequest::new(
            location,
            &["44201", "42602", "42401", "42101", "88101", "81102"],
            date(2020, 1, 1),
            date(2020, 1, 2),
        );
        assert!(none.validate().is_err());
        assert!(six.validate().is_err());
    }

    #[test]
    fn query_pairs_follow_api_order() {
        let request = MeasurementRequest::new(
            Location::site("06", "037", "1103"),
            &["44201", "42602"],
            date(2020, 1, 1),
            date(2020, 1, 31),
        );
        let pairs = request.query_pairs(&Credentials::new("me@example.com", "secret"));
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();

        assert_eq!(
            keys,
            vec!["email", "key", "param", "bdate", "edate", "state", "county", "site"]
        );
        assert_eq!(pairs[2].1, "44201,42602");
        assert_eq!(pairs[3].1, "20200101");
        assert_eq!(pairs[4].1, "20200131");
    }

    #[test]
    fn county_has_no_site_pair() {
        let pairs = ozone(date(2020, 1, 1), date(2020, 1, 2))
            .query_pairs(&Credentials::new("me@example.com", "secret"));
        assert!(pairs.iter().all(|(k, _)| *k != "site"));
        assert_eq!(Location::county("37", "183").endpoint(), "sampleData/byCounty");
    }
}
