//! Typed errors for each stage of a run.
//!
//! Every stage fails the whole run: nothing gets written unless all the data
//! has been fetched and transformed.

use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, NaiveDateTime, Utc};
use http::{StatusCode, Uri};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse `{path}`")]
    Parse {
        path: PathBuf,

        #[source]
        source: toml::de::Error,
    },

    #[error("`{0}` is not set")]
    Missing(&'static str),

    #[error("invalid URL `{url}`")]
    InvalidUrl {
        url: String,

        #[source]
        source: http::uri::InvalidUri,
    },

    #[error("cannot understand the date expression `{0}`")]
    InvalidDate(String),

    #[error("`{0}` does not exist in the configured time zone")]
    NonExistentLocalTime(NaiveDateTime),

    #[error("the period starts at {from} which is after its end at {to}")]
    InvertedPeriod { from: DateTime<Utc>, to: DateTime<Utc> },

    #[error("`{key}` must be positive")]
    NonPositive { key: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to `{uri}` failed")]
    Request {
        uri: Uri,

        #[source]
        source: Box<ureq::Error>,
    },

    #[error("`{uri}` responded with {status}")]
    Status { uri: Uri, status: StatusCode },

    #[error("unexpected response from `{uri}`")]
    Parse {
        uri: Uri,

        #[source]
        source: serde_json::Error,
    },

    #[error("no `page` parameter in the next page URL `{0}`")]
    NextPage(String),

    #[error("gave up after {0} pages, the server keeps returning the next page")]
    TooManyPages(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("no rate for the interval ending at {interval_end}")]
    MissingRate { interval_end: DateTime<Utc> },
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("failed to write into InfluxDB")]
    Request(#[from] influxdb::Error),

    #[error("InfluxDB did not respond within {0:?}")]
    Timeout(Duration),

    #[error("the point at {0} is before the Unix epoch")]
    BeforeEpoch(DateTime<Utc>),
}
