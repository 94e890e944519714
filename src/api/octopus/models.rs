use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::quantity::{energy::KilowattHours, rate::PencePerKilowattHour};

/// Single page of a paginated list response.
#[derive(Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,

    /// Full URL of the next page.
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Deserialize)]
pub struct NextPageQuery {
    pub page: Option<String>,
}

/// Half-hourly meter reading.
///
/// Timestamps get normalized to UTC on parsing, so readings and rates join
/// regardless of the offset the API reports them in.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct ConsumptionReading {
    pub consumption: KilowattHours,
    pub interval_start: DateTime<Utc>,
    pub interval_end: DateTime<Utc>,
}

/// Unit rate valid for `valid_from..valid_to`.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct RateReading {
    pub value_inc_vat: PencePerKilowattHour,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
}
