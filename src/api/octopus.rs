//! [Octopus Energy](https://developer.octopus.energy/rest/) REST API client.

mod models;

use std::time::Duration;

use http::Uri;
use serde::de::DeserializeOwned;

pub use self::models::{ConsumptionReading, RateReading};
use self::models::{NextPageQuery, Page};
use crate::{
    api::client::{BasicAuthClient, Transport},
    error::{ConfigError, FetchError},
    period::Period,
    prelude::*,
};

pub const DEFAULT_BASE_URL: &str = "https://api.octopus.energy/v1";

pub struct Api<T = BasicAuthClient> {
    transport: T,
    max_pages: usize,
}

impl Api {
    /// The API key is the Basic auth username, the password stays empty.
    pub fn new(api_key: &str, timeout: Duration, max_pages: usize) -> Self {
        Self::with_transport(BasicAuthClient::new(api_key, "", timeout), max_pages)
    }
}

impl<T: Transport> Api<T> {
    pub const fn with_transport(transport: T, max_pages: usize) -> Self {
        Self { transport, max_pages }
    }

    #[instrument(skip_all, fields(mpan = mpan, serial_number = serial_number))]
    pub fn get_consumption(
        &self,
        base_url: &Uri,
        mpan: &str,
        serial_number: &str,
        period: &Period,
    ) -> Result<Vec<ConsumptionReading>> {
        info!(%period, "fetching consumption…");
        let uri = consumption_uri(base_url, mpan, serial_number)?;
        let readings = self.fetch_all(&uri, period)?;
        info!(n_readings = readings.len(), "fetched");
        Ok(readings)
    }

    #[instrument(skip_all, fields(uri = %uri))]
    pub fn get_unit_rates(&self, uri: &Uri, period: &Period) -> Result<Vec<RateReading>> {
        info!(%period, "fetching unit rates…");
        let rates = self.fetch_all(uri, period)?;
        info!(n_rates = rates.len(), "fetched");
        Ok(rates)
    }

    /// Fetch every page of the list endpoint, concatenating the results in page order.
    ///
    /// Any failed page aborts the whole fetch.
    pub fn fetch_all<R: DeserializeOwned>(
        &self,
        uri: &Uri,
        period: &Period,
    ) -> Result<Vec<R>, FetchError> {
        let (period_from, period_to) = period.to_query();
        let mut results = Vec::new();
        let mut page: Option<String> = None;

        for n_pages in 1..=self.max_pages {
            let mut query =
                vec![("period_from", period_from.as_str()), ("period_to", period_to.as_str())];
            if let Some(page) = &page {
                query.push(("page", page.as_str()));
            }
            let body = self.transport.get(uri, &query)?;
            let response: Page<R> = serde_json::from_str(&body)
                .map_err(|source| FetchError::Parse { uri: uri.clone(), source })?;
            debug!(n_pages, n_results = response.results.len(), has_next = response.next.is_some());
            results.extend(response.results);

            match response.next {
                Some(next) => page = Some(next_page(&next)?),
                None => return Ok(results),
            }
        }

        Err(FetchError::TooManyPages(self.max_pages))
    }
}

pub fn consumption_uri(
    base_url: &Uri,
    mpan: &str,
    serial_number: &str,
) -> Result<Uri, ConfigError> {
    let base_url = base_url.to_string();
    let url = format!(
        "{}/electricity-meter-points/{mpan}/meters/{serial_number}/consumption/",
        base_url.trim_end_matches('/'),
    );
    url.parse().map_err(|source| ConfigError::InvalidUrl { url, source })
}

/// Extract the `page` query parameter from the next page URL.
fn next_page(next: &str) -> Result<String, FetchError> {
    let uri: Uri = next.parse().map_err(|_| FetchError::NextPage(next.to_string()))?;
    uri.query()
        .and_then(|query| serde_qs::from_str::<NextPageQuery>(query).ok())
        .and_then(|query| query.page)
        .ok_or_else(|| FetchError::NextPage(next.to_string()))
}
