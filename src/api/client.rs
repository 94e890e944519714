use std::time::Duration;

use base64::{Engine, prelude::BASE64_STANDARD};
use http::{Uri, header::AUTHORIZATION};
use ureq::Agent;

use crate::error::FetchError;

/// Blocking HTTP GET returning the body of a successful response.
pub trait Transport {
    fn get(&self, uri: &Uri, query: &[(&str, &str)]) -> Result<String, FetchError>;
}

/// Build an agent which reports HTTP statuses as responses rather than errors.
pub fn new_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// [`ureq`] agent authenticating every request with HTTP Basic auth.
pub struct BasicAuthClient {
    agent: Agent,
    authorization: String,
}

impl BasicAuthClient {
    pub fn new(username: &str, password: &str, timeout: Duration) -> Self {
        Self { agent: new_agent(timeout), authorization: basic_authorization(username, password) }
    }
}

/// `Authorization` header value for HTTP Basic auth.
pub fn basic_authorization(username: &str, password: &str) -> String {
    format!("Basic {}", BASE64_STANDARD.encode(format!("{username}:{password}")))
}

impl Transport for BasicAuthClient {
    fn get(&self, uri: &Uri, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let request_error = |source: ureq::Error| FetchError::Request {
            uri: uri.clone(),
            source: Box::new(source),
        };

        let mut request = self.agent.get(uri.clone()).header(AUTHORIZATION, &self.authorization);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        let mut response = request.call().map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { uri: uri.clone(), status });
        }
        response.body_mut().read_to_string().map_err(request_error)
    }
}


/// Replays canned responses and records every request.
#[cfg(test)]
#[derive(Default)]
pub struct ScriptedTransport {
    responses: std::cell::RefCell<std::collections::VecDeque<Result<String, FetchError>>>,
    pub requests: std::cell::RefCell<Vec<(Uri, Vec<(String, String)>)>>,
}

#[cfg(test)]
impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = Result<String, FetchError>>) -> Self {
        Self {
            responses: std::cell::RefCell::new(responses.into_iter().collect()),
            ..Default::default()
        }
    }

    pub fn n_requests(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Value of the query parameter in each request.
    pub fn parameters(&self, name: &str) -> Vec<Option<String>> {
        self.requests
            .borrow()
            .iter()
            .map(|(_, query)| {
                query.iter().find(|(key, _)| key == name).map(|(_, value)| value.clone())
            })
            .collect()
    }
}

#[cfg(test)]
impl Transport for &ScriptedTransport {
    fn get(&self, uri: &Uri, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let query =
            query.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect();
        self.requests.borrow_mut().push((uri.clone(), query));
        self.responses.borrow_mut().pop_front().expect("unexpected request")
    }
}
