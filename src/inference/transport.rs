//! The outbound HTTP exchange, behind a trait so it can be stubbed.

use std::time::Duration;

use log::debug;
use thiserror::Error;

/// A completed HTTP exchange: status plus the raw body text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    #[inline]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The exchange itself did not complete (unreachable host, timeout, broken
/// body stream, ...).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure description; may be empty.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Something that can POST a JSON body and hand back the response.
///
/// Non-success statuses are responses, not errors: only a failure to
/// complete the exchange is a [`TransportError`].
pub trait Transport {
    fn post_json(&self, url: &str, body: &str) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &str, body: &str) -> Result<RawResponse, TransportError> {
        (**self).post_json(url, body)
    }
}

/// [`Transport`] over a blocking `ureq` agent.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    /// Builds an agent that reports every status as a response.
    ///
    /// `timeout` bounds the whole exchange; `None` leaves it unbounded.
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build();
        Self {
            agent: config.into(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: &str) -> Result<RawResponse, TransportError> {
        debug!("POST {} ({} byte body)", url, body.len());
        let mut response = self
            .agent
            .post(url)
            .header("Content-Type", "application/json")
            .send(body)
            .map_err(|source| TransportError::new(source.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|source| TransportError::new(source.to_string()))?;
        debug!("response status {} ({} byte body)", status, body.len());

        Ok(RawResponse { status, body })
    }
}
