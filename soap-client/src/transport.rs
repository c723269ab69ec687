//! HTTP transport used to deliver SOAP envelopes

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::SoapError;

/// A single HTTP POST carrying a SOAP envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: String,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed HTTP exchange
///
/// Non-success statuses are still responses; only failures to complete the
/// exchange at all are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Something that can POST a request and hand back the device's answer
pub trait HttpTransport: Send + Sync {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, SoapError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, SoapError> {
        (**self).post(request)
    }
}

/// Blocking transport backed by a `ureq` agent
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Default connect/read budget for a device call
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn new() -> Self {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    /// Bound connect, read and write by `timeout` each
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(timeout)
                .timeout_read(timeout)
                .timeout_write(timeout)
                .build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn post(&self, request: &HttpRequest) -> Result<HttpResponse, SoapError> {
        let mut call = self.agent.post(&request.url);
        for (name, value) in &request.headers {
            call = call.set(name, value);
        }

        match call.send_string(&request.body) {
            Ok(response) => {
                let status = response.status();
                let body = response.into_string().map_err(io_error)?;
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Status(status, response)) => {
                // The body is only used for fault details, so a failed read is not fatal
                let body = response.into_string().unwrap_or_default();
                Ok(HttpResponse { status, body })
            }
            Err(ureq::Error::Transport(transport)) => Err(transport_error(&transport)),
        }
    }
}

fn transport_error(transport: &ureq::Transport) -> SoapError {
    let timed_out = std::error::Error::source(transport)
        .and_then(|source| source.downcast_ref::<io::Error>())
        .map(is_timeout)
        .unwrap_or(false);

    if timed_out {
        SoapError::Timeout(transport.to_string())
    } else {
        SoapError::Network(transport.to_string())
    }
}

fn io_error(error: io::Error) -> SoapError {
    if is_timeout(&error) {
        SoapError::Timeout(error.to_string())
    } else {
        SoapError::Network(error.to_string())
    }
}

fn is_timeout(error: &io::Error) -> bool {
    matches!(error.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
