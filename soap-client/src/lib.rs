//! Private SOAP client for UPnP device communication
//!
//! This crate builds SOAP envelopes and posts them to Sonos control
//! endpoints. It knows nothing about individual operations; callers pass the
//! control path, service URN, action name and argument payload, and get the
//! raw response body back for streaming extraction.

mod error;
mod transport;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use error::SoapError;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, UreqTransport};

/// Build the SOAP envelope for `action` on `service_uri`
///
/// The envelope is emitted on a single line; Sonos rejects documents with
/// leading whitespace before the root element.
pub fn envelope(action: &str, service_uri: &str, payload: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0"?>"#,
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">"#,
            r#"<s:Body><u:{action} xmlns:u="{service_uri}">{payload}</u:{action}></s:Body>"#,
            r#"</s:Envelope>"#
        ),
        action = action,
        service_uri = service_uri,
        payload = payload
    )
}

/// A minimal SOAP client for UPnP device communication
#[derive(Debug, Clone, Default)]
pub struct SoapClient<T = UreqTransport> {
    transport: T,
}

impl SoapClient<UreqTransport> {
    /// Create a new SOAP client with the default 2 second timeouts
    pub fn new() -> Self {
        Self {
            transport: UreqTransport::new(),
        }
    }
}

impl<T: HttpTransport> SoapClient<T> {
    /// Create a SOAP client over a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a SOAP request and return the response body
    ///
    /// Any non-2xx status is reported as [`SoapError::Status`], with the UPnP
    /// error code attached when the device sent a SOAP fault.
    pub fn call(
        &self,
        host: &str,
        port: u16,
        endpoint: &str,
        service_uri: &str,
        action: &str,
        payload: &str,
    ) -> Result<String, SoapError> {
        let request = HttpRequest {
            url: format!("http://{}:{}/{}", host, port, endpoint.trim_start_matches('/')),
            headers: vec![
                ("Content-Type", "text/xml; charset=\"utf-8\"".to_string()),
                ("SOAPACTION", format!("{}#{}", service_uri, action)),
            ],
            body: envelope(action, service_uri, payload),
        };

        tracing::debug!(action, url = %request.url, body = %request.body, "SOAP request");

        let response = self.transport.post(&request).map_err(|e| {
            tracing::warn!(action, url = %request.url, error = %e, "SOAP request failed");
            e
        })?;

        if !(200..300).contains(&response.status) {
            let fault_code = fault_code(&response.body);
            tracing::warn!(
                action,
                status = response.status,
                fault_code = ?fault_code,
                body = %response.body,
                "SOAP call returned bad status"
            );
            return Err(SoapError::Status {
                status: response.status,
                fault_code,
            });
        }

        tracing::debug!(action, status = response.status, "SOAP response");
        Ok(response.body)
    }
}

/// Pull the UPnP `errorCode` out of a SOAP fault body
fn fault_code(body: &str) -> Option<u16> {
    sonos_parser::tag_text(body, "errorCode")
        .ok()
        .and_then(|code| code.trim().parse().ok())
}
