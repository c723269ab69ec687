//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during SOAP communication
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoapError {
    /// The device could not be reached or the connection broke mid-request
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// Connect or read exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The device answered with a non-success HTTP status
    ///
    /// `fault_code` carries the UPnP `errorCode` when the body was a SOAP fault.
    #[error("HTTP status {status}")]
    Status { status: u16, fault_code: Option<u16> },
}
