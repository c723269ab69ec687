use soap_client::SoapError;
use sonos_parser::ParseError;
use thiserror::Error;

/// Result code reported for a successful call
pub const STATUS_OK: i32 = 0;

/// Result code reported when the device could not be talked to at all
pub const CONNECT_FAILURE: i32 = 11;

/// High-level API errors for Sonos operations
///
/// These abstract away the underlying SOAP transport and give each failure
/// mode a name the session layer can react to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The device could not be reached
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// Connect or read exceeded its time budget
    #[error("Timed out: {0}")]
    Timeout(String),

    /// The device answered with a non-success HTTP status
    ///
    /// Sonos reports SOAP faults as HTTP 500; `fault_code` is the UPnP
    /// `errorCode` from the fault body when one was present.
    #[error("Bad HTTP status {status}")]
    BadStatus { status: u16, fault_code: Option<u16> },

    /// An expected field was missing from the response or could not be parsed
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The topology has no member with the requested identity
    #[error("No device with identity {0} in zone group topology")]
    NotFound(String),

    /// A caller-supplied value was rejected before anything was sent
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// Map this error onto the numeric result code contract
    ///
    /// Bad statuses surface as the HTTP status itself; every other failure
    /// is reported as [`CONNECT_FAILURE`].
    pub fn status_code(&self) -> i32 {
        match self {
            ApiError::BadStatus { status, .. } => i32::from(*status),
            _ => CONNECT_FAILURE,
        }
    }
}

/// Result code for any API result: [`STATUS_OK`] on success
pub fn status_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => STATUS_OK,
        Err(e) => e.status_code(),
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::NetworkUnavailable(msg),
            SoapError::Timeout(msg) => ApiError::Timeout(msg),
            SoapError::Status { status, fault_code } => ApiError::BadStatus { status, fault_code },
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(error: ParseError) -> Self {
        ApiError::MalformedResponse(error.to_string())
    }
}
