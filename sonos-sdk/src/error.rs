use sonos_api::{ApiError, CONNECT_FAILURE};
use sonos_discovery::DiscoveryError;
use state_store::StoreError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),
}

impl SdkError {
    /// Numeric result code for a dispatch source
    ///
    /// A control call the device answered with a bad status reports that
    /// status. Any failure to find the device is the connect-failure code.
    pub fn status_code(&self) -> i32 {
        match self {
            SdkError::Api(e) => e.status_code(),
            _ => CONNECT_FAILURE,
        }
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = SdkError::from(ApiError::BadStatus {
            status: 500,
            fault_code: Some(701),
        });
        assert_eq!(err.status_code(), 500);

        let err = SdkError::from(DiscoveryError::Exhausted { attempts: 4 });
        assert_eq!(err.status_code(), CONNECT_FAILURE);

        let err = SdkError::from(DiscoveryError::NotFound("RINCON_X".into()));
        assert_eq!(err.status_code(), CONNECT_FAILURE);

        let err = SdkError::from(DiscoveryError::Topology(ApiError::BadStatus {
            status: 503,
            fault_code: None,
        }));
        assert_eq!(err.status_code(), CONNECT_FAILURE);

        let err = SdkError::from(ApiError::Timeout("read".into()));
        assert_eq!(err.status_code(), CONNECT_FAILURE);
    }
}
