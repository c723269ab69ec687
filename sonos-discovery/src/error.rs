//! Error types for the discovery system.

use sonos_api::ApiError;
use thiserror::Error;

/// Error type for discovery operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// No player announced itself within the retry budget
    #[error("No Sonos player answered after {attempts} search attempts")]
    Exhausted { attempts: u32 },

    /// Socket creation, send or receive failed
    #[error("Network error: {0}")]
    Network(String),

    /// A player answered but the topology has no member with this identity
    #[error("No device with identity {0} in zone group topology")]
    NotFound(String),

    /// Asking the responder for the topology failed
    #[error("Topology lookup failed: {0}")]
    Topology(ApiError),
}

impl From<ApiError> for DiscoveryError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::NotFound(identity) => DiscoveryError::NotFound(identity),
            other => DiscoveryError::Topology(other),
        }
    }
}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
