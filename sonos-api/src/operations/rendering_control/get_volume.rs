//! GetVolume operation for RenderingControl service

use super::MASTER_CHANNEL;
use crate::operation::required_text;
use crate::{ApiError, Result, Service, SonosOperation, Volume};

/// GetVolume operation
pub struct GetVolumeOperation;

/// Request for GetVolume operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetVolumeRequest {
    pub instance_id: u32,
    pub channel: String,
}

impl Default for GetVolumeRequest {
    fn default() -> Self {
        Self {
            instance_id: 0,
            channel: MASTER_CHANNEL.to_string(),
        }
    }
}

/// Response for GetVolume operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetVolumeResponse {
    pub current_volume: Volume,
}

impl SonosOperation for GetVolumeOperation {
    type Request = GetVolumeRequest;
    type Response = GetVolumeResponse;

    const SERVICE: Service = Service::RenderingControl;
    const ACTION: &'static str = "GetVolume";

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><Channel>{}</Channel>",
            request.instance_id, request.channel
        )
    }

    fn parse_response(xml: &str) -> Result<Self::Response> {
        let raw = required_text(xml, "CurrentVolume")?;
        let current_volume = raw
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(Volume::new)
            .ok_or_else(|| ApiError::MalformedResponse(format!("CurrentVolume '{}' is not a volume", raw)))?;
        Ok(GetVolumeResponse { current_volume })
    }
}
