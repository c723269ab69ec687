//! SetVolume operation for RenderingControl service

use super::MASTER_CHANNEL;
use crate::{Result, Service, SonosOperation, Volume};

/// SetVolume operation
pub struct SetVolumeOperation;

/// Request for SetVolume operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetVolumeRequest {
    pub instance_id: u32,
    pub channel: String,
    pub desired_volume: Volume,
}

impl SetVolumeRequest {
    /// Set the master channel of instance 0
    pub fn master(desired_volume: Volume) -> Self {
        Self {
            instance_id: 0,
            channel: MASTER_CHANNEL.to_string(),
            desired_volume,
        }
    }
}

impl SonosOperation for SetVolumeOperation {
    type Request = SetVolumeRequest;
    type Response = ();

    const SERVICE: Service = Service::RenderingControl;
    const ACTION: &'static str = "SetVolume";

    fn build_payload(request: &Self::Request) -> String {
        format!(
            "<InstanceID>{}</InstanceID><Channel>{}</Channel><DesiredVolume>{}</DesiredVolume>",
            request.instance_id, request.channel, request.desired_volume
        )
    }

    fn parse_response(_xml: &str) -> Result<Self::Response> {
        Ok(())
    }
}
