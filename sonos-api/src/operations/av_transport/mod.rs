//! AVTransport service operations
//!
//! Every AVTransport action addresses instance 0; the playback commands also
//! carry a speed argument, which Sonos accepts (and ignores) on Pause and Next.

mod get_transport_info;
mod next;
mod pause;
mod play;

pub use get_transport_info::{GetTransportInfoOperation, GetTransportInfoRequest, GetTransportInfoResponse};
pub use next::NextOperation;
pub use pause::PauseOperation;
pub use play::PlayOperation;

/// Arguments shared by Play, Pause and Next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub instance_id: u32,
    pub speed: String,
}

impl Default for TransportRequest {
    fn default() -> Self {
        Self {
            instance_id: 0,
            speed: "1".to_string(),
        }
    }
}

impl TransportRequest {
    pub(crate) fn payload(&self) -> String {
        format!(
            "<InstanceID>{}</InstanceID><Speed>{}</Speed>",
            self.instance_id, self.speed
        )
    }
}
