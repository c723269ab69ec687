//! Sonos API operations organized by service

pub mod av_transport;
pub mod rendering_control;
pub mod zone_group_topology;

pub use av_transport::{
    GetTransportInfoOperation, GetTransportInfoRequest, GetTransportInfoResponse, NextOperation, PauseOperation,
    PlayOperation, TransportRequest,
};
pub use rendering_control::{
    GetVolumeOperation, GetVolumeRequest, GetVolumeResponse, SetVolumeOperation, SetVolumeRequest,
};
pub use zone_group_topology::{GetZoneGroupStateOperation, GetZoneGroupStateResponse};
