//! GetZoneGroupState operation for ZoneGroupTopology service

use crate::operation::required_text;
use crate::{Result, Service, SonosOperation};

/// Fetch the household topology document
pub struct GetZoneGroupStateOperation;

/// Response for GetZoneGroupState operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetZoneGroupStateResponse {
    /// The inner topology document, already unescaped
    pub zone_group_state: String,
}

impl SonosOperation for GetZoneGroupStateOperation {
    type Request = ();
    type Response = GetZoneGroupStateResponse;

    const SERVICE: Service = Service::ZoneGroupTopology;
    const ACTION: &'static str = "GetZoneGroupState";

    fn build_payload(_request: &Self::Request) -> String {
        String::new()
    }

    fn parse_response(xml: &str) -> Result<Self::Response> {
        Ok(GetZoneGroupStateResponse {
            zone_group_state: required_text(xml, "ZoneGroupState")?,
        })
    }
}
