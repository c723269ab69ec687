//! GetTransportInfo operation for AVTransport service

use crate::operation::required_text;
use crate::{Result, Service, SonosOperation, TransportState};

/// GetTransportInfo operation
pub struct GetTransportInfoOperation;

/// Request for GetTransportInfo operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetTransportInfoRequest {
    pub instance_id: u32,
}

/// Response for GetTransportInfo operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetTransportInfoResponse {
    pub current_transport_state: TransportState,
}

impl SonosOperation for GetTransportInfoOperation {
    type Request = GetTransportInfoRequest;
    type Response = GetTransportInfoResponse;

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "GetTransportInfo";

    fn build_payload(request: &Self::Request) -> String {
        format!("<InstanceID>{}</InstanceID><Speed>1</Speed>", request.instance_id)
    }

    fn parse_response(xml: &str) -> Result<Self::Response> {
        let state = required_text(xml, "CurrentTransportState")?;
        Ok(GetTransportInfoResponse {
            current_transport_state: TransportState::from(state.trim()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiError;

    #[test]
    fn test_get_transport_info_payload() {
        let payload = GetTransportInfoOperation::build_payload(&GetTransportInfoRequest::default());
        assert_eq!(payload, "<InstanceID>0</InstanceID><Speed>1</Speed>");
    }

    #[test]
    fn test_get_transport_info_response_parsing() {
        let xml = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body>
            <u:GetTransportInfoResponse xmlns:u="urn:schemas-upnp-org:service:AVTransport:1">
                <CurrentTransportState>PAUSED_PLAYBACK</CurrentTransportState>
                <CurrentTransportStatus>OK</CurrentTransportStatus>
                <CurrentSpeed>1</CurrentSpeed>
            </u:GetTransportInfoResponse>
        </s:Body></s:Envelope>"#;

        let response = GetTransportInfoOperation::parse_response(xml).unwrap();
        assert_eq!(response.current_transport_state, TransportState::PausedPlayback);
    }

    #[test]
    fn test_missing_state_is_malformed() {
        let err = GetTransportInfoOperation::parse_response("<u:GetTransportInfoResponse/>").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }
}
