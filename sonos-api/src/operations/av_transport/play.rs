//! Play operation for AVTransport service

use super::TransportRequest;
use crate::{Result, Service, SonosOperation};

/// Play operation
pub struct PlayOperation;

impl SonosOperation for PlayOperation {
    type Request = TransportRequest;
    type Response = ();

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "Play";

    fn build_payload(request: &Self::Request) -> String {
        request.payload()
    }

    fn parse_response(_xml: &str) -> Result<Self::Response> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_payload_construction() {
        let payload = PlayOperation::build_payload(&TransportRequest::default());
        assert_eq!(payload, "<InstanceID>0</InstanceID><Speed>1</Speed>");
    }

    #[test]
    fn test_play_response_parsing() {
        assert!(PlayOperation::parse_response("<u:PlayResponse/>").is_ok());
    }
}
