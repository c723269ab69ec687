//! Next operation for AVTransport service

use super::TransportRequest;
use crate::{Result, Service, SonosOperation};

/// Skip to the next track
pub struct NextOperation;

impl SonosOperation for NextOperation {
    type Request = TransportRequest;
    type Response = ();

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "Next";

    fn build_payload(request: &Self::Request) -> String {
        request.payload()
    }

    fn parse_response(_xml: &str) -> Result<Self::Response> {
        Ok(())
    }
}
