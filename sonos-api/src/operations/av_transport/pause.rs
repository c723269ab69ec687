//! Pause operation for AVTransport service

use super::TransportRequest;
use crate::{Result, Service, SonosOperation};

/// Pause operation
pub struct PauseOperation;

impl SonosOperation for PauseOperation {
    type Request = TransportRequest;
    type Response = ();

    const SERVICE: Service = Service::AVTransport;
    const ACTION: &'static str = "Pause";

    fn build_payload(request: &Self::Request) -> String {
        request.payload()
    }

    fn parse_response(_xml: &str) -> Result<Self::Response> {
        Ok(())
    }
}
