use std::time::Duration;

use soap_client::{HttpTransport, SoapClient, UreqTransport};

use crate::{DeviceAddress, Result, SonosOperation};

/// A client for executing Sonos operations against actual devices
///
/// This client bridges the stateless operation definitions and the network:
/// it builds the payload, posts the envelope through soap-client and parses
/// the raw response body.
///
/// ```rust,no_run
/// use sonos_api::SonosClient;
/// use sonos_api::operations::{GetVolumeOperation, GetVolumeRequest};
///
/// let client = SonosClient::new();
/// let speaker = "192.168.1.100".parse()?;
/// let response = client.execute::<GetVolumeOperation>(&speaker, &GetVolumeRequest::default())?;
/// println!("volume is {}", response.current_volume);
/// # Ok::<(), sonos_api::ApiError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SonosClient<T = UreqTransport> {
    soap_client: SoapClient<T>,
}

impl SonosClient<UreqTransport> {
    /// Create a new Sonos client with the default 2 second timeouts
    pub fn new() -> Self {
        Self {
            soap_client: SoapClient::new(),
        }
    }

    /// Create a Sonos client whose connect and read timeouts are `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_transport(UreqTransport::with_timeout(timeout))
    }
}

impl<T: HttpTransport> SonosClient<T> {
    /// Create a Sonos client with a custom SOAP client
    pub fn with_soap_client(soap_client: SoapClient<T>) -> Self {
        Self { soap_client }
    }

    /// Create a Sonos client over a custom HTTP transport
    pub fn with_transport(transport: T) -> Self {
        Self::with_soap_client(SoapClient::with_transport(transport))
    }

    pub fn soap_client(&self) -> &SoapClient<T> {
        &self.soap_client
    }

    /// Execute a Sonos operation against a device
    pub fn execute<Op: SonosOperation>(&self, device: &DeviceAddress, request: &Op::Request) -> Result<Op::Response> {
        let service_info = Op::SERVICE.info();
        let payload = Op::build_payload(request);

        let xml = self.soap_client.call(
            &device.host(),
            device.port(),
            service_info.endpoint,
            service_info.service_uri,
            Op::ACTION,
            &payload,
        )?;

        Op::parse_response(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{GetVolumeOperation, GetVolumeRequest, GetZoneGroupStateOperation};
    use crate::ApiError;
    use soap_client::mock::MockTransport;

    #[test]
    fn test_client_creation() {
        let _client = SonosClient::new();
        let _timeout_client = SonosClient::with_timeout(Duration::from_millis(500));
    }

    #[test]
    fn test_execute_routes_to_service_endpoint() {
        let client = SonosClient::with_transport(MockTransport::new());
        client
            .soap_client()
            .transport()
            .respond(200, "<CurrentVolume>18</CurrentVolume>");

        let device: DeviceAddress = "192.168.1.30".parse().unwrap();
        let response = client
            .execute::<GetVolumeOperation>(&device, &GetVolumeRequest::default())
            .unwrap();
        assert_eq!(response.current_volume.value(), 18);

        let requests = client.soap_client().transport().requests();
        assert_eq!(requests[0].url, "http://192.168.1.30:1400/MediaRenderer/RenderingControl/Control");
        assert_eq!(
            requests[0].header("SOAPACTION"),
            Some("urn:schemas-upnp-org:service:RenderingControl:1#GetVolume")
        );
    }

    #[test]
    fn test_topology_query_uses_its_own_namespace() {
        let client = SonosClient::with_transport(MockTransport::new());
        client
            .soap_client()
            .transport()
            .respond(200, "<ZoneGroupState>&lt;ZoneGroups/&gt;</ZoneGroupState>");

        let device: DeviceAddress = "10.0.0.2:1400".parse().unwrap();
        client.execute::<GetZoneGroupStateOperation>(&device, &()).unwrap();

        let request = &client.soap_client().transport().requests()[0];
        assert_eq!(request.url, "http://10.0.0.2:1400/ZoneGroupTopology/Control");
        let expected =
            r#"<u:GetZoneGroupState xmlns:u="urn:schemas-upnp-org:service:ZoneGroupTopology:1"></u:GetZoneGroupState>"#;
        assert!(request.body.contains(expected));
    }

    #[test]
    fn test_soap_errors_become_api_errors() {
        let client = SonosClient::with_transport(MockTransport::new());
        client.soap_client().transport().respond(500, "");

        let device: DeviceAddress = "10.0.0.2".parse().unwrap();
        let err = client
            .execute::<GetVolumeOperation>(&device, &GetVolumeRequest::default())
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::BadStatus {
                status: 500,
                fault_code: None
            }
        );
    }
}
