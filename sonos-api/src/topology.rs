//! Locating one player through the household topology
//!
//! Any player can describe the whole household. Resolution asks the player
//! that answered discovery for its zone group state, finds the member whose
//! `UUID` is the target identity and takes the host out of its `Location`.

use std::net::IpAddr;

use soap_client::{HttpTransport, UreqTransport};
use sonos_parser::RowQuery;

use crate::operations::GetZoneGroupStateOperation;
use crate::{ApiError, DeviceAddress, DeviceIdentity, Result, SonosClient};

/// Resolves a [`DeviceIdentity`] to a [`DeviceAddress`] via any reachable player
#[derive(Debug, Clone, Default)]
pub struct TopologyResolver<T = UreqTransport> {
    client: SonosClient<T>,
}

impl TopologyResolver<UreqTransport> {
    pub fn new() -> Self {
        Self {
            client: SonosClient::new(),
        }
    }
}

impl<T: HttpTransport> TopologyResolver<T> {
    pub fn with_client(client: SonosClient<T>) -> Self {
        Self { client }
    }

    /// The unescaped zone group document as reported by `responder`
    pub fn zone_group_state(&self, responder: &DeviceAddress) -> Result<String> {
        let response = self.client.execute::<GetZoneGroupStateOperation>(responder, &())?;
        Ok(response.zone_group_state)
    }

    /// Find where `identity` lives, asking `responder`
    ///
    /// The returned address reuses the responder's port.
    pub fn resolve(&self, responder: &DeviceAddress, identity: &DeviceIdentity) -> Result<DeviceAddress> {
        let topology = self.zone_group_state(responder)?;

        let location = member_location(&topology, identity)?
            .ok_or_else(|| ApiError::NotFound(identity.to_string()))?;

        let ip = extract_host(&location)
            .and_then(|host| host.parse::<IpAddr>().ok())
            .ok_or_else(|| ApiError::MalformedResponse(format!("no usable host in Location '{}'", location)))?;

        let address = DeviceAddress::new(ip, responder.port());
        tracing::debug!(%identity, %responder, %address, "Resolved device from topology");
        Ok(address)
    }
}

/// `Location` of the first `ZoneGroupMember` whose `UUID` is `identity`
pub fn member_location(topology: &str, identity: &DeviceIdentity) -> Result<Option<String>> {
    let query = RowQuery::new("ZoneGroupMember", "UUID", identity.as_str(), "Location");
    Ok(sonos_parser::first_attribute_row(topology, &query)?)
}

/// Host part of a device URL: the text between `//` and the next `:`
///
/// URLs without an explicit port yield `None`.
pub fn extract_host(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("//")?;
    let (host, _) = rest.split_once(':')?;
    (!host.is_empty()).then_some(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOPOLOGY: &str = r#"<ZoneGroupState><ZoneGroups>
        <ZoneGroup Coordinator="RINCON_A" ID="RINCON_A:1">
            <ZoneGroupMember UUID="RINCON_A" Location="http://192.168.1.10:1400/xml/device_description.xml" ZoneName="Kitchen"/>
            <ZoneGroupMember UUID="RINCON_B" Location="http://192.168.1.11:1400/xml/device_description.xml" ZoneName="Den">
                <Satellite UUID="RINCON_S" Location="http://192.168.1.12:1400/xml/device_description.xml"/>
            </ZoneGroupMember>
        </ZoneGroup>
    </ZoneGroups></ZoneGroupState>"#;

    #[rstest]
    #[case("RINCON_A", Some("http://192.168.1.10:1400/xml/device_description.xml"))]
    #[case("RINCON_B", Some("http://192.168.1.11:1400/xml/device_description.xml"))]
    #[case::satellites_are_not_members("RINCON_S", None)]
    #[case::unknown("RINCON_C", None)]
    fn test_member_location(#[case] uid: &str, #[case] expected: Option<&str>) {
        let location = member_location(TOPOLOGY, &DeviceIdentity::new(uid)).unwrap();
        assert_eq!(location.as_deref(), expected);
    }

    #[rstest]
    #[case("http://192.168.1.100:1400/xml/device_description.xml", Some("192.168.1.100"))]
    #[case("https://10.0.0.5:8080/path", Some("10.0.0.5"))]
    #[case::no_port("http://10.0.0.5/path", None)]
    #[case::no_scheme("invalid-url", None)]
    #[case::empty_host("http://:1400/", None)]
    fn test_extract_host(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_host(url), expected);
    }
}
