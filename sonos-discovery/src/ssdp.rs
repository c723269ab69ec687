//! SSDP (Simple Service Discovery Protocol) plumbing
//!
//! The engine talks to the network only through [`SsdpTransport`], so the
//! multicast socket can be swapped for a scripted one in tests.

use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use crate::error::{DiscoveryError, Result};

/// SSDP multicast group and port
pub const SSDP_MULTICAST_ADDR: &str = "239.255.255.250:1900";

/// Search target every Sonos player answers to
pub const ZONE_PLAYER_TARGET: &str = "urn:schemas-upnp-org:device:ZonePlayer:1";

/// The M-SEARCH request for Sonos zone players
pub fn search_request(mx: u8) -> String {
    format!(
        "M-SEARCH * HTTP/1.1\r\n\
         HOST: 239.255.255.250:1900\r\n\
         MAN: \"ssdp:discover\"\r\n\
         MX: {}\r\n\
         ST: {}\r\n\
         \r\n",
        mx, ZONE_PLAYER_TARGET
    )
}

/// One datagram received in answer to a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsdpPacket {
    pub source: SocketAddr,
    pub text: String,
}

impl SsdpPacket {
    /// Value of the first header called `name`, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.text
            .lines()
            .skip(1)
            .filter_map(|line| line.split_once(':'))
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim())
    }
}

/// Where search requests go and announcements come from
pub trait SsdpTransport {
    /// Send one search request to the multicast group
    fn send_search(&mut self, request: &str) -> Result<()>;

    /// Wait up to `timeout` for the next datagram; `None` when nothing arrived
    fn recv(&mut self, timeout: Duration) -> Result<Option<SsdpPacket>>;

    /// Drop anything still queued from an earlier search
    fn clear(&mut self) -> Result<()> {
        Ok(())
    }
}

/// SSDP transport over a blocking UDP socket
#[derive(Debug)]
pub struct UdpSsdpTransport {
    socket: UdpSocket,
    buffer: Vec<u8>,
}

impl UdpSsdpTransport {
    /// Bind an ephemeral UDP port for searching
    pub fn bind() -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .map_err(|e| DiscoveryError::Network(format!("Failed to bind UDP socket: {}", e)))?;

        socket
            .set_multicast_loop_v4(true)
            .map_err(|e| DiscoveryError::Network(format!("Failed to set multicast loop: {}", e)))?;

        Ok(Self {
            socket,
            buffer: vec![0; 2048],
        })
    }

    fn packet(&self, size: usize, source: SocketAddr) -> SsdpPacket {
        SsdpPacket {
            source,
            text: String::from_utf8_lossy(&self.buffer[..size]).into_owned(),
        }
    }
}

impl SsdpTransport for UdpSsdpTransport {
    fn send_search(&mut self, request: &str) -> Result<()> {
        self.socket
            .send_to(request.as_bytes(), SSDP_MULTICAST_ADDR)
            .map_err(|e| DiscoveryError::Network(format!("Failed to send M-SEARCH: {}", e)))?;
        Ok(())
    }

    fn recv(&mut self, timeout: Duration) -> Result<Option<SsdpPacket>> {
        // A zero read timeout is rejected by the OS
        let timeout = timeout.max(Duration::from_millis(1));
        self.socket
            .set_read_timeout(Some(timeout))
            .map_err(|e| DiscoveryError::Network(format!("Failed to set read timeout: {}", e)))?;

        match self.socket.recv_from(&mut self.buffer) {
            Ok((size, source)) => Ok(Some(self.packet(size, source))),
            Err(e) if e.kind() == ErrorKind::WouldBlock || e.kind() == ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(DiscoveryError::Network(format!("Socket error: {}", e))),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.socket
            .set_nonblocking(true)
            .map_err(|e| DiscoveryError::Network(format!("Failed to drain socket: {}", e)))?;

        let mut drained = 0usize;
        while let Ok((size, source)) = self.socket.recv_from(&mut self.buffer) {
            let stale = self.packet(size, source);
            tracing::trace!(source = %stale.source, "Discarding stale SSDP datagram");
            drained += 1;
        }
        if drained > 0 {
            tracing::debug!(drained, "Cleared stale SSDP datagrams");
        }

        self.socket
            .set_nonblocking(false)
            .map_err(|e| DiscoveryError::Network(format!("Failed to drain socket: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_bytes() {
        assert_eq!(
            search_request(1),
            "M-SEARCH * HTTP/1.1\r\nHOST: 239.255.255.250:1900\r\nMAN: \"ssdp:discover\"\r\nMX: 1\r\nST: urn:schemas-upnp-org:device:ZonePlayer:1\r\n\r\n"
        );
    }

    #[test]
    fn test_packet_header_lookup() {
        let packet = SsdpPacket {
            source: "192.168.1.10:1900".parse().unwrap(),
            text: "HTTP/1.1 200 OK\r\n\
                   location: http://192.168.1.10:1400/xml/device_description.xml\r\n\
                   USN: uuid:RINCON_A::urn:schemas-upnp-org:device:ZonePlayer:1\r\n\
                   \r\n"
                .to_string(),
        };

        assert_eq!(packet.header("usn"), Some("uuid:RINCON_A::urn:schemas-upnp-org:device:ZonePlayer:1"));
        assert_eq!(packet.header("LOCATION"), Some("http://192.168.1.10:1400/xml/device_description.xml"));
        assert_eq!(packet.header("SERVER"), None);
    }
}
