//! Core discovery logic.
//!
//! Discovery runs in two steps:
//! 1. Multicast an M-SEARCH for zone players, up to `attempts` times, and take
//!    the first Sonos announcement as the responder
//! 2. Ask that responder for the household topology and look the target
//!    identity up in it

use std::net::IpAddr;
use std::time::{Duration, Instant};

use soap_client::{HttpTransport, UreqTransport};
use sonos_api::{DeviceAddress, DeviceIdentity, TopologyResolver, DEFAULT_CONTROL_PORT};

use crate::error::{DiscoveryError, Result};
use crate::ssdp::{search_request, SsdpPacket, SsdpTransport, UdpSsdpTransport};

/// Source of the current time for attempt windows
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Anything that can turn a device identity into a control address
pub trait Discover {
    fn discover(&mut self, identity: &DeviceIdentity) -> Result<DeviceAddress>;
}

/// Tunables for the search loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Number of M-SEARCH requests sent before giving up
    pub attempts: u32,
    /// How long each search listens for announcements
    pub interval: Duration,
    /// Substring an announcement must contain to count as a Sonos player
    pub vendor_marker: String,
    /// Port the topology query is sent to on the responder
    pub control_port: u16,
    /// MX value of the search request
    pub mx: u8,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            attempts: 4,
            interval: Duration::from_millis(250),
            vendor_marker: "Sonos".to_string(),
            control_port: DEFAULT_CONTROL_PORT,
            mx: 1,
        }
    }
}

/// Finds one player by identity: SSDP for any responder, then topology lookup
///
/// ```no_run
/// use sonos_api::DeviceIdentity;
/// use sonos_discovery::{Discover, DiscoveryConfig, DiscoveryEngine};
///
/// let mut engine = DiscoveryEngine::new(DiscoveryConfig::default())?;
/// let address = engine.discover(&DeviceIdentity::new("RINCON_000E58A0123456"))?;
/// println!("player is at {}", address);
/// # Ok::<(), sonos_discovery::DiscoveryError>(())
/// ```
pub struct DiscoveryEngine<S = UdpSsdpTransport, C = SystemClock, T = UreqTransport> {
    config: DiscoveryConfig,
    transport: S,
    clock: C,
    resolver: TopologyResolver<T>,
}

impl DiscoveryEngine<UdpSsdpTransport, SystemClock, UreqTransport> {
    /// Engine over a fresh UDP socket, the system clock and default HTTP timeouts
    pub fn new(config: DiscoveryConfig) -> Result<Self> {
        Ok(Self::with_parts(
            config,
            UdpSsdpTransport::bind()?,
            SystemClock,
            TopologyResolver::new(),
        ))
    }
}

impl<S: SsdpTransport, C: Clock, T: HttpTransport> DiscoveryEngine<S, C, T> {
    pub fn with_parts(config: DiscoveryConfig, transport: S, clock: C, resolver: TopologyResolver<T>) -> Self {
        Self {
            config,
            transport,
            clock,
            resolver,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn transport(&self) -> &S {
        &self.transport
    }

    /// Search until a Sonos player announces itself; returns its IP
    ///
    /// The first announcement wins. The rest of its attempt window is still
    /// drained so later announcements are logged as duplicates, and no further
    /// searches are sent.
    pub fn find_responder(&mut self) -> Result<IpAddr> {
        let request = search_request(self.config.mx);
        self.transport.clear()?;

        let mut responder: Option<IpAddr> = None;
        for attempt in 1..=self.config.attempts {
            tracing::debug!(attempt, attempts = self.config.attempts, "Sending M-SEARCH");
            self.transport.send_search(&request)?;

            let deadline = self.clock.now() + self.config.interval;
            loop {
                let now = self.clock.now();
                if now >= deadline {
                    break;
                }
                if let Some(packet) = self.transport.recv(deadline - now)? {
                    self.observe(packet, &mut responder);
                }
            }

            if let Some(ip) = responder {
                return Ok(ip);
            }
        }

        tracing::warn!(attempts = self.config.attempts, "No Sonos player answered discovery");
        Err(DiscoveryError::Exhausted {
            attempts: self.config.attempts,
        })
    }

    fn observe(&self, packet: SsdpPacket, responder: &mut Option<IpAddr>) {
        if !packet.text.contains(&self.config.vendor_marker) {
            tracing::trace!(source = %packet.source, "Ignoring non-Sonos SSDP response");
            return;
        }

        let usn = packet.header("USN");
        match responder {
            None => {
                tracing::info!(source = %packet.source, usn = ?usn, "Sonos player answered discovery");
                *responder = Some(packet.source.ip());
            }
            Some(first) => {
                tracing::debug!(source = %packet.source, first = %first, usn = ?usn, "Duplicate announcement");
            }
        }
    }
}

impl<S: SsdpTransport, C: Clock, T: HttpTransport> Discover for DiscoveryEngine<S, C, T> {
    fn discover(&mut self, identity: &DeviceIdentity) -> Result<DeviceAddress> {
        let ip = self.find_responder()?;
        let responder = DeviceAddress::new(ip, self.config.control_port);

        let address = self.resolver.resolve(&responder, identity).map_err(|e| {
            tracing::warn!(%identity, %responder, error = %e, "Topology lookup failed");
            DiscoveryError::from(e)
        })?;

        tracing::info!(%identity, %address, "Discovered player");
        Ok(address)
    }
}
