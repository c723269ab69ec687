//! Deterministic SSDP transport and clock for tests
//!
//! Time only moves when the simulated transport is asked to wait, so a test
//! can assert exactly how long discovery "took".

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::{Clock, Result, SsdpPacket, SsdpTransport};

/// Delay between a search and each scripted announcement
pub const ANNOUNCEMENT_DELAY: Duration = Duration::from_millis(20);

/// A clock that only advances when told to; clones share the same time
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset_nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_nanos: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset_nanos.fetch_add(by.as_nanos() as u64, Ordering::SeqCst);
    }

    /// Time advanced since creation
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.elapsed()
    }
}

/// Scripted SSDP network: announcements are queued per search attempt
#[derive(Debug)]
pub struct SimulatedSsdp {
    clock: ManualClock,
    windows: Vec<VecDeque<SsdpPacket>>,
    searches: usize,
    requests: Vec<String>,
}

impl SimulatedSsdp {
    pub fn new(clock: ManualClock) -> Self {
        Self {
            clock,
            windows: Vec::new(),
            searches: 0,
            requests: Vec::new(),
        }
    }

    /// Queue an announcement heard after the `attempt`-th search (1-based)
    pub fn announce(mut self, attempt: usize, source: SocketAddr, text: impl Into<String>) -> Self {
        let index = attempt.saturating_sub(1);
        if self.windows.len() <= index {
            self.windows.resize_with(index + 1, VecDeque::new);
        }
        self.windows[index].push_back(SsdpPacket {
            source,
            text: text.into(),
        });
        self
    }

    /// Number of searches sent so far
    pub fn searches(&self) -> usize {
        self.searches
    }

    /// Raw search requests in the order they were sent
    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl SsdpTransport for SimulatedSsdp {
    fn send_search(&mut self, request: &str) -> Result<()> {
        self.searches += 1;
        self.requests.push(request.to_string());
        Ok(())
    }

    fn recv(&mut self, timeout: Duration) -> Result<Option<SsdpPacket>> {
        let window = self.searches().checked_sub(1).and_then(|i| self.windows.get_mut(i));
        match window.and_then(VecDeque::pop_front) {
            Some(packet) => {
                self.clock.advance(ANNOUNCEMENT_DELAY.min(timeout));
                Ok(Some(packet))
            }
            None => {
                self.clock.advance(timeout);
                Ok(None)
            }
        }
    }
}

/// SSDP response text a Sonos player at `ip` would send
pub fn sonos_announcement(ip: &str, uid: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         CACHE-CONTROL: max-age = 1800\r\n\
         EXT:\r\n\
         LOCATION: http://{ip}:1400/xml/device_description.xml\r\n\
         SERVER: Linux UPnP/1.0 Sonos/70.3-35220 (ZPS9)\r\n\
         ST: urn:schemas-upnp-org:device:ZonePlayer:1\r\n\
         USN: uuid:{uid}::urn:schemas-upnp-org:device:ZonePlayer:1\r\n\
         \r\n"
    )
}
