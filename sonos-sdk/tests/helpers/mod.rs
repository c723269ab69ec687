//! Test helpers for session and remote tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use soap_client::mock::MockTransport;
use sonos_api::{ControlClient, DeviceAddress, DeviceIdentity, SonosClient};
use sonos_discovery::{Discover, DiscoveryError};

/// Discovery stand-in that replays scripted results and counts calls
#[derive(Clone, Default)]
pub struct ScriptedDiscover {
    results: Arc<Mutex<VecDeque<Result<DeviceAddress, DiscoveryError>>>>,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl ScriptedDiscover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finds(self, address: &str) -> Self {
        self.push(Ok(address.parse().unwrap()))
    }

    pub fn fails(self, error: DiscoveryError) -> Self {
        self.push(Err(error))
    }

    /// Make every discovery take `delay` of wall time
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(self, result: Result<DeviceAddress, DiscoveryError>) -> Self {
        self.results.lock().unwrap().push_back(result);
        self
    }
}

impl Discover for ScriptedDiscover {
    fn discover(&mut self, _identity: &DeviceIdentity) -> Result<DeviceAddress, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(DiscoveryError::Exhausted { attempts: 4 }))
    }
}

/// A control client over a scripted transport, plus a handle to that transport
pub fn mock_control() -> (ControlClient<Arc<MockTransport>>, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let control = ControlClient::with_client(SonosClient::with_transport(Arc::clone(&transport)));
    (control, transport)
}

/// GetZoneGroupState response listing RINCON_A and RINCON_B
pub fn topology_body() -> String {
    let inner = concat!(
        "<ZoneGroups><ZoneGroup Coordinator=\"RINCON_A\">",
        "<ZoneGroupMember UUID=\"RINCON_A\" Location=\"http://192.168.1.10:1400/xml/device_description.xml\"/>",
        "<ZoneGroupMember UUID=\"RINCON_B\" Location=\"http://192.168.1.11:1400/xml/device_description.xml\"/>",
        "</ZoneGroup></ZoneGroups>"
    );
    let escaped = inner.replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;");
    format!(
        "<s:Envelope><s:Body><u:GetZoneGroupStateResponse><ZoneGroupState>{}</ZoneGroupState>\
         </u:GetZoneGroupStateResponse></s:Body></s:Envelope>",
        escaped
    )
}
