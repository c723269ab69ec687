//! Value types shared by every layer of the remote

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::ApiError;

/// Port every Sonos player serves its UPnP control endpoints on
pub const DEFAULT_CONTROL_PORT: u16 = 1400;

/// Operator-configured identifier of the target player, e.g. `RINCON_000E58A0123456`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceIdentity(String);

impl DeviceIdentity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DeviceIdentity {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for DeviceIdentity {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Resolved control endpoint of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceAddress {
    ip: IpAddr,
    port: u16,
}

impl DeviceAddress {
    pub fn new(ip: IpAddr, port: u16) -> Self {
        Self { ip, port }
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Host part for a URL (IPv6 addresses are bracketed)
    pub fn host(&self) -> String {
        match self.ip {
            IpAddr::V4(v4) => v4.to_string(),
            IpAddr::V6(v6) => format!("[{}]", v6),
        }
    }
}

impl From<IpAddr> for DeviceAddress {
    fn from(ip: IpAddr) -> Self {
        Self::new(ip, DEFAULT_CONTROL_PORT)
    }
}

impl From<SocketAddr> for DeviceAddress {
    fn from(addr: SocketAddr) -> Self {
        Self::new(addr.ip(), addr.port())
    }
}

impl fmt::Display for DeviceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SocketAddr::new(self.ip, self.port))
    }
}

impl FromStr for DeviceAddress {
    type Err = ApiError;

    /// Accepts `ip:port` or a bare `ip` (default control port)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(addr) = s.parse::<SocketAddr>() {
            return Ok(addr.into());
        }
        s.parse::<IpAddr>()
            .map(DeviceAddress::from)
            .map_err(|_| ApiError::InvalidParameter(format!("'{}' is not a device address", s)))
    }
}

/// Speaker volume, always within 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Volume(u8);

impl Volume {
    pub const MIN: Volume = Volume(0);
    pub const MAX: Volume = Volume(100);

    /// `None` when `value` exceeds 100
    pub fn new(value: u8) -> Option<Self> {
        (value <= Self::MAX.0).then_some(Self(value))
    }

    /// Clamp any integer into range
    pub fn clamped(value: i32) -> Self {
        Self(value.clamp(0, i32::from(Self::MAX.0)) as u8)
    }

    /// This volume moved by `delta`, clamped into range
    pub fn offset(self, delta: i32) -> Self {
        Self::clamped(i32::from(self.0).saturating_add(delta))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Playback state reported by AVTransport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportState {
    Playing,
    PausedPlayback,
    Stopped,
    Transitioning,
    /// Anything else the device reports, kept verbatim
    Other(String),
}

impl TransportState {
    pub fn is_playing(&self) -> bool {
        matches!(self, TransportState::Playing)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransportState::Playing => "PLAYING",
            TransportState::PausedPlayback => "PAUSED_PLAYBACK",
            TransportState::Stopped => "STOPPED",
            TransportState::Transitioning => "TRANSITIONING",
            TransportState::Other(raw) => raw,
        }
    }
}

impl From<&str> for TransportState {
    fn from(raw: &str) -> Self {
        match raw {
            "PLAYING" => TransportState::Playing,
            "PAUSED_PLAYBACK" => TransportState::PausedPlayback,
            "STOPPED" => TransportState::Stopped,
            "TRANSITIONING" => TransportState::Transitioning,
            other => TransportState::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
