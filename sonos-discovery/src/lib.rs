//! Sonos player discovery by identity
//!
//! Finding one specific player takes two hops: an SSDP multicast search finds
//! *any* Sonos player, and that player's zone group topology says where the
//! target lives.
//!
//! # Quick Start
//!
//! ```no_run
//! use sonos_api::DeviceIdentity;
//! use sonos_discovery::{Discover, DiscoveryConfig, DiscoveryEngine};
//!
//! let mut engine = DiscoveryEngine::new(DiscoveryConfig::default())?;
//! match engine.discover(&DeviceIdentity::new("RINCON_000E58A0123456")) {
//!     Ok(address) => println!("Found player at {}", address),
//!     Err(e) => eprintln!("Discovery failed: {}", e),
//! }
//! # Ok::<(), sonos_discovery::DiscoveryError>(())
//! ```

mod discovery;
mod error;
pub mod ssdp;

#[cfg(any(test, feature = "test-support"))]
pub mod simulated;

pub use discovery::{Clock, Discover, DiscoveryConfig, DiscoveryEngine, SystemClock};
pub use error::{DiscoveryError, Result};
pub use ssdp::{SsdpPacket, SsdpTransport, UdpSsdpTransport};
