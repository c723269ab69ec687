//! # Sonos remote SDK
//!
//! Drives one Sonos player, identified by its `RINCON_…` identity, from a
//! handful of buttons. The address of the player is discovered on first use,
//! cached across restarts, and rediscovered after any failed call.
//!
//! ```rust,no_run
//! use sonos_sdk::{logging, Action, DefaultRemote, RemoteConfig};
//!
//! fn main() -> Result<(), sonos_sdk::SdkError> {
//!     logging::init_logging(logging::LoggingMode::Development).ok();
//!
//!     let config = RemoteConfig::load(None)?.with_env();
//!     let remote = DefaultRemote::from_config(&config)?;
//!
//!     let outcome = remote.dispatch(Action::VolumeUp)?;
//!     println!("{}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! SonosRemote (Arc<Mutex<Session>>)
//!     ↓
//! Session (Unset | Cached(address), persisted in a KeyValueStore)
//!     ↓                         ↓
//! sonos-discovery           sonos-api ControlClient
//! (SSDP + topology)         (SOAP playback/volume)
//! ```

mod action;
pub mod config;
mod error;
pub mod logging;
mod remote;
pub mod session;

pub use action::{Action, ActionOutcome};
pub use config::{ConfigError, RemoteConfig};
pub use error::{Result, SdkError};
pub use remote::{DefaultRemote, SonosRemote};
pub use session::{DefaultSession, Session, SessionState, KEY_PLAYER_ADDRESS, KEY_PLAYER_UID};

pub use sonos_api::{DeviceAddress, DeviceIdentity, Volume, CONNECT_FAILURE, STATUS_OK};
