//! Thread-safe front end over a [`Session`]

use std::sync::Arc;

use parking_lot::Mutex;
use soap_client::{HttpTransport, UreqTransport};
use sonos_api::{DeviceAddress, STATUS_OK};
use sonos_discovery::{Discover, DiscoveryEngine};
use state_store::{JsonFileStore, KeyValueStore};

use crate::session::{DefaultSession, Session, SessionState};
use crate::{Action, ActionOutcome, RemoteConfig, Result};

/// A cloneable handle for dispatching actions from any thread
///
/// Every call holds the session lock for its whole duration, so at most one
/// discovery runs at a time and callers that arrive meanwhile reuse its result.
///
/// ```rust,no_run
/// use sonos_sdk::{Action, DefaultRemote, RemoteConfig};
///
/// let remote = DefaultRemote::from_config(&RemoteConfig::new("RINCON_000E58A0123456"))?;
/// let code = remote.run(Action::TogglePlayback);
/// std::process::exit(code);
/// # Ok::<(), sonos_sdk::SdkError>(())
/// ```
pub struct SonosRemote<D, S, T = UreqTransport> {
    session: Arc<Mutex<Session<D, S, T>>>,
}

impl<D, S, T> Clone for SonosRemote<D, S, T> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
        }
    }
}

/// Remote wiring used by real binaries
pub type DefaultRemote = SonosRemote<DiscoveryEngine, JsonFileStore, UreqTransport>;

impl DefaultRemote {
    /// Remote over the network and the configured cache file
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        Ok(SonosRemote::new(DefaultSession::from_config(config)?))
    }
}

impl<D: Discover, S: KeyValueStore, T: HttpTransport> SonosRemote<D, S, T> {
    pub fn new(session: Session<D, S, T>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    pub fn dispatch(&self, action: Action) -> Result<ActionOutcome> {
        self.session.lock().dispatch(action)
    }

    /// Dispatch and reduce the result to a status code (0 on success)
    pub fn run(&self, action: Action) -> i32 {
        match self.dispatch(action) {
            Ok(_) => STATUS_OK,
            Err(e) => e.status_code(),
        }
    }

    pub fn toggle_playback(&self) -> i32 {
        self.run(Action::TogglePlayback)
    }

    pub fn next(&self) -> i32 {
        self.run(Action::Next)
    }

    pub fn volume_up(&self) -> i32 {
        self.run(Action::VolumeUp)
    }

    pub fn volume_down(&self) -> i32 {
        self.run(Action::VolumeDown)
    }

    pub fn ensure_resolved(&self) -> Result<DeviceAddress> {
        self.session.lock().ensure_resolved()
    }

    pub fn forget(&self) -> Result<()> {
        self.session.lock().forget()
    }

    pub fn state(&self) -> SessionState {
        self.session.lock().state()
    }
}
