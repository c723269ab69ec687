//! The cached-address session
//!
//! A session owns the one piece of mutable state a remote has: where the
//! target player was last found. It is either unset or cached. A cached
//! address is used until a control call through it fails; the failing call is
//! reported, the address is dropped, and the next dispatch rediscovers.

use soap_client::{HttpTransport, UreqTransport};
use sonos_api::{ControlClient, DeviceAddress, DeviceIdentity, SonosClient, TopologyResolver};
use sonos_discovery::{Discover, DiscoveryEngine, SystemClock, UdpSsdpTransport};
use state_store::{JsonFileStore, KeyValueStore};

use crate::{Action, ActionOutcome, RemoteConfig, Result};

/// Store key of the last resolved address
pub const KEY_PLAYER_ADDRESS: &str = "playerAddress";

/// Store key of the identity the stored address belongs to
pub const KEY_PLAYER_UID: &str = "playerUid";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No trusted address; the next dispatch discovers first
    Unset,
    Cached(DeviceAddress),
}

/// Session wiring used by real remotes
pub type DefaultSession =
    Session<DiscoveryEngine<UdpSsdpTransport, SystemClock, UreqTransport>, JsonFileStore, UreqTransport>;

pub struct Session<D, S, T = UreqTransport> {
    identity: DeviceIdentity,
    state: SessionState,
    discovery: D,
    store: S,
    control: ControlClient<T>,
}

impl DefaultSession {
    /// Session over the network and the configured cache file
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        config.validate()?;

        let resolver = TopologyResolver::with_client(SonosClient::with_timeout(config.http_timeout));
        let discovery = DiscoveryEngine::with_parts(
            config.discovery_config(),
            UdpSsdpTransport::bind()?,
            SystemClock,
            resolver,
        );
        let control = ControlClient::with_client(SonosClient::with_timeout(config.http_timeout));
        let store = config.open_store()?;

        Ok(Session::open(config.identity(), discovery, store, control))
    }
}

impl<D: Discover, S: KeyValueStore, T: HttpTransport> Session<D, S, T> {
    /// Start a session, trusting the stored address only if it belongs to `identity`
    ///
    /// A stored address paired with a different identity is deleted.
    pub fn open(identity: DeviceIdentity, discovery: D, store: S, control: ControlClient<T>) -> Self {
        let state = load_state(&identity, &store);
        tracing::info!(%identity, state = ?state, "Session opened");
        Self {
            identity,
            state,
            discovery,
            store,
            control,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn discovery(&self) -> &D {
        &self.discovery
    }

    /// The cached address, discovering (and persisting) it first if unset
    pub fn ensure_resolved(&mut self) -> Result<DeviceAddress> {
        if let SessionState::Cached(address) = self.state {
            return Ok(address);
        }

        tracing::info!(identity = %self.identity, "No cached address, discovering");
        let address = self.discovery.discover(&self.identity).map_err(|e| {
            tracing::warn!(identity = %self.identity, error = %e, "Discovery failed");
            e
        })?;

        self.state = SessionState::Cached(address);
        self.persist(address);
        Ok(address)
    }

    /// Run `action` on the target, resolving it first if needed
    ///
    /// A failed action is not retried, but it drops the cached address.
    pub fn dispatch(&mut self, action: Action) -> Result<ActionOutcome> {
        let address = self.ensure_resolved()?;

        match action.invoke(&self.control, &address) {
            Ok(outcome) => {
                tracing::info!(%action, %address, %outcome, "Action completed");
                Ok(outcome)
            }
            Err(e) => {
                tracing::warn!(%action, %address, error = %e, "Action failed, invalidating cached address");
                self.invalidate();
                Err(e.into())
            }
        }
    }

    /// Forget the in-memory address; the stored pair is left alone
    pub fn invalidate(&mut self) {
        self.state = SessionState::Unset;
    }

    /// Drop the address both in memory and in the store
    pub fn forget(&mut self) -> Result<()> {
        self.invalidate();
        self.store.delete(KEY_PLAYER_ADDRESS)?;
        self.store.delete(KEY_PLAYER_UID)?;
        tracing::info!(identity = %self.identity, "Forgot cached session");
        Ok(())
    }

    fn persist(&self, address: DeviceAddress) {
        let written = self
            .store
            .set(KEY_PLAYER_ADDRESS, &address.to_string())
            .and_then(|()| self.store.set(KEY_PLAYER_UID, self.identity.as_str()));

        match written {
            Ok(()) => tracing::debug!(%address, identity = %self.identity, "Persisted session"),
            Err(e) => tracing::warn!(%address, error = %e, "Failed to persist session"),
        }
    }
}

fn load_state<S: KeyValueStore>(identity: &DeviceIdentity, store: &S) -> SessionState {
    let stored_uid = match store.get(KEY_PLAYER_UID) {
        Ok(uid) => uid,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read cached session");
            return SessionState::Unset;
        }
    };

    if stored_uid.as_deref() != Some(identity.as_str()) {
        if let Ok(Some(_)) = store.get(KEY_PLAYER_ADDRESS) {
            tracing::warn!(
                stored = ?stored_uid,
                configured = %identity,
                "Cached address belongs to another player, deleting it"
            );
            if let Err(e) = store.delete(KEY_PLAYER_ADDRESS) {
                tracing::warn!(error = %e, "Failed to delete stale cached address");
            }
        }
        return SessionState::Unset;
    }

    match store.get(KEY_PLAYER_ADDRESS) {
        Ok(Some(raw)) => match raw.parse::<DeviceAddress>() {
            Ok(address) => SessionState::Cached(address),
            Err(e) => {
                tracing::warn!(%raw, error = %e, "Ignoring unparsable cached address");
                SessionState::Unset
            }
        },
        Ok(None) => SessionState::Unset,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read cached address");
            SessionState::Unset
        }
    }
}
