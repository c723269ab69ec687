//! High-level device controller for Sonos operations

use std::fmt;

use soap_client::{HttpTransport, UreqTransport};

use crate::operations::{
    GetTransportInfoOperation, GetTransportInfoRequest, GetVolumeOperation, GetVolumeRequest, NextOperation,
    PauseOperation, PlayOperation, SetVolumeOperation, SetVolumeRequest, TransportRequest,
};
use crate::{ApiError, DeviceAddress, Result, SonosClient, TransportState, Volume};

/// Amount one volume press moves the volume
pub const VOLUME_STEP: i32 = 7;

/// Which command a playback toggle ended up sending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Play,
    Pause,
}

impl fmt::Display for PlaybackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackCommand::Play => f.write_str("Play"),
            PlaybackCommand::Pause => f.write_str("Pause"),
        }
    }
}

/// Playback and volume behaviors built from single UPnP actions
///
/// Each method talks to exactly the address it is given; resolving and
/// caching that address is the session's job.
#[derive(Debug, Clone, Default)]
pub struct ControlClient<T = UreqTransport> {
    client: SonosClient<T>,
}

impl ControlClient<UreqTransport> {
    pub fn new() -> Self {
        Self {
            client: SonosClient::new(),
        }
    }
}

impl<T: HttpTransport> ControlClient<T> {
    pub fn with_client(client: SonosClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SonosClient<T> {
        &self.client
    }

    /// Current AVTransport state of the device
    pub fn transport_state(&self, device: &DeviceAddress) -> Result<TransportState> {
        let response = self
            .client
            .execute::<GetTransportInfoOperation>(device, &GetTransportInfoRequest::default())?;
        Ok(response.current_transport_state)
    }

    /// Pause if the device is playing, otherwise play
    ///
    /// A failed state query counts as "not playing", so the device is asked
    /// to play; only the command's own result is reported.
    pub fn toggle_playback(&self, device: &DeviceAddress) -> Result<PlaybackCommand> {
        let playing = match self.transport_state(device) {
            Ok(state) => {
                tracing::debug!(%device, %state, "Current transport state");
                state.is_playing()
            }
            Err(e) => {
                tracing::warn!(%device, error = %e, "Transport state query failed, treating as stopped");
                false
            }
        };

        if playing {
            self.pause(device)?;
            Ok(PlaybackCommand::Pause)
        } else {
            self.play(device)?;
            Ok(PlaybackCommand::Play)
        }
    }

    pub fn play(&self, device: &DeviceAddress) -> Result<()> {
        self.client.execute::<PlayOperation>(device, &TransportRequest::default())
    }

    pub fn pause(&self, device: &DeviceAddress) -> Result<()> {
        self.client.execute::<PauseOperation>(device, &TransportRequest::default())
    }

    /// Skip to the next track
    pub fn next(&self, device: &DeviceAddress) -> Result<()> {
        self.client.execute::<NextOperation>(device, &TransportRequest::default())
    }

    /// Master volume of the device
    pub fn volume(&self, device: &DeviceAddress) -> Result<Volume> {
        let response = self
            .client
            .execute::<GetVolumeOperation>(device, &GetVolumeRequest::default())?;
        Ok(response.current_volume)
    }

    pub fn set_volume(&self, device: &DeviceAddress, volume: Volume) -> Result<()> {
        self.client
            .execute::<SetVolumeOperation>(device, &SetVolumeRequest::master(volume))
    }

    /// Move the master volume by `delta`, clamped to 0..=100
    ///
    /// If the current volume cannot be read, nothing is written and the
    /// failure is reported as [`ApiError::NetworkUnavailable`]. Returns the
    /// volume that was set.
    pub fn change_volume(&self, device: &DeviceAddress, delta: i32) -> Result<Volume> {
        let current = self.volume(device).map_err(|e| {
            tracing::warn!(%device, error = %e, "Could not read current volume");
            ApiError::NetworkUnavailable(format!("could not read current volume: {}", e))
        })?;

        let target = current.offset(delta);
        tracing::debug!(%device, from = %current, to = %target, "Changing volume");
        self.set_volume(device, target)?;
        Ok(target)
    }

    pub fn volume_up(&self, device: &DeviceAddress) -> Result<Volume> {
        self.change_volume(device, VOLUME_STEP)
    }

    pub fn volume_down(&self, device: &DeviceAddress) -> Result<Volume> {
        self.change_volume(device, -VOLUME_STEP)
    }
}
