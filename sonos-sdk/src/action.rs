//! Actions a remote can dispatch

use std::fmt;

use soap_client::HttpTransport;
use sonos_api::{ControlClient, DeviceAddress, PlaybackCommand, Volume};

/// One button press worth of work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pause if playing, otherwise play
    TogglePlayback,
    /// Skip to the next track
    Next,
    VolumeUp,
    VolumeDown,
}

/// What an action did on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Played,
    Paused,
    Skipped,
    /// The volume that was written
    Volume(Volume),
}

impl Action {
    pub const ALL: [Action; 4] = [Action::TogglePlayback, Action::Next, Action::VolumeUp, Action::VolumeDown];

    pub fn name(&self) -> &'static str {
        match self {
            Action::TogglePlayback => "toggle",
            Action::Next => "next",
            Action::VolumeUp => "volume-up",
            Action::VolumeDown => "volume-down",
        }
    }

    /// Run this action against a resolved device
    pub fn invoke<T: HttpTransport>(
        &self,
        control: &ControlClient<T>,
        device: &DeviceAddress,
    ) -> sonos_api::Result<ActionOutcome> {
        match self {
            Action::TogglePlayback => Ok(match control.toggle_playback(device)? {
                PlaybackCommand::Play => ActionOutcome::Played,
                PlaybackCommand::Pause => ActionOutcome::Paused,
            }),
            Action::Next => control.next(device).map(|()| ActionOutcome::Skipped),
            Action::VolumeUp => control.volume_up(device).map(ActionOutcome::Volume),
            Action::VolumeDown => control.volume_down(device).map(ActionOutcome::Volume),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutcome::Played => f.write_str("playing"),
            ActionOutcome::Paused => f.write_str("paused"),
            ActionOutcome::Skipped => f.write_str("skipped to next track"),
            ActionOutcome::Volume(v) => write!(f, "volume {}", v),
        }
    }
}
