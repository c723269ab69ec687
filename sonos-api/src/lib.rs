//! High-level Sonos API for device control
//!
//! This crate provides typed SOAP operations for the handful of UPnP actions a
//! remote needs, a [`ControlClient`] that turns them into playback and volume
//! behaviors, and a [`TopologyResolver`] that finds one speaker's address by
//! asking any other speaker for the household topology.
//!
//! ```rust,no_run
//! use sonos_api::{ControlClient, DeviceAddress};
//!
//! let control = ControlClient::new();
//! let speaker: DeviceAddress = "192.168.1.100".parse()?;
//! control.toggle_playback(&speaker)?;
//! control.volume_up(&speaker)?;
//! # Ok::<(), sonos_api::ApiError>(())
//! ```

pub mod client;
pub mod controller;
pub mod error;
pub mod operation;
pub mod operations;
pub mod service;
pub mod topology;
pub mod types;

pub use client::SonosClient;
pub use controller::{ControlClient, PlaybackCommand, VOLUME_STEP};
pub use error::{status_code, ApiError, Result, CONNECT_FAILURE, STATUS_OK};
pub use operation::SonosOperation;
pub use service::{Service, ServiceInfo};
pub use topology::TopologyResolver;
pub use types::{DeviceAddress, DeviceIdentity, TransportState, Volume, DEFAULT_CONTROL_PORT};

pub use soap_client::{HttpTransport, UreqTransport};
