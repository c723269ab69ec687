//! RenderingControl service operations

mod get_volume;
mod set_volume;

pub use get_volume::{GetVolumeOperation, GetVolumeRequest, GetVolumeResponse};
pub use set_volume::{SetVolumeOperation, SetVolumeRequest};

/// Channel every volume action targets
pub const MASTER_CHANNEL: &str = "Master";
