use crate::device::CameraId;

/// Errors from device enumeration, selection, and stream startup.
///
/// Frame-level capture errors never surface here; the capture worker
/// logs them and retries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested device is not in the current enumeration snapshot.
    /// Re-query with `refresh_cameras` if the topology may have changed.
    #[error("camera {id} is not in the current device list")]
    DeviceUnavailable { id: CameraId },

    #[error("device enumeration failed: {cause}")]
    Enumeration { cause: anyhow::Error },

    #[error("could not start streaming from camera {id}: {cause}")]
    Stream { id: CameraId, cause: anyhow::Error },
}
