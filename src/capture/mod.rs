mod test_pattern;
mod webcam;

pub use test_pattern::TestPatternBackend;
pub use webcam::WebcamBackend;

use anyhow::Result;
use image::RgbImage;

use crate::device::CameraDevice;

/// Trait for platform capture backends
pub trait CaptureBackend: Send {
    /// Enumerate the devices currently visible to this backend.
    /// Order follows the backend's discovery order; re-querying may
    /// return a different set.
    fn enumerate(&self) -> Result<Vec<CameraDevice>>;

    /// Open a running frame stream on one device
    fn open_stream(&self, device: &CameraDevice) -> Result<Box<dyn FrameStream>>;
}

/// Trait for an open frame stream
pub trait FrameStream: Send {
    /// Block until the next frame is produced
    fn next_frame(&mut self) -> Result<RgbImage>;

    /// Get the resolution of produced frames
    fn resolution(&self) -> (u32, u32);
}
