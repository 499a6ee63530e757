use std::time::Duration;

use image::RgbImage;

use crate::device::CameraId;

/// One decoded video frame delivered by a capture source.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// Position in the stream, starting at 0 for each new selection
    pub sequence: u64,
    /// Time since the stream started
    pub timestamp: Duration,
    /// Device that produced the frame
    pub source: CameraId,
    /// Decoded RGB pixels
    pub image: RgbImage,
}

impl VideoFrame {
    /// Get frame dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
