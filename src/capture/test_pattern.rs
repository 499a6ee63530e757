use std::time::Duration;

use anyhow::Result;
use image::{Rgb, RgbImage};

use super::{CaptureBackend, FrameStream};
use crate::device::{CameraDevice, CameraId};

// Classic color-bar sequence: white, yellow, cyan, green, magenta, red, blue
const BARS: [[u8; 3]; 7] = [
    [235, 235, 235],
    [235, 235, 16],
    [16, 235, 235],
    [16, 235, 16],
    [235, 16, 235],
    [235, 16, 16],
    [16, 16, 235],
];

/// Synthetic capture backend producing moving color bars.
///
/// Stands in for real hardware on machines without cameras; presents a
/// configurable number of fake devices so selection and switching can be
/// exercised end to end.
pub struct TestPatternBackend {
    devices: Vec<CameraDevice>,
    width: u32,
    height: u32,
    frame_interval: Duration,
}

impl TestPatternBackend {
    /// # Arguments
    /// * `device_count` - how many fake devices to present
    /// * `width`, `height` - produced frame dimensions
    /// * `fps` - pacing of the generated stream (must be non-zero)
    pub fn new(device_count: usize, width: u32, height: u32, fps: u32) -> Self {
        let devices = (0..device_count)
            .map(|n| {
                CameraDevice::new(
                    CameraId::new(format!("pattern-{n}")),
                    format!("Test pattern {n}"),
                )
            })
            .collect();

        Self {
            devices,
            width,
            height,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(fps.max(1))),
        }
    }
}

impl CaptureBackend for TestPatternBackend {
    fn enumerate(&self) -> Result<Vec<CameraDevice>> {
        Ok(self.devices.clone())
    }

    fn open_stream(&self, device: &CameraDevice) -> Result<Box<dyn FrameStream>> {
        tracing::debug!("Starting test pattern for {}", device.id());
        Ok(Box::new(TestPatternStream {
            width: self.width,
            height: self.height,
            frame_interval: self.frame_interval,
            tick: 0,
        }))
    }
}

struct TestPatternStream {
    width: u32,
    height: u32,
    frame_interval: Duration,
    tick: u64,
}

impl FrameStream for TestPatternStream {
    fn next_frame(&mut self) -> Result<RgbImage> {
        std::thread::sleep(self.frame_interval);

        let width = self.width.max(1);
        let shift = ((self.tick * 4) % u64::from(width)) as u32;
        let image = RgbImage::from_fn(self.width, self.height, |x, _y| {
            let bar = ((x + shift) % width) as usize * BARS.len() / width as usize;
            Rgb(BARS[bar.min(BARS.len() - 1)])
        });

        self.tick += 1;
        Ok(image)
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
