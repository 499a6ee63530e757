use anyhow::{Context, Result};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

use super::{CaptureBackend, FrameStream};
use crate::device::{CameraDevice, CameraId};

/// Capture backend over the host's webcams
#[derive(Debug, Default)]
pub struct WebcamBackend;

impl WebcamBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureBackend for WebcamBackend {
    fn enumerate(&self) -> Result<Vec<CameraDevice>> {
        let cameras = nokhwa::query(ApiBackend::Auto).context("Failed to query capture devices")?;

        tracing::debug!("Query found {} device(s)", cameras.len());

        Ok(cameras
            .into_iter()
            .map(|info| {
                CameraDevice::new(CameraId::new(info.index().to_string()), info.human_name())
            })
            .collect())
    }

    fn open_stream(&self, device: &CameraDevice) -> Result<Box<dyn FrameStream>> {
        Ok(Box::new(WebcamStream::open(device)?))
    }
}

pub struct WebcamStream {
    camera: Camera,
    width: u32,
    height: u32,
}

impl WebcamStream {
    fn open(device: &CameraDevice) -> Result<Self> {
        tracing::info!("Opening webcam {} ({})", device.id(), device.label());

        // Ids produced by enumerate() round-trip through Display, so a
        // numeric string is a numeric index
        let index = match device.id().as_str().parse::<u32>() {
            Ok(n) => CameraIndex::Index(n),
            Err(_) => CameraIndex::String(device.id().as_str().to_owned()),
        };
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera = Camera::new(index, requested).context("Failed to open camera")?;

        camera
            .open_stream()
            .context("Failed to open camera stream")?;

        let resolution = camera.resolution();
        tracing::info!(
            "Webcam streaming at {}x{}",
            resolution.width(),
            resolution.height()
        );

        Ok(Self {
            camera,
            width: resolution.width(),
            height: resolution.height(),
        })
    }
}

impl FrameStream for WebcamStream {
    fn next_frame(&mut self) -> Result<RgbImage> {
        let frame = self.camera.frame().context("Failed to capture frame")?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .context("Failed to decode frame")?;

        Ok(decoded)
    }

    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
