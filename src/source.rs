use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::capture::{CaptureBackend, FrameStream};
use crate::device::{CameraDevice, CameraId};
use crate::display::FrameSink;
use crate::error::Error;
use crate::frame::VideoFrame;

/// Pause after a failed frame read before trying again
const CAPTURE_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Enumerates capture devices, tracks one selected device, and routes its
/// frames to the sink supplied at construction.
///
/// Frames are delivered on a dedicated capture thread, one at a time, as a
/// fire-and-forget notification. Selecting a different device stops the
/// previous routing completely before the new one starts.
pub struct CameraSource {
    backend: Box<dyn CaptureBackend>,
    sink: Arc<dyn FrameSink>,
    devices: Vec<CameraDevice>,
    selected: Option<CameraId>,
    worker: Option<CaptureWorker>,
}

impl CameraSource {
    /// Build a source over `backend`, delivering every captured frame to
    /// `sink`.
    ///
    /// Runs an initial device enumeration. No device is selected until
    /// `select_camera` succeeds.
    pub fn new(backend: Box<dyn CaptureBackend>, sink: Arc<dyn FrameSink>) -> Result<Self, Error> {
        let devices = backend
            .enumerate()
            .map_err(|cause| Error::Enumeration { cause })?;

        tracing::info!("Discovered {} capture device(s)", devices.len());

        Ok(Self {
            backend,
            sink,
            devices,
            selected: None,
            worker: None,
        })
    }

    /// Snapshot of the devices found by the most recent enumeration, in
    /// enumeration order. Does not touch the hardware; call
    /// `refresh_cameras` for a fresh query.
    pub fn available_cameras(&self) -> &[CameraDevice] {
        &self.devices
    }

    /// Re-run device enumeration and replace the snapshot.
    ///
    /// An already-running selection keeps streaming even if its device
    /// drops out of the new snapshot; only future `select_camera` calls
    /// validate against it.
    pub fn refresh_cameras(&mut self) -> Result<&[CameraDevice], Error> {
        self.devices = self
            .backend
            .enumerate()
            .map_err(|cause| Error::Enumeration { cause })?;

        tracing::debug!("Refreshed device list: {} device(s)", self.devices.len());
        Ok(&self.devices)
    }

    /// Id of the currently selected device, if any
    pub fn selected_camera(&self) -> Option<&CameraId> {
        self.selected.as_ref()
    }

    /// Select `id` and begin routing its frames to the sink.
    ///
    /// Stops routing from any previously selected device first. Returns
    /// `DeviceUnavailable` if `id` is not in the current snapshot, leaving
    /// the previous selection and its routing untouched. If the device is
    /// known but its stream cannot be opened, the previous routing is
    /// already stopped and the source is left with no selection.
    pub fn select_camera(&mut self, id: &CameraId) -> Result<(), Error> {
        let device = self
            .devices
            .iter()
            .find(|d| d.id() == id)
            .cloned()
            .ok_or_else(|| Error::DeviceUnavailable { id: id.clone() })?;

        self.stop_worker();
        self.selected = None;

        let stream = self
            .backend
            .open_stream(&device)
            .map_err(|cause| Error::Stream {
                id: id.clone(),
                cause,
            })?;

        tracing::info!("Selected camera {} ({})", device.id(), device.label());

        self.worker = Some(CaptureWorker::spawn(
            stream,
            device.id().clone(),
            Arc::clone(&self.sink),
        ));
        self.selected = Some(device.id().clone());

        Ok(())
    }

    fn stop_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop();
        }
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.stop_worker();
    }
}

struct CaptureWorker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl CaptureWorker {
    fn spawn(
        mut stream: Box<dyn FrameStream>,
        source_id: CameraId,
        sink: Arc<dyn FrameSink>,
    ) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = std::thread::spawn(move || {
            let started = Instant::now();
            let mut sequence = 0u64;

            while !stop_flag.load(Ordering::Relaxed) {
                match stream.next_frame() {
                    Ok(image) => {
                        sink.deliver_frame(VideoFrame {
                            sequence,
                            timestamp: started.elapsed(),
                            source: source_id.clone(),
                            image,
                        });
                        sequence += 1;
                    }
                    Err(err) => {
                        tracing::warn!("Frame capture from {} failed: {:#}", source_id, err);
                        std::thread::sleep(CAPTURE_RETRY_DELAY);
                    }
                }
            }

            tracing::debug!("Routing from {} stopped after {} frame(s)", source_id, sequence);
        });

        Self { stop, handle }
    }

    /// Signal the worker and wait for it to finish; no frame is delivered
    /// after this returns
    fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
    }
}
