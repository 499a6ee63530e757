//! End-to-end wiring: test pattern backend -> camera source -> render layer

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use viewfinder::{
    CameraDevice, CameraId, CameraSource, CaptureBackend, DisplayView, FrameSink, FrameStream,
    TestPatternBackend,
};

/// Poll until `pred` holds or the deadline passes
fn wait_for(pred: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if pred() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    pred()
}

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn frames_reach_the_display_layer() {
    let view = DisplayView::new();
    let layer = view.render_layer();

    let backend = Box::new(TestPatternBackend::new(1, 64, 48, 120));
    let mut source = CameraSource::new(backend, layer.clone() as Arc<dyn FrameSink>).unwrap();

    let id = source.available_cameras()[0].id().clone();
    source.select_camera(&id).unwrap();

    assert!(wait_for(|| layer.frames_enqueued() > 0, WAIT));

    let frame = layer.latest().unwrap();
    assert_eq!(frame.source, id);
    assert_eq!(frame.dimensions(), (64, 48));
}

#[test]
fn switching_cameras_switches_what_the_layer_shows() {
    let view = DisplayView::new();
    let layer = view.render_layer();

    let backend = Box::new(TestPatternBackend::new(2, 32, 24, 120));
    let mut source = CameraSource::new(backend, layer.clone() as Arc<dyn FrameSink>).unwrap();

    let first = source.available_cameras()[0].id().clone();
    let second = source.available_cameras()[1].id().clone();

    source.select_camera(&first).unwrap();
    assert!(wait_for(|| layer.frames_enqueued() > 0, WAIT));

    // The old routing is fully stopped before select_camera returns, so
    // every frame enqueued from here on belongs to the second device
    source.select_camera(&second).unwrap();
    let switched_at = layer.frames_enqueued();
    assert!(wait_for(|| layer.frames_enqueued() > switched_at + 1, WAIT));

    assert_eq!(layer.latest().unwrap().source, second);
}

#[test]
fn dropping_the_source_freezes_the_layer() {
    let view = DisplayView::new();
    let layer = view.render_layer();

    let backend = Box::new(TestPatternBackend::new(1, 32, 24, 120));
    let mut source = CameraSource::new(backend, layer.clone() as Arc<dyn FrameSink>).unwrap();

    let id = source.available_cameras()[0].id().clone();
    source.select_camera(&id).unwrap();
    assert!(wait_for(|| layer.frames_enqueued() > 0, WAIT));

    drop(source);
    let frozen_at = layer.frames_enqueued();
    std::thread::sleep(Duration::from_millis(100));

    assert_eq!(layer.frames_enqueued(), frozen_at);
}

/// Backend whose device topology can change between enumerations
struct VaryingBackend {
    devices: Arc<Mutex<Vec<CameraDevice>>>,
    inner: TestPatternBackend,
}

impl CaptureBackend for VaryingBackend {
    fn enumerate(&self) -> Result<Vec<CameraDevice>> {
        Ok(self.devices.lock().unwrap().clone())
    }

    fn open_stream(&self, device: &CameraDevice) -> Result<Box<dyn FrameStream>> {
        self.inner.open_stream(device)
    }
}

#[test]
fn refresh_picks_up_topology_changes_without_killing_the_selection() {
    let cam = |n: u32| CameraDevice::new(CameraId::new(format!("cam-{n}")), format!("Camera {n}"));
    let devices = Arc::new(Mutex::new(vec![cam(0), cam(1)]));

    let view = DisplayView::new();
    let layer = view.render_layer();
    let backend = Box::new(VaryingBackend {
        devices: Arc::clone(&devices),
        inner: TestPatternBackend::new(0, 32, 24, 120),
    });
    let mut source = CameraSource::new(backend, layer.clone() as Arc<dyn FrameSink>).unwrap();

    let selected = cam(0).id().clone();
    source.select_camera(&selected).unwrap();
    assert!(wait_for(|| layer.frames_enqueued() > 0, WAIT));

    // The selected device disappears; a new one shows up
    *devices.lock().unwrap() = vec![cam(1), cam(2)];
    let refreshed: Vec<_> = source.refresh_cameras().unwrap().to_vec();
    assert_eq!(refreshed.len(), 2);
    assert!(refreshed.iter().any(|d| d.id() == cam(2).id()));

    // Existing routing keeps going, but the gone device can no longer be
    // re-selected
    assert_eq!(source.selected_camera(), Some(&selected));
    let before = layer.frames_enqueued();
    assert!(wait_for(|| layer.frames_enqueued() > before, WAIT));

    assert!(source.select_camera(&selected).is_err());
    assert!(source.select_camera(cam(2).id()).is_ok());
}
