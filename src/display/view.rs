use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::FrameSink;
use crate::frame::VideoFrame;

/// The renderable surface owned by a `DisplayView`.
///
/// Holds only the most recently enqueued frame; a renderer pulls
/// `latest()` at its own cadence and late frames simply replace earlier
/// ones. Implements `FrameSink`, so a layer can be handed straight to a
/// capture source.
pub struct RenderLayer {
    latest: Mutex<Option<VideoFrame>>,
    enqueued: AtomicU64,
}

impl RenderLayer {
    fn new() -> Self {
        Self {
            latest: Mutex::new(None),
            enqueued: AtomicU64::new(0),
        }
    }

    /// Accept a frame for display, replacing any pending frame
    pub fn enqueue(&self, frame: VideoFrame) {
        if let Ok(mut slot) = self.latest.lock() {
            *slot = Some(frame);
        }
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// The most recently enqueued frame, if any
    pub fn latest(&self) -> Option<VideoFrame> {
        self.latest.lock().ok().and_then(|slot| slot.clone())
    }

    /// Total frames enqueued over the layer's lifetime
    pub fn frames_enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Drop any pending frame without resetting the delivery count
    pub fn clear(&self) {
        if let Ok(mut slot) = self.latest.lock() {
            *slot = None;
        }
    }
}

impl FrameSink for RenderLayer {
    fn deliver_frame(&self, frame: VideoFrame) {
        self.enqueue(frame);
    }
}

/// A view exposing a single renderable surface for decoded video frames
pub struct DisplayView {
    layer: Arc<RenderLayer>,
}

impl DisplayView {
    pub fn new() -> Self {
        Self {
            layer: Arc::new(RenderLayer::new()),
        }
    }

    /// The view's one render layer; the same handle on every call
    pub fn render_layer(&self) -> Arc<RenderLayer> {
        Arc::clone(&self.layer)
    }
}

impl Default for DisplayView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use image::RgbImage;

    use super::*;
    use crate::device::CameraId;

    fn frame(sequence: u64) -> VideoFrame {
        VideoFrame {
            sequence,
            timestamp: Duration::from_millis(sequence * 33),
            source: CameraId::new("test"),
            image: RgbImage::new(4, 4),
        }
    }

    #[test]
    fn render_layer_is_the_same_handle_on_every_call() {
        let view = DisplayView::new();
        let a = view.render_layer();
        let b = view.render_layer();

        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn keeps_only_the_latest_frame() {
        let view = DisplayView::new();
        let layer = view.render_layer();

        layer.enqueue(frame(0));
        layer.enqueue(frame(1));
        layer.enqueue(frame(2));

        assert_eq!(layer.latest().unwrap().sequence, 2);
        assert_eq!(layer.frames_enqueued(), 3);
    }

    #[test]
    fn clear_empties_the_slot_but_not_the_count() {
        let view = DisplayView::new();
        let layer = view.render_layer();

        layer.enqueue(frame(0));
        layer.clear();

        assert!(layer.latest().is_none());
        assert_eq!(layer.frames_enqueued(), 1);
    }
}
