mod view;

pub use view::{DisplayView, RenderLayer};

use crate::frame::VideoFrame;

/// Trait for frame consumers fed by a capture source.
///
/// Called once per produced frame, from the capture thread. Delivery is
/// one-way; a sink that cannot keep up must drop frames itself.
pub trait FrameSink: Send + Sync {
    /// Accept one delivered frame
    fn deliver_frame(&self, frame: VideoFrame);
}
