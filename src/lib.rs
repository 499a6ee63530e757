//! Camera device inventory, runtime selection, and a renderable surface
//! for delivered frames.
//!
//! A [`CameraSource`] enumerates devices through a [`CaptureBackend`] and
//! routes frames from the selected device to a [`FrameSink`]. A
//! [`DisplayView`] owns the [`RenderLayer`] that typically plays the sink
//! role.

mod capture;
mod device;
mod display;
mod error;
mod frame;
mod source;

pub use capture::{CaptureBackend, FrameStream, TestPatternBackend, WebcamBackend};
pub use device::{CameraDevice, CameraId};
pub use display::{DisplayView, FrameSink, RenderLayer};
pub use error::Error;
pub use frame::VideoFrame;
pub use source::CameraSource;
