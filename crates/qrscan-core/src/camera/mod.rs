/// Camera module -- capture capabilities and the session controller.
///
/// The controller owns the only capture handle. Capture and per-frame
/// decoding run on a background thread that owns the stream; lifecycle
/// events flow back to the UI thread over a crossbeam channel and are
/// applied in [`CameraController::poll`], once per frame.
pub mod controller;
#[cfg(feature = "camera")]
pub mod nokhwa_backend;
pub mod preview;

pub use controller::{CameraController, CameraState, EVENT_CHANNEL_CAPACITY};
#[cfg(feature = "camera")]
pub use nokhwa_backend::NokhwaBackend;
pub use preview::{PreviewFrame, PREVIEW_MAX_EDGE};

use crate::error::CameraError;
use crate::model::{CameraDevice, CaptureTarget};
use image::RgbImage;
use std::sync::Arc;

/// Access to the host's capture devices.
pub trait CameraBackend: Send + Sync {
    /// Enumerate capture devices. May be empty.
    fn list_devices(&self) -> Result<Vec<CameraDevice>, CameraError>;

    /// Open a stream on `target`.
    ///
    /// Called on the capture worker thread, so the returned stream does not
    /// need to be `Send`.
    fn open(&self, target: &CaptureTarget) -> Result<Box<dyn CaptureStream>, CameraError>;
}

/// An open capture stream. Exactly one exists at a time.
pub trait CaptureStream {
    /// Human-readable name of the device behind the stream.
    fn device_label(&self) -> String;

    /// Block until the next frame is available.
    fn next_frame(&mut self) -> Result<RgbImage, CameraError>;

    /// Release the device. Called once, when the worker exits.
    fn release(&mut self) -> Result<(), CameraError>;
}

/// Events reported by the capture worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraEvent {
    /// The stream is open and frames are being sampled.
    Started { device: String },
    /// A symbol was decoded. Sent at most once per `start`.
    Decoded(String),
    /// A non-fatal operational error (frame capture, decoder failure).
    /// Plain scan misses are never reported.
    TransientError(String),
    /// The stream could not be acquired. The session stays usable.
    AcquireFailed(CameraError),
    /// The worker released the stream and exited.
    Stopped,
}

/// Backend used when no camera support is compiled in.
///
/// Lists no devices and refuses every `open`, so camera mode reports a
/// normal acquisition failure instead of crashing.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableBackend;

impl CameraBackend for UnavailableBackend {
    fn list_devices(&self) -> Result<Vec<CameraDevice>, CameraError> {
        Ok(Vec::new())
    }

    fn open(&self, _target: &CaptureTarget) -> Result<Box<dyn CaptureStream>, CameraError> {
        Err(CameraError::Unavailable(
            "camera support is not compiled in (rebuild with --features camera)".into(),
        ))
    }
}

/// The best backend available in this build.
pub fn default_backend() -> Arc<dyn CameraBackend> {
    #[cfg(feature = "camera")]
    {
        Arc::new(NokhwaBackend::new())
    }
    #[cfg(not(feature = "camera"))]
    {
        Arc::new(UnavailableBackend)
    }
}
