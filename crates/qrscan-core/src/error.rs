/// Error types for the capability boundaries.
///
/// None of these ever escape [`crate::session::ScanSession`]: the session
/// turns them into log lines or a single user notice.
use thiserror::Error;

/// Failures raised by a camera backend or the capture worker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    /// No capture device could be found or the backend is not compiled in.
    #[error("no camera available: {0}")]
    Unavailable(String),
    /// The stream was opened but could not be started or configured.
    #[error("failed to open camera stream: {0}")]
    Stream(String),
    /// A single frame could not be captured or converted.
    #[error("frame capture failed: {0}")]
    Frame(String),
    /// Device enumeration failed.
    #[error("failed to list cameras: {0}")]
    Enumerate(String),
    /// The capture worker thread could not be spawned.
    #[error("failed to spawn capture worker: {0}")]
    Worker(String),
    /// Releasing the stream failed. Logged only.
    #[error("failed to release camera: {0}")]
    Release(String),
}

/// Failures of the one-shot image decode pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The bytes are not an image the `image` crate can rasterize.
    #[error("image is unreadable: {0}")]
    Unreadable(String),
    /// The image was rasterized but holds no decodable QR symbol.
    #[error("no QR code found")]
    NotFound,
    /// A symbol was located but the decoder rejected it.
    #[error("QR decoder error: {0}")]
    Decoder(String),
}

/// Failures of the persistent key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
