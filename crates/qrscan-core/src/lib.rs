/// QrScan Core -- scan-session lifecycle, result classification, and
/// preference persistence.
///
/// This crate contains all business logic with zero UI dependencies.
/// QR symbol decoding and camera capture sit behind capability traits so
/// any frontend (GUI, CLI, tests) can drive the same session.
///
/// # Modules
///
/// - [`model`] -- Scan modes, camera devices, results, and user notices.
/// - [`classify`] -- URL vs plain-text classification of decoded text.
/// - [`prefs`] -- Best-effort key-value preference store.
/// - [`decode`] -- One-shot image decoding through a [`decode::QrDecoder`].
/// - [`camera`] -- Camera capture lifecycle on a background worker thread.
/// - [`session`] -- The scan session orchestrator tying everything together.
/// - [`config`] -- Sampling parameters and preference-file location.
/// - [`error`] -- Typed errors for the fallible capabilities.
pub mod camera;
pub mod classify;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod prefs;
pub mod session;
