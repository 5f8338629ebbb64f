/// QrScan GUI -- egui-based desktop frontend.
///
/// This crate contains all UI code. Business logic lives in `qrscan-core`.
pub mod app;
pub mod icon;
pub mod panels;
pub mod platform;
pub mod state;
pub mod widgets;

pub use app::{QrScanApp, QrScanState, StartupOptions};
