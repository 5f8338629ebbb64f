//! QrScan — desktop QR code scanner.
//!
//! Thin binary entry point. All logic lives in the `qrscan-core` and
//! `qrscan-gui` crates.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use qrscan_core::config::{self, ScannerConfig, DEFAULT_FPS, DEFAULT_REGION_OF_INTEREST};
use qrscan_core::model::ScanMode;
use qrscan_core::prefs::{FileStorage, PreferenceStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Scan QR codes from a camera or an image file.
#[derive(Debug, Parser)]
#[command(name = "QrScan", version, about)]
struct Cli {
    /// Directory holding the preference file.
    #[arg(long, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Camera frames sampled per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Edge of the square decode region in pixels.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_REGION_OF_INTEREST)]
    roi: u32,

    /// Start in this mode instead of the saved one.
    #[arg(long, value_name = "camera|file")]
    mode: Option<ScanMode>,

    /// Image to decode on startup. Implies file mode.
    #[arg(value_name = "IMAGE")]
    image: Option<PathBuf>,
}

/// Open the preference file, or fall back to memory when no config
/// directory can be resolved.
fn open_prefs(config_dir: Option<&std::path::Path>) -> PreferenceStore {
    match config::prefs_path(config_dir) {
        Some(path) => {
            tracing::info!("Preferences: {}", path.display());
            PreferenceStore::new(Arc::new(FileStorage::open(path)))
        }
        None => {
            tracing::warn!("No config directory available -- preferences will not be saved");
            PreferenceStore::in_memory()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging. RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("QrScan {} starting", env!("CARGO_PKG_VERSION"));

    let config = ScannerConfig {
        fps: cli.fps,
        region_of_interest: cli.roi,
    };
    if config.sanitized() != config {
        tracing::warn!(
            "Scanner settings adjusted from {:?} to {:?}",
            config,
            config.sanitized()
        );
    }

    let icon = qrscan_gui::icon::generate_icon(64);

    // Build application state *before* opening the window so device
    // enumeration and any startup decode are done by the first frame.
    let state = qrscan_gui::QrScanState::build(qrscan_gui::StartupOptions {
        prefs: open_prefs(cli.config_dir.as_deref()),
        config,
        mode: cli.mode,
        image: cli.image,
    });

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("QrScan -- QR Code Scanner")
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([480.0, 420.0])
            .with_icon(icon)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "QrScan",
        options,
        Box::new(|cc| Ok(Box::new(qrscan_gui::QrScanApp::with_state(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    tracing::info!("QrScan exiting");
    Ok(())
}
