/// Host capabilities the session needs but does not implement itself:
/// an audible confirmation, a clipboard, and a way to open links.
///
/// Frontends inject real implementations; the defaults only log, which is
/// what headless tests and builds without those facilities get.
use tracing::{debug, info};

/// Plays the short "scan succeeded" confirmation.
pub trait AudioCue: Send {
    fn play_success(&self);
}

/// Writes text to the system clipboard.
pub trait ClipboardWriter: Send {
    fn write_text(&self, text: &str);
}

/// Opens a URL in the user's browser.
pub trait ExternalLinkOpener: Send {
    fn open_url(&self, url: &str);
}

/// Logs instead of playing a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play_success(&self) {
        debug!("Success cue (silent)");
    }
}

/// Logs instead of touching a clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl ClipboardWriter for NoClipboard {
    fn write_text(&self, text: &str) {
        info!("Clipboard unavailable; dropping {} byte(s)", text.len());
    }
}

/// Logs instead of opening a browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLinkOpener;

impl ExternalLinkOpener for NoLinkOpener {
    fn open_url(&self, url: &str) {
        info!("Link opener unavailable; not opening {}", url);
    }
}

/// The capability set injected into a [`super::ScanSession`].
pub struct Capabilities {
    pub audio: Box<dyn AudioCue>,
    pub clipboard: Box<dyn ClipboardWriter>,
    pub links: Box<dyn ExternalLinkOpener>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            audio: Box::new(SilentCue),
            clipboard: Box::new(NoClipboard),
            links: Box::new(NoLinkOpener),
        }
    }
}
