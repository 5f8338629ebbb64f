/// Scan session orchestrator.
///
/// Owns the [`SessionState`] and every component that mutates it: the
/// camera controller, the image pipeline, the preference store and the
/// injected host capabilities. Frontends call the operations here and read
/// state back; nothing else changes the state.
///
/// Component failures stop at this boundary. Each one becomes either a log
/// line or exactly one [`Notice`], and the state always settles on a
/// well-defined value: camera idle, the "no result" sentinel, or a
/// classified result.
pub mod capabilities;

pub use capabilities::{
    AudioCue, Capabilities, ClipboardWriter, ExternalLinkOpener, NoClipboard, NoLinkOpener,
    SilentCue,
};

use crate::camera::{CameraBackend, CameraController, CameraEvent, CameraState, PreviewFrame};
use crate::config::ScannerConfig;
use crate::decode::{decode_image, QrDecoder};
use crate::model::{
    CameraDevice, CaptureTarget, InputPayload, Notice, PayloadSource, ResultKind, ScanMode,
    ScanResult,
};
use crate::prefs::{PreferenceStore, KEY_CAMERA_ID, KEY_LAST_RESULT, KEY_SCAN_MODE};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Notice shown when an image holds no readable symbol.
pub const NO_QR_IN_IMAGE: &str = "No QR code found in this image or the image is unreadable.";

/// Maximum undelivered notices kept. Older ones are dropped first.
const MAX_PENDING_NOTICES: usize = 16;

/// The observable state of the scanner view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub mode: ScanMode,
    /// True while the camera is Starting or Running. Only ever true in
    /// [`ScanMode::Camera`].
    pub camera_active: bool,
    /// True while an external drag hovers over the window.
    pub drag_active: bool,
    pub last_result: ScanResult,
}

/// One scanner view.
pub struct ScanSession {
    state: SessionState,
    camera: CameraController,
    decoder: Arc<dyn QrDecoder>,
    prefs: PreferenceStore,
    caps: Capabilities,
    devices: Vec<CameraDevice>,
    selected_camera: Option<String>,
    notices: Vec<Notice>,
}

impl ScanSession {
    /// Build a session, restoring the persisted mode and camera choice.
    ///
    /// The result always starts at the "no result" sentinel.
    pub fn new(
        prefs: PreferenceStore,
        backend: Arc<dyn CameraBackend>,
        decoder: Arc<dyn QrDecoder>,
        config: ScannerConfig,
        caps: Capabilities,
    ) -> Self {
        let mode = prefs.get(KEY_SCAN_MODE, ScanMode::default());
        let selected_camera: Option<String> = prefs.get(KEY_CAMERA_ID, None);
        let camera = CameraController::new(backend, Arc::clone(&decoder), config);

        let mut session = Self {
            state: SessionState {
                mode,
                camera_active: false,
                drag_active: false,
                last_result: ScanResult::none(),
            },
            camera,
            decoder,
            prefs,
            caps,
            devices: Vec::new(),
            selected_camera,
            notices: Vec::new(),
        };
        session.refresh_devices();
        info!("Scan session ready in {} mode", mode);
        session
    }

    // ── Accessors ──────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn mode(&self) -> ScanMode {
        self.state.mode
    }

    pub fn last_result(&self) -> &ScanResult {
        &self.state.last_result
    }

    pub fn camera_state(&self) -> CameraState {
        self.camera.state()
    }

    pub fn camera_device_label(&self) -> Option<&str> {
        self.camera.device_label()
    }

    pub fn config(&self) -> ScannerConfig {
        self.camera.config()
    }

    pub fn devices(&self) -> &[CameraDevice] {
        &self.devices
    }

    /// The device the user picked, if any.
    pub fn selected_camera(&self) -> Option<&str> {
        self.selected_camera.as_deref()
    }

    /// The last successful decode persisted by any previous session.
    pub fn saved_last_result(&self) -> Option<String> {
        self.prefs.get(KEY_LAST_RESULT, None)
    }

    /// Drain notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Latest camera preview frame, if a new one arrived.
    pub fn take_camera_preview(&mut self) -> Option<PreviewFrame> {
        self.camera.take_preview()
    }

    // ── Mode ───────────────────────────────────────────────

    /// Switch input mode.
    ///
    /// The camera is fully released before the new mode is persisted. The
    /// result resets to the sentinel.
    pub fn set_mode(&mut self, mode: ScanMode) {
        if self.state.camera_active || self.camera.is_active() {
            self.stop_camera();
        }
        info!("Scan mode: {} -> {}", self.state.mode, mode);
        self.state.mode = mode;
        self.reset_result();
        self.prefs.set(KEY_SCAN_MODE, &mode);
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.state.drag_active = active;
    }

    // ── Camera ─────────────────────────────────────────────

    /// Re-enumerate capture devices. Failures are logged and leave the list
    /// empty; starting then falls back to the facing-mode hint.
    pub fn refresh_devices(&mut self) {
        match self.camera.list_devices() {
            Ok(devices) => {
                debug!("Found {} camera(s)", devices.len());
                self.devices = devices;
            }
            Err(e) => {
                warn!("Error getting cameras: {}", e);
                self.devices.clear();
            }
        }
    }

    /// Remember a device choice across sessions. `None` restores automatic
    /// selection.
    pub fn select_camera(&mut self, id: Option<String>) {
        self.prefs.set(KEY_CAMERA_ID, &id);
        self.selected_camera = id;
    }

    /// The target the next `start_camera` will open.
    pub fn capture_target(&self) -> CaptureTarget {
        match &self.selected_camera {
            Some(id) if self.devices.iter().any(|d| &d.id == id) => {
                CaptureTarget::Device(id.clone())
            }
            _ => CaptureTarget::preferred(&self.devices),
        }
    }

    /// Start (or restart) the camera. Only valid in camera mode.
    ///
    /// Returns `false` when the capture could not even be launched; an
    /// asynchronous acquisition failure arrives later through
    /// [`process_camera_events`](Self::process_camera_events).
    pub fn start_camera(&mut self) -> bool {
        if self.state.mode != ScanMode::Camera {
            warn!("Ignoring camera start in {} mode", self.state.mode);
            return false;
        }
        self.reset_result();
        self.refresh_devices();
        let target = self.capture_target();
        match self.camera.start(target) {
            Ok(()) => {
                self.state.camera_active = true;
                true
            }
            Err(e) => {
                warn!("Error starting camera scanner: {}", e);
                self.state.camera_active = false;
                self.push_notice(Notice::error(format!("Could not start camera: {e}")));
                false
            }
        }
    }

    /// Stop the camera. Idempotent.
    pub fn stop_camera(&mut self) {
        self.camera.stop();
        self.state.camera_active = false;
    }

    /// Apply camera events. Call once per frame.
    ///
    /// Returns `true` when anything changed and the view should repaint.
    pub fn process_camera_events(&mut self) -> bool {
        let events = self.camera.poll();
        let changed = !events.is_empty();
        for event in events {
            match event {
                CameraEvent::Started { device } => debug!("Camera started: {}", device),
                CameraEvent::Decoded(text) => self.on_camera_decoded(text),
                CameraEvent::TransientError(message) => debug!("Camera: {}", message),
                CameraEvent::AcquireFailed(e) => {
                    self.push_notice(Notice::error(format!("Could not start camera: {e}")));
                }
                CameraEvent::Stopped => debug!("Camera worker stopped"),
            }
        }
        self.state.camera_active = self.camera.is_active();
        changed
    }

    /// Record a camera decode. The controller has already released the
    /// device.
    pub fn on_camera_decoded(&mut self, text: String) {
        self.state.camera_active = self.camera.is_active();
        self.record_success(ScanResult::success(text));
    }

    // ── Images ─────────────────────────────────────────────

    /// Decode an encoded image.
    ///
    /// Stops the camera first. On failure exactly one notice is raised and
    /// the result stays at the sentinel.
    pub fn submit_image(&mut self, bytes: &[u8]) -> bool {
        if self.state.camera_active || self.camera.is_active() {
            self.stop_camera();
        }
        self.reset_result();

        let result = decode_image(bytes, self.decoder.as_ref());
        if result.is_success {
            self.record_success(result);
            true
        } else {
            self.push_notice(Notice::warning(NO_QR_IN_IMAGE));
            false
        }
    }

    /// Drop, paste or file-picker entry point. Only image payloads are
    /// decoded; anything else raises one notice and changes nothing else.
    pub fn submit_payload(&mut self, payload: InputPayload) -> bool {
        self.state.drag_active = false;
        if !payload.is_image() {
            info!("Rejected non-image payload: {}", payload.display_name());
            let message = match payload.source {
                PayloadSource::Drop => "Please drop an image file.",
                PayloadSource::Paste => "Please paste an image.",
                PayloadSource::FilePicker => "Please select an image file.",
            };
            self.push_notice(Notice::warning(message));
            return false;
        }
        info!("Decoding image: {}", payload.display_name());
        self.submit_image(&payload.bytes)
    }

    // ── Result actions ─────────────────────────────────────

    /// Copy the current result to the clipboard. `false` when there is none.
    pub fn copy_result(&self) -> bool {
        match self.state.last_result.text() {
            Some(text) => {
                self.caps.clipboard.write_text(text);
                true
            }
            None => false,
        }
    }

    /// Open the current result in the browser. Only URLs are opened.
    pub fn open_result(&self) -> bool {
        match (self.state.last_result.kind, self.state.last_result.text()) {
            (ResultKind::Url, Some(url)) => {
                self.caps.links.open_url(url);
                true
            }
            _ => false,
        }
    }

    /// Tear the view down: release the camera.
    pub fn shutdown(&mut self) {
        self.stop_camera();
    }

    // ── Internals ──────────────────────────────────────────

    fn reset_result(&mut self) {
        self.state.last_result = ScanResult::none();
    }

    fn record_success(&mut self, result: ScanResult) {
        if let Some(text) = result.text() {
            self.prefs.set(KEY_LAST_RESULT, text);
        }
        self.caps.audio.play_success();
        self.state.last_result = result;
    }

    fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() >= MAX_PENDING_NOTICES {
            self.notices.remove(0);
        }
        self.notices.push(notice);
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
