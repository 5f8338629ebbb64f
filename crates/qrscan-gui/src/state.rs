/// Application state management.
///
/// Wraps the [`ScanSession`] with the bits of state only the window needs:
/// the on-screen notice list, the pending camera preview, and the text in
/// the path field. Camera events are applied in [`AppState::process_frame`],
/// which runs once per frame.
use crate::platform::RequestQueue;
use qrscan_core::camera::PreviewFrame;
use qrscan_core::model::{InputPayload, Notice, PayloadSource, ScanMode};
use qrscan_core::session::ScanSession;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Seconds a notice stays on screen.
pub const NOTICE_TTL_SECS: i64 = 6;

/// Maximum notices shown at once. Older ones are dropped first.
pub const MAX_VISIBLE_NOTICES: usize = 4;

/// All application state.
pub struct AppState {
    // ── Session ────────────────────────────────────────
    pub session: ScanSession,
    /// Clipboard and link requests queued by the session's capabilities.
    pub requests: RequestQueue,

    // ── Camera preview ─────────────────────────────────
    /// Latest frame not yet uploaded to the GPU.
    pub pending_preview: Option<PreviewFrame>,
    /// Uploaded preview texture.
    pub preview_texture: Option<egui::TextureHandle>,
    /// Region-of-interest guide of the most recent frame.
    pub preview_roi: (f32, f32),

    // ── File input ─────────────────────────────────────
    pub path_input: String,

    // ── Notices ────────────────────────────────────────
    pub notices: Vec<Notice>,

    // ── UI state ───────────────────────────────────────
    pub show_about: bool,
    /// `true` = dark mode (default), `false` = light mode.
    pub dark_mode: bool,
}

impl AppState {
    pub fn new(session: ScanSession, requests: RequestQueue) -> Self {
        Self {
            session,
            requests,
            pending_preview: None,
            preview_texture: None,
            preview_roi: (0.0, 0.0),
            path_input: String::new(),
            notices: Vec::new(),
            show_about: false,
            dark_mode: true,
        }
    }

    /// Apply background camera events and collect new notices. Called once
    /// per frame.
    ///
    /// Returns `true` if the UI should repaint.
    pub fn process_frame(&mut self) -> bool {
        let mut repaint = self.session.process_camera_events();

        if let Some(frame) = self.session.take_camera_preview() {
            self.preview_roi = frame.roi_fraction;
            self.pending_preview = Some(frame);
            repaint = true;
        }
        if !self.session.state().camera_active {
            self.pending_preview = None;
        }

        let fresh = self.session.take_notices();
        if !fresh.is_empty() {
            repaint = true;
            for notice in fresh {
                self.push_notice(notice);
            }
        }
        self.expire_notices(chrono::Local::now());
        repaint
    }

    /// Whether clipboard or link requests are waiting for the next frame.
    pub fn has_pending_requests(&self) -> bool {
        !self.requests.lock().is_empty()
    }

    // ── Mode & camera ──────────────────────────────────

    pub fn switch_mode(&mut self, mode: ScanMode) {
        if self.session.mode() == mode {
            return;
        }
        self.session.set_mode(mode);
        self.clear_preview();
    }

    pub fn start_camera(&mut self) {
        self.clear_preview();
        self.session.start_camera();
    }

    pub fn stop_camera(&mut self) {
        self.session.stop_camera();
        self.clear_preview();
    }

    /// Pick a capture device. A running camera restarts on the new device.
    pub fn select_camera(&mut self, id: Option<String>) {
        if self.session.selected_camera() == id.as_deref() {
            return;
        }
        self.session.select_camera(id);
        if self.session.state().camera_active {
            self.start_camera();
        }
    }

    fn clear_preview(&mut self) {
        self.pending_preview = None;
        self.preview_texture = None;
    }

    // ── Image input ────────────────────────────────────

    /// Decode the image named in the path field.
    pub fn load_path_input(&mut self) {
        let text = self.path_input.trim().to_string();
        if text.is_empty() {
            self.push_notice(Notice::warning("Please select an image file."));
            return;
        }
        self.load_file(Path::new(&text), PayloadSource::FilePicker);
    }

    /// Read and decode an image file.
    pub fn load_file(&mut self, path: &Path, source: PayloadSource) {
        match InputPayload::from_file(source, path) {
            Ok(payload) => self.submit(payload),
            Err(e) => {
                self.push_notice(Notice::error(format!(
                    "Could not read {}: {}",
                    path.display(),
                    e
                )));
            }
        }
    }

    /// Files dropped onto the window. Only the first one is decoded.
    pub fn drop_files(&mut self, files: &[egui::DroppedFile]) {
        self.session.set_drag_active(false);
        let Some(file) = files.first() else {
            return;
        };
        if files.len() > 1 {
            debug!("{} files dropped, decoding the first", files.len());
        }
        match payload_from_dropped(file) {
            Ok(payload) => self.submit(payload),
            Err(e) => self.push_notice(Notice::error(e)),
        }
    }

    /// Text pasted while no text field had focus.
    ///
    /// egui delivers clipboard pastes as text only, so a pasted path to an
    /// existing file is treated as that file; anything else is rejected as
    /// a non-image payload.
    pub fn paste_text(&mut self, text: &str) {
        let candidate = PathBuf::from(text.trim().trim_matches('"'));
        if candidate.is_file() {
            self.load_file(&candidate, PayloadSource::Paste);
            return;
        }
        let payload = InputPayload::new(PayloadSource::Paste, text.as_bytes().to_vec())
            .with_mime("text/plain");
        self.submit(payload);
    }

    /// Image input switches the view to file mode before decoding.
    fn submit(&mut self, payload: InputPayload) {
        if payload.is_image() && self.session.mode() != ScanMode::File {
            info!("Image received in camera mode, switching to file mode");
            self.switch_mode(ScanMode::File);
        }
        self.session.submit_payload(payload);
    }

    // ── Notices ────────────────────────────────────────

    pub fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() >= MAX_VISIBLE_NOTICES {
            self.notices.remove(0);
        }
        self.notices.push(notice);
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }

    /// Drop notices older than [`NOTICE_TTL_SECS`] at `now`.
    pub fn expire_notices(&mut self, now: chrono::DateTime<chrono::Local>) {
        let ttl = chrono::Duration::seconds(NOTICE_TTL_SECS);
        self.notices.retain(|n| now - n.raised_at < ttl);
    }
}

/// Turn an egui drop into a payload, reading from disk when the platform
/// only gave a path.
pub fn payload_from_dropped(file: &egui::DroppedFile) -> Result<InputPayload, String> {
    let mut payload = if let Some(bytes) = &file.bytes {
        InputPayload::new(PayloadSource::Drop, bytes.to_vec())
    } else if let Some(path) = &file.path {
        InputPayload::from_file(PayloadSource::Drop, path)
            .map_err(|e| format!("Could not read {}: {}", path.display(), e))?
    } else {
        return Err("The dropped item has no readable content.".to_string());
    };

    if !file.mime.is_empty() {
        payload = payload.with_mime(file.mime.clone());
    }
    if payload.path.is_none() {
        if let Some(path) = &file.path {
            payload = payload.with_path(path.clone());
        } else if !file.name.is_empty() {
            payload = payload.with_path(file.name.clone());
        }
    }
    Ok(payload)
}
