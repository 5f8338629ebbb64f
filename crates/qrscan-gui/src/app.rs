/// Main `eframe::App` implementation for QrScan.
///
/// This is the top-level UI layout that composes all panels and widgets.
use crate::panels;
use crate::platform;
use crate::state::AppState;
use crate::widgets;
use qrscan_core::camera::{default_backend, CameraBackend};
use qrscan_core::config::ScannerConfig;
use qrscan_core::decode::RqrrDecoder;
use qrscan_core::model::{PayloadSource, ScanMode};
use qrscan_core::prefs::PreferenceStore;
use qrscan_core::session::ScanSession;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything the binary resolves before the window exists.
pub struct StartupOptions {
    pub prefs: PreferenceStore,
    pub config: ScannerConfig,
    /// Overrides the persisted mode for this run.
    pub mode: Option<ScanMode>,
    /// Image to decode straight away.
    pub image: Option<PathBuf>,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            prefs: PreferenceStore::in_memory(),
            config: ScannerConfig::default(),
            mode: None,
            image: None,
        }
    }
}

/// Pre-built application state.
///
/// Construct this **before** calling `eframe::run_native` so that device
/// enumeration and any startup decode complete before the OS window is
/// created.
pub struct QrScanState {
    pub(crate) inner: AppState,
}

impl QrScanState {
    /// Build the session on the platform camera backend.
    pub fn build(options: StartupOptions) -> Self {
        Self::build_with_backend(options, default_backend())
    }

    /// Build the session on an explicit camera backend.
    pub fn build_with_backend(options: StartupOptions, backend: Arc<dyn CameraBackend>) -> Self {
        let requests = platform::new_request_queue();
        let session = ScanSession::new(
            options.prefs,
            backend,
            Arc::new(RqrrDecoder),
            options.config.sanitized(),
            platform::capabilities(&requests),
        );
        let mut state = AppState::new(session, requests);

        if let Some(mode) = options.mode {
            state.switch_mode(mode);
        }
        if let Some(path) = options.image {
            state.switch_mode(ScanMode::File);
            state.path_input = path.display().to_string();
            state.load_file(&path, PayloadSource::FilePicker);
        }
        // Session notices raised during startup go on screen with the first
        // frame.
        state.process_frame();

        Self { inner: state }
    }

    pub fn state(&self) -> &AppState {
        &self.inner
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.inner
    }
}

/// The QrScan application.
pub struct QrScanApp {
    state: AppState,
}

impl QrScanApp {
    /// Create a new application instance from pre-built state.
    ///
    /// The state should have been constructed by [`QrScanState::build()`]
    /// *before* `eframe::run_native` is called.
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: QrScanState) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self { state: state.inner }
    }

    /// Route drag hover, dropped files and unfocused pastes into the state.
    fn handle_input(&mut self, ctx: &egui::Context) {
        let (hovering, dropped, pasted) = ctx.input(|i| {
            let pasted: Vec<String> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Paste(text) => Some(text.clone()),
                    _ => None,
                })
                .collect();
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
                pasted,
            )
        });

        if hovering != self.state.session.state().drag_active {
            self.state.session.set_drag_active(hovering);
        }
        if !dropped.is_empty() {
            self.state.drop_files(&dropped);
        }
        // A focused text field consumes its own pastes.
        if !ctx.wants_keyboard_input() {
            for text in pasted {
                self.state.paste_text(&text);
            }
        }
    }
}

impl eframe::App for QrScanApp {
    /// Override the GPU clear colour to match the active theme background,
    /// preventing a colour mismatch flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Apply theme ───────────────────────────────────────────────────
        if self.state.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // ── Input & background events ─────────────────────────────────────
        self.handle_input(ctx);
        let changed = self.state.process_frame();
        platform::apply_requests(ctx, &self.state.requests);
        if changed {
            ctx.request_repaint();
        }

        // Keep the preview live while the camera runs, and keep ticking
        // while notices are waiting to expire.
        if self.state.session.state().camera_active {
            ctx.request_repaint_after(self.state.session.config().frame_interval());
        } else if !self.state.notices.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(500));
        }

        // ── Top toolbar ───────────────────────────────────────────────────
        egui::TopBottomPanel::top("toolbar")
            .min_height(36.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::toolbar::toolbar(ui, &mut self.state);
                ui.add_space(4.0);
            });

        // ── About dialog ──────────────────────────────────────────────────
        let mut show_about = self.state.show_about;
        egui::Window::new("About QrScan")
            .open(&mut show_about)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size([320.0, 0.0])
            .show(ctx, |ui| {
                let accent = ui.visuals().hyperlink_color;
                let muted = ui.visuals().weak_text_color();
                let normal = ui.visuals().text_color();

                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("▦ QrScan")
                            .size(24.0)
                            .strong()
                            .color(accent),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                            .size(13.0)
                            .color(muted),
                    );
                    ui.add_space(12.0);
                    ui.label(
                        egui::RichText::new(
                            "Scan QR codes from a camera or an image file.\n\
                             Drop, paste or load an image to decode it.",
                        )
                        .size(12.0)
                        .color(normal),
                    );
                    ui.add_space(12.0);
                    ui.separator();
                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("MIT License - Built with Rust & egui")
                            .size(11.0)
                            .color(muted),
                    );
                    ui.add_space(8.0);
                });
            });
        self.state.show_about = show_about;

        // ── Bottom status bar ─────────────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .min_height(24.0)
            .show(ctx, |ui| {
                ui.add_space(2.0);
                widgets::status_bar::status_bar(ui, &self.state);
                ui.add_space(2.0);
            });

        // ── Result panel ──────────────────────────────────────────────────
        egui::TopBottomPanel::bottom("result_panel")
            .resizable(false)
            .min_height(90.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                panels::result_panel::result_panel(ui, &mut self.state);
                ui.add_space(6.0);
            });

        // ── Central panel (mode + input) ──────────────────────────────────
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::mode_panel::mode_panel(ui, &mut self.state);
            ui.add_space(8.0);
            match self.state.session.mode() {
                ScanMode::Camera => panels::camera_panel::camera_panel(ui, &mut self.state),
                ScanMode::File => panels::file_panel::file_panel(ui, &mut self.state),
            }
        });

        // ── Notices overlay ───────────────────────────────────────────────
        widgets::notices::notices(ctx, &mut self.state);

        // Copy/Open clicks above queued work for the next pass.
        if self.state.has_pending_requests() {
            ctx.request_repaint();
        }
    }
}
