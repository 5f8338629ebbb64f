#![allow(dead_code)]
/// Shared fakes for the end-to-end tests: a scripted camera backend, a
/// scripted decoder, recording capabilities, and a storage wrapper that
/// writes into the same event log as the camera so ordering is observable.
use image::{GrayImage, ImageFormat, Luma, RgbImage};
use parking_lot::Mutex;
use qrscan_core::camera::{CameraBackend, CaptureStream};
use qrscan_core::decode::{DecodeOutcome, QrDecoder};
use qrscan_core::error::{CameraError, StorageError};
use qrscan_core::model::{CameraDevice, CaptureTarget};
use qrscan_core::prefs::{KeyValueStorage, MemoryStorage};
use qrscan_core::session::{AudioCue, ClipboardWriter, ExternalLinkOpener};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &EventLog) -> Vec<String> {
    log.lock().clone()
}

// ── Camera ──────────────────────────────────────────────────────────────────

/// A camera backend whose behaviour is scripted per test.
pub struct FakeBackend {
    pub devices: Vec<CameraDevice>,
    pub log: EventLog,
    pub open_delay: Duration,
    pub fail_open: bool,
    pub fail_release: bool,
    pub fail_frames: bool,
    pub frame_size: (u32, u32),
    opens: AtomicUsize,
    outstanding: Arc<AtomicUsize>,
    max_outstanding: Arc<AtomicUsize>,
}

impl FakeBackend {
    pub fn new(log: EventLog) -> Self {
        Self {
            devices: vec![
                CameraDevice::new("front", "Front Camera"),
                CameraDevice::new("back", "Back Camera"),
            ],
            log,
            open_delay: Duration::ZERO,
            fail_open: false,
            fail_release: false,
            fail_frames: false,
            frame_size: (64, 48),
            opens: AtomicUsize::new(0),
            outstanding: Arc::new(AtomicUsize::new(0)),
            max_outstanding: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Highest number of simultaneously open streams ever observed.
    pub fn max_outstanding(&self) -> usize {
        self.max_outstanding.load(Ordering::SeqCst)
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }
}

impl CameraBackend for FakeBackend {
    fn list_devices(&self) -> Result<Vec<CameraDevice>, CameraError> {
        Ok(self.devices.clone())
    }

    fn open(&self, target: &CaptureTarget) -> Result<Box<dyn CaptureStream>, CameraError> {
        std::thread::sleep(self.open_delay);
        if self.fail_open {
            self.log.lock().push("open-failed".into());
            return Err(CameraError::Unavailable("denied by test".into()));
        }
        let n = self.opens.fetch_add(1, Ordering::SeqCst) + 1;
        let now = self.outstanding.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_outstanding.fetch_max(now, Ordering::SeqCst);
        let label = match target {
            CaptureTarget::Device(id) => id.clone(),
            CaptureTarget::FacingMode(_) => "environment".to_string(),
        };
        self.log.lock().push(format!("open:{n}:{label}"));
        Ok(Box::new(FakeStream {
            n,
            label,
            log: Arc::clone(&self.log),
            outstanding: Arc::clone(&self.outstanding),
            fail_release: self.fail_release,
            fail_frames: self.fail_frames,
            frame_size: self.frame_size,
            released: false,
        }))
    }
}

struct FakeStream {
    n: usize,
    label: String,
    log: EventLog,
    outstanding: Arc<AtomicUsize>,
    fail_release: bool,
    fail_frames: bool,
    frame_size: (u32, u32),
    released: bool,
}

impl CaptureStream for FakeStream {
    fn device_label(&self) -> String {
        self.label.clone()
    }

    fn next_frame(&mut self) -> Result<RgbImage, CameraError> {
        std::thread::sleep(Duration::from_millis(1));
        if self.fail_frames {
            return Err(CameraError::Frame("sensor glitch".into()));
        }
        Ok(RgbImage::new(self.frame_size.0, self.frame_size.1))
    }

    fn release(&mut self) -> Result<(), CameraError> {
        if !self.released {
            self.released = true;
            self.outstanding.fetch_sub(1, Ordering::SeqCst);
            self.log.lock().push(format!("release:{}", self.n));
        }
        if self.fail_release {
            return Err(CameraError::Release("device busy".into()));
        }
        Ok(())
    }
}

// ── Decoder ─────────────────────────────────────────────────────────────────

/// Misses until `found_after` calls have been made, then finds `text`.
pub struct ScriptedDecoder {
    pub found_after: Option<usize>,
    pub error: Option<String>,
    pub text: String,
    calls: AtomicUsize,
    pub seen_sizes: Mutex<Vec<(u32, u32)>>,
}

impl ScriptedDecoder {
    pub fn never() -> Self {
        Self {
            found_after: None,
            error: None,
            text: String::new(),
            calls: AtomicUsize::new(0),
            seen_sizes: Mutex::new(Vec::new()),
        }
    }

    pub fn finds_after(calls: usize, text: &str) -> Self {
        Self {
            found_after: Some(calls),
            text: text.to_string(),
            ..Self::never()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::never()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QrDecoder for ScriptedDecoder {
    fn decode(&self, image: &GrayImage) -> DecodeOutcome {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.seen_sizes.lock().push(image.dimensions());
        if let Some(e) = &self.error {
            return DecodeOutcome::Error(e.clone());
        }
        match self.found_after {
            Some(after) if n >= after => DecodeOutcome::Found(self.text.clone()),
            _ => DecodeOutcome::Miss,
        }
    }
}

// ── Capabilities ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct Recorder {
    pub cues: Arc<AtomicUsize>,
    pub copied: Arc<Mutex<Vec<String>>>,
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl AudioCue for Recorder {
    fn play_success(&self) {
        self.cues.fetch_add(1, Ordering::SeqCst);
    }
}

impl ClipboardWriter for Recorder {
    fn write_text(&self, text: &str) {
        self.copied.lock().push(text.to_string());
    }
}

impl ExternalLinkOpener for Recorder {
    fn open_url(&self, url: &str) {
        self.opened.lock().push(url.to_string());
    }
}

// ── Storage ─────────────────────────────────────────────────────────────────

/// In-memory storage that also records each write in the shared log.
pub struct LoggingStorage {
    inner: MemoryStorage,
    log: EventLog,
}

impl LoggingStorage {
    pub fn new(log: EventLog) -> Self {
        Self {
            inner: MemoryStorage::new(),
            log,
        }
    }
}

impl KeyValueStorage for LoggingStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.log.lock().push(format!("write:{key}={value}"));
        self.inner.write(key, value)
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Encode a flat grey PNG.
pub fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = GrayImage::from_pixel(w, h, Luma([180]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Call `step` every few milliseconds until `done` holds or 10 s pass.
pub fn pump_until<T>(
    target: &mut T,
    mut step: impl FnMut(&mut T),
    mut done: impl FnMut(&T) -> bool,
) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !done(target) {
        assert!(Instant::now() < deadline, "condition not reached within 10 seconds");
        step(target);
        std::thread::sleep(Duration::from_millis(2));
    }
}
