/// Camera session controller -- `Idle -> Starting -> Running -> Idle`.
///
/// A capture runs on a dedicated worker thread that owns the stream for
/// its whole life: it opens the device, samples frames at the configured
/// rate, decodes the central region of interest, and releases the device
/// before exiting. The controller never touches the stream directly.
///
/// `stop` joins the worker, so once it returns the device has been released
/// and a following `start` can never overlap the previous acquisition.
use super::{CameraBackend, CameraEvent, PreviewFrame, PREVIEW_MAX_EDGE};
use crate::config::ScannerConfig;
use crate::decode::{center_region, DecodeOutcome, QrDecoder};
use crate::error::CameraError;
use crate::model::{CameraDevice, CaptureTarget};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, trace, warn};

/// Capacity of the worker → controller event channel.
///
/// Lifecycle events (started, decoded, acquire-failed, stopped) are at most
/// three per capture; transient errors are only queued while more than
/// [`LIFECYCLE_HEADROOM`] slots are free, so a flood of frame errors can
/// never crowd out the decode result.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Slots reserved for lifecycle events.
const LIFECYCLE_HEADROOM: usize = 4;

/// Maximum events applied per `poll` call.
const MAX_EVENTS_PER_POLL: usize = 64;

/// Lifecycle state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    /// No capture in progress. The device is released.
    Idle,
    /// A worker is acquiring the stream.
    Starting,
    /// Frames are being sampled and decoded.
    Running,
}

/// Handle to the running capture worker.
struct CaptureWorker {
    /// Dropping or sending on this tells the worker to stop.
    stop_tx: Sender<()>,
    events: Receiver<CameraEvent>,
    previews: Receiver<PreviewFrame>,
    thread: Option<thread::JoinHandle<()>>,
}

impl CaptureWorker {
    /// Signal the worker and wait until it has released the device.
    fn shutdown(mut self) {
        let _ = self.stop_tx.try_send(());
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                warn!("Capture worker panicked during shutdown");
            }
        }
        let discarded = self.events.try_iter().count();
        if discarded > 0 {
            debug!("Discarded {} camera event(s) after stop", discarded);
        }
    }
}

/// Owner of the single camera capture handle.
pub struct CameraController {
    backend: Arc<dyn CameraBackend>,
    decoder: Arc<dyn QrDecoder>,
    config: ScannerConfig,
    state: CameraState,
    worker: Option<CaptureWorker>,
    device_label: Option<String>,
    latest_preview: Option<PreviewFrame>,
}

impl CameraController {
    pub fn new(
        backend: Arc<dyn CameraBackend>,
        decoder: Arc<dyn QrDecoder>,
        config: ScannerConfig,
    ) -> Self {
        Self {
            backend,
            decoder,
            config: config.sanitized(),
            state: CameraState::Idle,
            worker: None,
            device_label: None,
            latest_preview: None,
        }
    }

    pub fn state(&self) -> CameraState {
        self.state
    }

    /// `true` while Starting or Running.
    pub fn is_active(&self) -> bool {
        self.state != CameraState::Idle
    }

    pub fn config(&self) -> ScannerConfig {
        self.config
    }

    /// Label of the device currently streaming, if Running.
    pub fn device_label(&self) -> Option<&str> {
        self.device_label.as_deref()
    }

    /// Enumerate capture devices.
    pub fn list_devices(&self) -> Result<Vec<CameraDevice>, CameraError> {
        self.backend.list_devices()
    }

    /// Start capturing from `target`.
    ///
    /// Any capture already Starting or Running is fully stopped first. On
    /// return the controller is `Starting`; acquisition success or failure
    /// arrives through [`poll`](Self::poll).
    pub fn start(&mut self, target: CaptureTarget) -> Result<(), CameraError> {
        if self.worker.is_some() {
            info!("Camera already active, restarting");
            self.stop();
        }

        let (stop_tx, stop_rx) = bounded::<()>(1);
        let (event_tx, event_rx) = bounded::<CameraEvent>(EVENT_CHANNEL_CAPACITY);
        let (preview_tx, preview_rx) = bounded::<PreviewFrame>(1);

        let backend = Arc::clone(&self.backend);
        let decoder = Arc::clone(&self.decoder);
        let config = self.config;

        info!("Starting camera capture on {:?}", target);
        let handle = thread::Builder::new()
            .name("qrscan-capture".into())
            .spawn(move || {
                run_capture(
                    backend.as_ref(),
                    decoder.as_ref(),
                    config,
                    target,
                    &event_tx,
                    &preview_tx,
                    &stop_rx,
                );
            })
            .map_err(|e| CameraError::Worker(e.to_string()))?;

        self.worker = Some(CaptureWorker {
            stop_tx,
            events: event_rx,
            previews: preview_rx,
            thread: Some(handle),
        });
        self.state = CameraState::Starting;
        Ok(())
    }

    /// Stop capturing and release the device.
    ///
    /// Idempotent: a no-op when already Idle. Always leaves the controller
    /// Idle, whatever happened while releasing.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            info!("Stopping camera capture");
            worker.shutdown();
        }
        self.state = CameraState::Idle;
        self.device_label = None;
        self.latest_preview = None;
    }

    /// Apply pending worker events and return them to the caller.
    ///
    /// `Decoded`, `AcquireFailed` and `Stopped` each return the controller
    /// to Idle; by the time they are returned the device has been released.
    pub fn poll(&mut self) -> Vec<CameraEvent> {
        let mut applied = Vec::new();
        let Some(worker) = self.worker.as_ref() else {
            return applied;
        };

        if let Some(frame) = worker.previews.try_iter().last() {
            self.latest_preview = Some(frame);
        }

        let mut finished = false;
        while applied.len() < MAX_EVENTS_PER_POLL {
            let event = match worker.events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Worker exited without a terminal event.
                    finished = true;
                    break;
                }
            };
            match &event {
                CameraEvent::Started { device } => {
                    info!("Camera running: {}", device);
                    self.state = CameraState::Running;
                    self.device_label = Some(device.clone());
                }
                CameraEvent::Decoded(_) | CameraEvent::AcquireFailed(_) | CameraEvent::Stopped => {
                    finished = true;
                }
                CameraEvent::TransientError(_) => {}
            }
            applied.push(event);
            if finished {
                break;
            }
        }

        if finished {
            self.stop();
        }
        applied
    }

    /// Take the most recent preview frame, if a new one arrived.
    pub fn take_preview(&mut self) -> Option<PreviewFrame> {
        self.latest_preview.take()
    }
}

impl Drop for CameraController {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─── Worker thread ──────────────────────────────────────────────────────────

/// Queue a transient error unless the channel is close to full.
fn send_transient(events: &Sender<CameraEvent>, message: String) {
    if events.len() + LIFECYCLE_HEADROOM < EVENT_CHANNEL_CAPACITY {
        let _ = events.try_send(CameraEvent::TransientError(message));
    } else {
        trace!("Dropping transient camera error: {}", message);
    }
}

/// Whether a stop has been requested (or the controller has gone away).
fn stop_requested(stop_rx: &Receiver<()>) -> bool {
    !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty))
}

/// Acquire the stream, sample until a decode or a stop request, release.
fn run_capture(
    backend: &dyn CameraBackend,
    decoder: &dyn QrDecoder,
    config: ScannerConfig,
    target: CaptureTarget,
    events: &Sender<CameraEvent>,
    previews: &Sender<PreviewFrame>,
    stop_rx: &Receiver<()>,
) {
    let mut stream = match backend.open(&target) {
        Ok(stream) => stream,
        Err(e) => {
            warn!("Could not acquire camera {:?}: {}", target, e);
            let _ = events.try_send(CameraEvent::AcquireFailed(e));
            return;
        }
    };

    let device = stream.device_label();
    let interval = config.frame_interval();

    if stop_requested(stop_rx) {
        debug!("Stop requested during acquisition of {}", device);
    } else {
        let _ = events.try_send(CameraEvent::Started {
            device: device.clone(),
        });

        loop {
            match stream.next_frame() {
                Ok(frame) => {
                    let _ = previews.try_send(PreviewFrame::from_frame(
                        &frame,
                        PREVIEW_MAX_EDGE,
                        config.region_of_interest,
                    ));
                    let grey = image::imageops::grayscale(&frame);
                    let roi = center_region(&grey, config.region_of_interest);
                    match decoder.decode(&roi) {
                        DecodeOutcome::Found(text) => {
                            info!("Camera decoded {} byte(s) from {}", text.len(), device);
                            let _ = events.try_send(CameraEvent::Decoded(text));
                            break;
                        }
                        DecodeOutcome::Miss => trace!("No QR code in frame"),
                        DecodeOutcome::Error(e) => send_transient(events, e),
                    }
                }
                Err(e) => send_transient(events, e.to_string()),
            }

            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("Capture stop requested for {}", device);
                    break;
                }
            }
        }
    }

    if let Err(e) = stream.release() {
        warn!("Error releasing camera {}: {}", device, e);
    }
    let _ = events.try_send(CameraEvent::Stopped);
}
