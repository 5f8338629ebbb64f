/// Host capabilities backed by egui.
///
/// The session calls its clipboard and link capabilities synchronously, but
/// egui only exposes those facilities through the `Context` inside a frame.
/// The capabilities here therefore queue [`UiRequest`]s, and the app drains
/// the queue once per frame with [`apply_requests`].
use parking_lot::Mutex;
use qrscan_core::session::{AudioCue, Capabilities, ClipboardWriter, ExternalLinkOpener};
use std::sync::Arc;
use tracing::{debug, info};

/// A side effect that must run against the egui context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiRequest {
    CopyText(String),
    OpenUrl(String),
}

/// Requests waiting for the next frame.
pub type RequestQueue = Arc<Mutex<Vec<UiRequest>>>;

pub fn new_request_queue() -> RequestQueue {
    Arc::new(Mutex::new(Vec::new()))
}

/// Queues clipboard writes.
pub struct EguiClipboard {
    queue: RequestQueue,
}

impl ClipboardWriter for EguiClipboard {
    fn write_text(&self, text: &str) {
        debug!("Queue clipboard write ({} bytes)", text.len());
        self.queue.lock().push(UiRequest::CopyText(text.to_string()));
    }
}

/// Queues browser opens.
pub struct EguiLinkOpener {
    queue: RequestQueue,
}

impl ExternalLinkOpener for EguiLinkOpener {
    fn open_url(&self, url: &str) {
        info!("Opening {}", url);
        self.queue.lock().push(UiRequest::OpenUrl(url.to_string()));
    }
}

/// Pitch of the success beep.
pub const SUCCESS_TONE_HZ: f32 = 800.0;
/// Length of the success beep.
pub const SUCCESS_TONE_MS: u64 = 100;
/// Output gain of the success beep.
pub const SUCCESS_TONE_GAIN: f32 = 0.1;

/// Short sine beep on the default output device.
///
/// Playback runs on a detached thread so the UI never waits for the audio
/// device. Any failure to open the device is logged and ignored.
#[cfg(feature = "sound")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ToneCue;

#[cfg(feature = "sound")]
impl AudioCue for ToneCue {
    fn play_success(&self) {
        use rodio::Source;
        use std::time::Duration;

        let spawned = std::thread::Builder::new()
            .name("qrscan-beep".into())
            .spawn(|| {
                let (_stream, handle) = match rodio::OutputStream::try_default() {
                    Ok(output) => output,
                    Err(e) => {
                        tracing::warn!("No audio output for success cue: {}", e);
                        return;
                    }
                };
                let sink = match rodio::Sink::try_new(&handle) {
                    Ok(sink) => sink,
                    Err(e) => {
                        tracing::warn!("Could not play success cue: {}", e);
                        return;
                    }
                };
                let tone = rodio::source::SineWave::new(SUCCESS_TONE_HZ)
                    .take_duration(Duration::from_millis(SUCCESS_TONE_MS))
                    .amplify(SUCCESS_TONE_GAIN);
                sink.append(tone);
                sink.sleep_until_end();
            });
        if let Err(e) = spawned {
            tracing::warn!("Could not spawn audio thread: {}", e);
        }
    }
}

/// The audio cue for this build.
pub fn success_cue() -> Box<dyn AudioCue> {
    #[cfg(feature = "sound")]
    {
        Box::new(ToneCue)
    }
    #[cfg(not(feature = "sound"))]
    {
        Box::new(qrscan_core::session::SilentCue)
    }
}

/// Build the session capabilities, with clipboard and links routed through
/// `queue`.
pub fn capabilities(queue: &RequestQueue) -> Capabilities {
    Capabilities {
        audio: success_cue(),
        clipboard: Box::new(EguiClipboard {
            queue: Arc::clone(queue),
        }),
        links: Box::new(EguiLinkOpener {
            queue: Arc::clone(queue),
        }),
    }
}

/// Run every queued request against `ctx`. Returns how many ran.
pub fn apply_requests(ctx: &egui::Context, queue: &RequestQueue) -> usize {
    let requests = std::mem::take(&mut *queue.lock());
    let count = requests.len();
    for request in requests {
        match request {
            UiRequest::CopyText(text) => ctx.copy_text(text),
            UiRequest::OpenUrl(url) => ctx.open_url(egui::OpenUrl::new_tab(url)),
        }
    }
    count
}
