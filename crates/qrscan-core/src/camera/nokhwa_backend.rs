/// `nokhwa` camera backend (enabled with the `camera` feature).
use super::{CameraBackend, CaptureStream};
use crate::error::CameraError;
use crate::model::{select_preferred, CameraDevice, CaptureTarget};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::{debug, info};

/// Native capture through `nokhwa` (V4L2, AVFoundation, Media Foundation).
#[derive(Debug, Default, Clone, Copy)]
pub struct NokhwaBackend;

impl NokhwaBackend {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a capture target to a `nokhwa` camera index.
    fn resolve_index(&self, target: &CaptureTarget) -> CameraIndex {
        let id = match target {
            CaptureTarget::Device(id) => Some(id.clone()),
            // No facing metadata from native backends: apply the label
            // heuristic to the device list instead.
            CaptureTarget::FacingMode(_) => self
                .list_devices()
                .ok()
                .and_then(|devices| select_preferred(&devices)),
        };
        match id {
            Some(id) => match id.parse::<u32>() {
                Ok(n) => CameraIndex::Index(n),
                Err(_) => CameraIndex::String(id),
            },
            None => CameraIndex::Index(0),
        }
    }
}

impl CameraBackend for NokhwaBackend {
    fn list_devices(&self) -> Result<Vec<CameraDevice>, CameraError> {
        let infos =
            nokhwa::query(ApiBackend::Auto).map_err(|e| CameraError::Enumerate(e.to_string()))?;
        debug!("nokhwa reported {} camera(s)", infos.len());
        Ok(infos
            .iter()
            .map(|info| CameraDevice::new(info.index().as_string(), info.human_name()))
            .collect())
    }

    fn open(&self, target: &CaptureTarget) -> Result<Box<dyn CaptureStream>, CameraError> {
        let index = self.resolve_index(target);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera =
            Camera::new(index, requested).map_err(|e| CameraError::Unavailable(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| CameraError::Stream(e.to_string()))?;
        let label = camera.info().human_name();
        info!("Camera opened: {} at {:?}", label, camera.resolution());
        Ok(Box::new(NokhwaStream { camera, label }))
    }
}

struct NokhwaStream {
    camera: Camera,
    label: String,
}

impl CaptureStream for NokhwaStream {
    fn device_label(&self) -> String {
        self.label.clone()
    }

    fn next_frame(&mut self) -> Result<RgbImage, CameraError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CameraError::Frame(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CameraError::Frame(e.to_string()))?;
        let (width, height) = (decoded.width(), decoded.height());
        // Rebuild through raw bytes so nokhwa's `image` version never leaks.
        RgbImage::from_raw(width, height, decoded.into_raw())
            .ok_or_else(|| CameraError::Frame("frame buffer size mismatch".into()))
    }

    fn release(&mut self) -> Result<(), CameraError> {
        self.camera
            .stop_stream()
            .map_err(|e| CameraError::Release(e.to_string()))
    }
}
