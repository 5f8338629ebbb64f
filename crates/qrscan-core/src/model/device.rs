/// Camera devices and capture-target selection.
use serde::{Deserialize, Serialize};

/// Label fragments that identify an outward-facing camera.
const REAR_HINTS: [&str; 3] = ["back", "rear", "environment"];

/// A capture device reported by the camera backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraDevice {
    /// Opaque backend identifier.
    pub id: String,
    /// Human-readable name, e.g. "Integrated Camera".
    pub label: String,
}

impl CameraDevice {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Whether the label suggests an outward-facing camera.
    pub fn is_rear_facing(&self) -> bool {
        let label = self.label.to_lowercase();
        REAR_HINTS.iter().any(|hint| label.contains(hint))
    }
}

/// Logical facing-mode request used when no device id is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Outward-facing ("environment") camera.
    Environment,
}

/// What the camera backend is asked to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureTarget {
    /// A specific device id from [`CameraDevice::id`].
    Device(String),
    /// A facing-mode hint.
    FacingMode(Facing),
}

impl CaptureTarget {
    /// The preferred device from `devices`, or the environment facing-mode
    /// hint when nothing is listed.
    pub fn preferred(devices: &[CameraDevice]) -> Self {
        match select_preferred(devices) {
            Some(id) => Self::Device(id),
            None => Self::FacingMode(Facing::Environment),
        }
    }
}

/// Pick the preferred capture device.
///
/// The first device (in enumeration order) whose label mentions "back",
/// "rear" or "environment" wins; otherwise the first device; otherwise none.
pub fn select_preferred(devices: &[CameraDevice]) -> Option<String> {
    devices
        .iter()
        .find(|d| d.is_rear_facing())
        .or_else(|| devices.first())
        .map(|d| d.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_back_camera() {
        let devices = vec![
            CameraDevice::new("1", "Front Cam"),
            CameraDevice::new("2", "Back Camera"),
        ];
        assert_eq!(select_preferred(&devices), Some("2".to_string()));
    }

    #[test]
    fn test_falls_back_to_first() {
        let devices = vec![CameraDevice::new("1", "USB Cam")];
        assert_eq!(select_preferred(&devices), Some("1".to_string()));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(select_preferred(&[]), None);
        assert_eq!(
            CaptureTarget::preferred(&[]),
            CaptureTarget::FacingMode(Facing::Environment)
        );
    }

    #[test]
    fn test_first_rear_match_wins() {
        let devices = vec![
            CameraDevice::new("a", "Webcam"),
            CameraDevice::new("b", "REAR wide"),
            CameraDevice::new("c", "camera2 0, facing environment"),
        ];
        assert_eq!(select_preferred(&devices), Some("b".to_string()));
    }
}
