/// Scanner configuration -- camera sampling parameters and where the
/// preference file lives.
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Default camera sampling rate (frames decoded per second).
pub const DEFAULT_FPS: u32 = 10;

/// Default edge length in pixels of the square, centred region of interest
/// handed to the decoder for each camera frame.
pub const DEFAULT_REGION_OF_INTEREST: u32 = 250;

/// Smallest accepted region of interest. Anything smaller cannot hold a
/// version-1 symbol at a usable module size.
pub const MIN_REGION_OF_INTEREST: u32 = 16;

/// File name of the preference store inside the config directory.
pub const PREFS_FILE_NAME: &str = "prefs.json";

/// Camera sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Decode attempts per second while the camera is running.
    pub fps: u32,
    /// Edge length of the central square region of interest.
    pub region_of_interest: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            region_of_interest: DEFAULT_REGION_OF_INTEREST,
        }
    }
}

impl ScannerConfig {
    /// Clamp out-of-range values to the nearest usable setting.
    pub fn sanitized(self) -> Self {
        Self {
            fps: self.fps.clamp(1, 120),
            region_of_interest: self.region_of_interest.max(MIN_REGION_OF_INTEREST),
        }
    }

    /// Time between two decode attempts.
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

/// Resolve the preference file path.
///
/// An explicit directory wins; otherwise the platform config directory
/// (e.g. `~/.config/qrscan` on Linux). Returns `None` when no home
/// directory can be determined.
pub fn prefs_path(config_dir: Option<&Path>) -> Option<PathBuf> {
    match config_dir {
        Some(dir) => Some(dir.join(PREFS_FILE_NAME)),
        None => ProjectDirs::from("com", "swatto", "qrscan")
            .map(|dirs| dirs.config_dir().join(PREFS_FILE_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ScannerConfig::default();
        assert_eq!(cfg.fps, 10);
        assert_eq!(cfg.region_of_interest, 250);
        assert_eq!(cfg.frame_interval(), std::time::Duration::from_millis(100));
    }

    #[test]
    fn test_sanitized() {
        let cfg = ScannerConfig {
            fps: 0,
            region_of_interest: 2,
        }
        .sanitized();
        assert_eq!(cfg.fps, 1);
        assert_eq!(cfg.region_of_interest, MIN_REGION_OF_INTEREST);
    }

    #[test]
    fn test_explicit_prefs_dir() {
        let path = prefs_path(Some(Path::new("/tmp/qr"))).unwrap();
        assert_eq!(path, Path::new("/tmp/qr").join("prefs.json"));
    }
}
