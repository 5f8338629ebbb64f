/// Scan mode -- which input pipeline the session is driving.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mutually exclusive input modes. Persisted across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Live camera feed.
    #[default]
    Camera,
    /// Uploaded, dropped or pasted image.
    File,
}

impl ScanMode {
    /// Stable lowercase name, also used as the stored preference value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::File => "file",
        }
    }

    /// Human-readable label for mode buttons.
    pub fn label(self) -> &'static str {
        match self {
            Self::Camera => "Use Camera",
            Self::File => "Upload Image",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "camera" => Ok(Self::Camera),
            "file" => Ok(Self::File),
            other => Err(format!("unknown scan mode '{other}' (expected camera or file)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ScanMode::File).unwrap(), "\"file\"");
        let mode: ScanMode = serde_json::from_str("\"camera\"").unwrap();
        assert_eq!(mode, ScanMode::Camera);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("File".parse::<ScanMode>(), Ok(ScanMode::File));
        assert_eq!(" camera ".parse::<ScanMode>(), Ok(ScanMode::Camera));
        assert!("video".parse::<ScanMode>().is_err());
    }
}
