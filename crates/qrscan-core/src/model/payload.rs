/// Image payloads arriving from drag-and-drop, clipboard paste, or a
/// file picker.
use std::path::{Path, PathBuf};

/// Where a payload came from. Only used for logging and notice wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadSource {
    Drop,
    Paste,
    FilePicker,
}

/// Raw bytes plus whatever type information the host supplied.
#[derive(Debug, Clone)]
pub struct InputPayload {
    pub source: PayloadSource,
    /// MIME type, if the host reported one.
    pub mime: Option<String>,
    /// Original file path or name, if any.
    pub path: Option<PathBuf>,
    pub bytes: Vec<u8>,
}

impl InputPayload {
    pub fn new(source: PayloadSource, bytes: Vec<u8>) -> Self {
        Self {
            source,
            mime: None,
            path: None,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Read a payload from disk.
    pub fn from_file(source: PayloadSource, path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(source, bytes).with_path(path))
    }

    /// Whether this payload is image-typed.
    ///
    /// A non-empty MIME type is authoritative (`image/*` only). Without one,
    /// the file extension is checked, then the leading bytes are sniffed.
    pub fn is_image(&self) -> bool {
        if let Some(mime) = self.mime.as_deref().filter(|m| !m.trim().is_empty()) {
            return mime.trim().to_ascii_lowercase().starts_with("image/");
        }
        if let Some(path) = &self.path {
            if image::ImageFormat::from_path(path).is_ok() {
                return true;
            }
        }
        image::guess_format(&self.bytes).is_ok()
    }

    /// Short display name for log lines.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{} bytes", self.bytes.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn test_mime_is_authoritative() {
        let p = InputPayload::new(PayloadSource::Drop, PNG_MAGIC.to_vec()).with_mime("text/plain");
        assert!(!p.is_image());
        let p = InputPayload::new(PayloadSource::Drop, vec![1, 2, 3]).with_mime("image/png");
        assert!(p.is_image());
    }

    #[test]
    fn test_extension_fallback() {
        let p = InputPayload::new(PayloadSource::Drop, vec![1, 2, 3]).with_path("shot.JPG");
        assert!(p.is_image());
        let p = InputPayload::new(PayloadSource::Drop, b"hello".to_vec()).with_path("notes.txt");
        assert!(!p.is_image());
    }

    #[test]
    fn test_sniffing_fallback() {
        let p = InputPayload::new(PayloadSource::Paste, PNG_MAGIC.to_vec());
        assert!(p.is_image());
        let p = InputPayload::new(PayloadSource::Paste, b"just text".to_vec());
        assert!(!p.is_image());
    }
}
