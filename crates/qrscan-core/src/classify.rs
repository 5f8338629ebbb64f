/// Result classification -- is the decoded text a URL?
///
/// Uses WHATWG URL parsing via the `url` crate, so anything a browser would
/// accept as an absolute URL (`https:`, `ftp:`, `mailto:`, custom schemes)
/// counts. Relative references and free text do not.
use url::Url;

/// Classification of a piece of decoded text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    PlainText,
    Url,
}

/// Classify `text` as an absolute URL or plain text. Total and pure.
pub fn classify(text: &str) -> TextKind {
    if is_absolute_url(text) {
        TextKind::Url
    } else {
        TextKind::PlainText
    }
}

/// Whether `text` parses as an absolute URL.
pub fn is_absolute_url(text: &str) -> bool {
    Url::parse(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        assert_eq!(classify("https://example.com"), TextKind::Url);
        assert_eq!(classify("ftp://x/y"), TextKind::Url);
        assert_eq!(classify("http://localhost:8080/path?q=1#frag"), TextKind::Url);
        assert_eq!(classify("mailto:someone@example.com"), TextKind::Url);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(classify("not a url"), TextKind::PlainText);
        assert_eq!(classify(""), TextKind::PlainText);
        assert_eq!(classify("example.com"), TextKind::PlainText);
        assert_eq!(classify("/relative/path"), TextKind::PlainText);
        assert_eq!(classify("http://"), TextKind::PlainText);
    }

    #[test]
    fn test_non_special_schemes_are_urls() {
        // Any `scheme:` prefix parses, so structured QR payloads count too.
        assert_eq!(classify("WIFI:S:home;T:WPA;P:secret;;"), TextKind::Url);
        assert_eq!(classify("tel:+15551234567"), TextKind::Url);
        assert_eq!(classify("BEGIN:VCARD"), TextKind::Url);
    }
}
