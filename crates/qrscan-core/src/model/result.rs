/// Scan results and the actions they offer.
use crate::classify::{classify, TextKind};

/// Classification of the current result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultKind {
    /// No result yet.
    #[default]
    None,
    PlainText,
    Url,
}

impl From<TextKind> for ResultKind {
    fn from(kind: TextKind) -> Self {
        match kind {
            TextKind::PlainText => Self::PlainText,
            TextKind::Url => Self::Url,
        }
    }
}

/// Action offered for a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultAction {
    Open,
    Copy,
}

impl ResultKind {
    /// Actions the result panel should offer, in display order.
    pub fn actions(self) -> &'static [ResultAction] {
        match self {
            Self::None => &[],
            Self::PlainText => &[ResultAction::Copy],
            Self::Url => &[ResultAction::Open, ResultAction::Copy],
        }
    }
}

/// Outcome of the most recent scan attempt.
///
/// "No result yet" is `raw_text == None`, so a decoded empty payload
/// (`Some("")`) stays distinguishable from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub raw_text: Option<String>,
    pub is_success: bool,
    pub kind: ResultKind,
}

impl ScanResult {
    /// The "no result yet" sentinel.
    pub fn none() -> Self {
        Self::default()
    }

    /// A failed attempt. Carries no text, so it reads the same as the sentinel.
    pub fn failure() -> Self {
        Self::default()
    }

    /// A successful decode, classified.
    pub fn success(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = classify(&text).into();
        Self {
            raw_text: Some(text),
            is_success: true,
            kind,
        }
    }

    /// Whether this is the "no result yet" sentinel.
    pub fn is_none(&self) -> bool {
        self.raw_text.is_none()
    }

    pub fn text(&self) -> Option<&str> {
        self.raw_text.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_vs_empty_payload() {
        let none = ScanResult::none();
        let empty = ScanResult::success("");
        assert!(none.is_none());
        assert!(!empty.is_none());
        assert_ne!(none, empty);
        assert_eq!(empty.kind, ResultKind::PlainText);
    }

    #[test]
    fn test_sentinel_text_is_not_magic() {
        let r = ScanResult::success("No result");
        assert!(!r.is_none());
        assert_eq!(r.text(), Some("No result"));
    }

    #[test]
    fn test_actions() {
        assert!(ResultKind::None.actions().is_empty());
        assert_eq!(ResultKind::PlainText.actions(), &[ResultAction::Copy]);
        assert_eq!(
            ScanResult::success("https://example.com").kind.actions(),
            &[ResultAction::Open, ResultAction::Copy]
        );
    }
}
