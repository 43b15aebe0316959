//! Ordered, append-only diagnostic log shared by the loaders.

use log::warn;

/// Human-readable problems collected during one load operation.
///
/// Entries keep their insertion order and are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Also emitted as a warning through `log`.
    pub fn record(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.messages.push(message);
    }

    /// Whether anything has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Number of recorded messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Recorded messages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Numbered multi-line summary of every message.
    pub fn format_report(&self) -> String {
        let mut report = format!("Errors ({}):\n", self.messages.len());
        for (i, message) in self.messages.iter().enumerate() {
            report.push_str(&format!(" {}. {}\n", i + 1, message));
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let diag = Diagnostics::new();
        assert!(!diag.has_errors());
        assert_eq!(diag.format_report(), "Errors (0):\n");
    }

    #[test]
    fn test_record_keeps_order() {
        let mut diag = Diagnostics::new();
        diag.record("first");
        diag.record(String::from("second"));
        assert!(diag.has_errors());
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.iter().collect::<Vec<_>>(), vec!["first", "second"]);
        assert_eq!(diag.format_report(), "Errors (2):\n 1. first\n 2. second\n");
    }
}
