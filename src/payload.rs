//! Turning error values into log lines.
//!
//! A payload either carries a message of its own or it doesn't. Payloads with a message
//! are logged as that message, trimmed; everything else falls back to a generic textual
//! form, so every payload produces some line.

use std::fmt;

/// Anything that can be logged through [`Logger::log_errors`](crate::Logger::log_errors).
pub trait ErrorPayload {
    /// The payload's own message, when it has one.
    fn structured_message(&self) -> Option<String>;

    /// Generic textual form. Used as the fallback and always in raw mode.
    fn raw_text(&self) -> String;
}

/// Every error type carries its message in `Display`. The raw form is its `Debug` output.
impl<E: std::error::Error + ?Sized> ErrorPayload for E {
    fn structured_message(&self) -> Option<String> {
        Some(self.to_string())
    }

    fn raw_text(&self) -> String {
        format!("{self:?}")
    }
}

/// A failure report that may or may not wrap an underlying error.
///
/// With an inner error the message comes from that error; without one, the record's
/// own description is all there is.
#[derive(Debug)]
pub struct ErrorRecord {
    error: Option<Box<dyn std::error::Error + Send + Sync>>,
    description: String,
}

impl ErrorRecord {
    /// A record wrapping an error. The description defaults to the error's `Display`.
    #[must_use]
    pub fn from_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        let description = error.to_string();
        Self {
            error: Some(Box::new(error)),
            description,
        }
    }

    /// A record with nothing structured behind it.
    #[must_use]
    pub fn from_text(description: impl Into<String>) -> Self {
        Self {
            error: None,
            description: description.into(),
        }
    }

    /// Replaces the generic description, keeping any inner error.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.error.as_deref()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

impl ErrorPayload for ErrorRecord {
    fn structured_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    fn raw_text(&self) -> String {
        self.description.clone()
    }
}

/// The line logged for one payload.
///
/// Raw mode always uses the textual form. Otherwise the trimmed message wins unless it
/// is missing or blank.
#[must_use]
pub fn flatten(payload: &dyn ErrorPayload, raw: bool) -> String {
    if raw {
        return payload.raw_text();
    }
    payload
        .structured_message()
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| payload.raw_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn error_message_is_trimmed() {
        let err = io::Error::other("  disk full \n");
        assert_eq!(flatten(&err, false), "disk full");
    }

    #[test]
    fn raw_uses_debug_form() {
        let err = io::Error::other("disk full");
        assert_eq!(flatten(&err, true), format!("{err:?}"));
    }

    #[test]
    fn record_reads_inner_error() {
        let record = ErrorRecord::from_error(io::Error::other("inner")).description("outer");
        assert_eq!(flatten(&record, false), "inner");
        assert_eq!(flatten(&record, true), "outer");
    }

    #[test]
    fn record_without_error_falls_back_to_text() {
        let record = ErrorRecord::from_text("something odd");
        assert_eq!(flatten(&record, false), "something odd");
    }

    #[test]
    fn blank_message_falls_back() {
        let err = io::Error::other("   ");
        assert_eq!(flatten(&err, false), format!("{err:?}"));
    }
}
