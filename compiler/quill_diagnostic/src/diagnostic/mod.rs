use std::fmt;

use crate::ErrorKind;

/// An error marker ready to be shown to the story author.
///
/// Built from a runtime error by the value layer, then rendered with
/// [`Diagnostic::render`] (or `Display`, which is the same text).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be shown or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error category.
    pub kind: ErrorKind,
    /// Main error message.
    pub message: String,
    /// The source text that failed, if known.
    pub source: Option<String>,
    /// Extra hint specific to this error (e.g. how to convert a value).
    pub hint: Option<String>,
    /// Captured failure context, shown last.
    pub detail: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
            source: None,
            hint: None,
            detail: None,
        }
    }

    /// Attach the failing source text.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach a hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Attach captured failure context.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// The explanation looked up from the kind table.
    pub fn explanation(&self) -> &'static str {
        self.kind.explanation()
    }

    /// Render the marker as plain text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.kind, self.message)?;

        if let Some(source) = &self.source {
            write!(f, "\n  --> `{source}`")?;
        }

        write!(f, "\n  = note: {}", self.explanation())?;

        if let Some(hint) = &self.hint {
            write!(f, "\n  = help: {hint}")?;
        }

        if let Some(detail) = &self.detail {
            for line in detail.lines() {
                write!(f, "\n  | {line}")?;
            }
        }

        Ok(())
    }
}
