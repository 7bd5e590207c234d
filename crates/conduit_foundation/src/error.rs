//! Error types for Conduit.
//!
//! Analysis itself never fails: every finding is a [`Diagnostic`](crate::Diagnostic).
//! These errors cover the surrounding plumbing, such as parsing diagnostic
//! codes or building a decorator registry from configuration text.

use std::fmt;

use thiserror::Error;

/// Result alias used throughout Conduit.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Conduit operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an unknown diagnostic code error.
    #[must_use]
    pub fn unknown_code(code: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownDiagnosticCode(code.into()))
    }

    /// Creates an invalid decorator name error.
    #[must_use]
    pub fn invalid_decorator_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDecoratorName {
            name: name.into(),
            reason: reason.into(),
        })
    }

    /// Creates an invalid builtin decorator name error.
    #[must_use]
    pub fn invalid_builtin_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidBuiltinName(name.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A diagnostic code string did not name any known code.
    #[error("unknown diagnostic code: {0}")]
    UnknownDiagnosticCode(String),

    /// A decorator name in configuration is not a valid identifier path.
    #[error("invalid decorator name '{name}': {reason}")]
    InvalidDecoratorName {
        /// The offending name as written.
        name: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// A builtin decorator name is not a plain identifier.
    #[error("invalid builtin decorator name: '{0}'")]
    InvalidBuiltinName(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Where the offending input came from (file name, setting name, ...).
    pub source: Option<String>,
    /// 1-based index of the offending entry within a list setting.
    pub entry: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source description.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the 1-based entry index.
    #[must_use]
    pub fn with_entry(mut self, entry: usize) -> Self {
        self.entry = Some(entry);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            if let Some(entry) = self.entry {
                write!(f, " (entry {entry})")?;
            }
        } else if let Some(entry) = self.entry {
            write!(f, "entry {entry}")?;
        }
        Ok(())
    }
}
