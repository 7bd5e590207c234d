//! Structured diagnostics produced by semantic analysis.
//!
//! A [`Diagnostic`] is pure output: validators build it once and append it to
//! an ordered sequence. Codes are stable strings so tooling can filter on them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::Error;
use crate::span::Span;

// =============================================================================
// Severity
// =============================================================================

/// How severe a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Blocks later compiler phases (the driver decides).
    Error,
    /// Informational; never blocks compilation.
    Warning,
}

impl Severity {
    /// Returns the lowercase name used in rendered output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// DiagnosticCode
// =============================================================================

/// Stable diagnostic codes emitted by the decorator and worker validators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiagnosticCode {
    /// A worker-shaped (or resolved-as-worker) function carries a decorator.
    #[cfg_attr(feature = "serde", serde(rename = "E_DECORATOR_ON_WORKER"))]
    DecoratorOnWorker,
    /// A decorator has an empty name.
    #[cfg_attr(feature = "serde", serde(rename = "E_DECORATOR_UNRESOLVED"))]
    DecoratorUnresolved,
    /// A decorator name resolves to neither a builtin nor a local function.
    #[cfg_attr(feature = "serde", serde(rename = "E_DECORATOR_UNDEFINED"))]
    DecoratorUndefined,
    /// A decorator name (or its base name) is disabled by configuration.
    #[cfg_attr(feature = "serde", serde(rename = "E_DECORATOR_DISABLED"))]
    DecoratorDisabled,
    /// The same decorator is repeated with different arguments.
    #[cfg_attr(feature = "serde", serde(rename = "E_DECORATOR_CONFLICT"))]
    DecoratorConflict,
    /// `deprecated` was applied.
    #[cfg_attr(feature = "serde", serde(rename = "W_DEPRECATED"))]
    Deprecated,
    /// A pipeline step names a worker with no local declaration.
    #[cfg_attr(feature = "serde", serde(rename = "E_WORKER_UNDEFINED"))]
    WorkerUndefined,
    /// A worker does not match the event-processing signature.
    #[cfg_attr(feature = "serde", serde(rename = "E_WORKER_SIGNATURE"))]
    WorkerSignature,
    /// A decorated worker has a bad signature; the decorator is suspected.
    #[cfg_attr(feature = "serde", serde(rename = "E_DECORATOR_SIGNATURE"))]
    DecoratorSignature,
    /// `Event<T>` where `T` contains a pointer sigil.
    #[cfg_attr(feature = "serde", serde(rename = "E_EVENT_PTR_FORBIDDEN"))]
    EventPtrForbidden,
}

impl DiagnosticCode {
    /// Every code, in taxonomy order.
    pub const ALL: [Self; 10] = [
        Self::DecoratorOnWorker,
        Self::DecoratorUnresolved,
        Self::DecoratorUndefined,
        Self::DecoratorDisabled,
        Self::DecoratorConflict,
        Self::Deprecated,
        Self::WorkerUndefined,
        Self::WorkerSignature,
        Self::DecoratorSignature,
        Self::EventPtrForbidden,
    ];

    /// Returns the stable string form, e.g. `E_WORKER_SIGNATURE`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DecoratorOnWorker => "E_DECORATOR_ON_WORKER",
            Self::DecoratorUnresolved => "E_DECORATOR_UNRESOLVED",
            Self::DecoratorUndefined => "E_DECORATOR_UNDEFINED",
            Self::DecoratorDisabled => "E_DECORATOR_DISABLED",
            Self::DecoratorConflict => "E_DECORATOR_CONFLICT",
            Self::Deprecated => "W_DEPRECATED",
            Self::WorkerUndefined => "E_WORKER_UNDEFINED",
            Self::WorkerSignature => "E_WORKER_SIGNATURE",
            Self::DecoratorSignature => "E_DECORATOR_SIGNATURE",
            Self::EventPtrForbidden => "E_EVENT_PTR_FORBIDDEN",
        }
    }

    /// Returns the severity this code is always reported with.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Deprecated => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagnosticCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| Error::unknown_code(s))
    }
}

// =============================================================================
// Timestamp
// =============================================================================

/// Milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(u64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// Creates a timestamp from milliseconds since the epoch.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Reads the system clock. A clock set before the epoch reads as the epoch.
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| {
                u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
            });
        Self(millis)
    }

    /// Returns milliseconds since the epoch.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single analysis finding.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    /// When the producing pass ran.
    pub timestamp: Timestamp,
    /// Error or warning.
    pub severity: Severity,
    /// Stable code.
    pub code: DiagnosticCode,
    /// Human-readable message.
    pub message: String,
    /// Where the finding points.
    pub span: Span,
    /// Auxiliary key/value data, e.g. the enclosing function under `func`.
    pub data: BTreeMap<String, String>,
}

impl Diagnostic {
    /// Auxiliary key holding the enclosing function name.
    pub const FUNC_KEY: &'static str = "func";

    /// Creates a diagnostic with the severity implied by `code`.
    #[must_use]
    pub fn new(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self {
            timestamp: Timestamp::EPOCH,
            severity: code.severity(),
            code,
            message: message.into(),
            span,
            data: BTreeMap::new(),
        }
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Adds an auxiliary key/value pair.
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Records the enclosing function name.
    #[must_use]
    pub fn with_func(self, func: impl Into<String>) -> Self {
        self.with_data(Self::FUNC_KEY, func)
    }

    /// Returns the enclosing function name, if recorded.
    #[must_use]
    pub fn func(&self) -> Option<&str> {
        self.data.get(Self::FUNC_KEY).map(String::as_str)
    }

    /// Returns true for error-severity diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}[{}]: {}",
            self.span, self.severity, self.code, self.message
        )
    }
}
