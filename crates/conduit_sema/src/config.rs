//! Configuration for decorator and worker validation.

use conduit_foundation::{Error, ErrorContext, Result, Timestamp};
use conduit_language::text::{is_identifier, is_identifier_path};

/// Decorators every file may use without declaring them.
pub const DEFAULT_BUILTINS: [&str; 2] = ["deprecated", "metrics"];

/// Where diagnostic timestamps come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Clock {
    /// Read the system clock once per validator pass.
    #[default]
    System,
    /// Stamp every diagnostic with a fixed time.
    Fixed(Timestamp),
}

impl Clock {
    /// Reads the clock.
    #[must_use]
    pub fn now(self) -> Timestamp {
        match self {
            Self::System => Timestamp::now(),
            Self::Fixed(timestamp) => timestamp,
        }
    }
}

/// Read-only settings shared by every validator pass.
///
/// Cloning is O(1): the name sets are persistent and share structure, so one
/// configuration can be handed to analyses running on many threads.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    /// Decorator names that resolve without a local declaration.
    pub builtin_decorators: im::OrdSet<String>,
    /// Decorator names rejected wherever they appear.
    pub disabled_decorators: im::OrdSet<String>,
    /// Timestamp source for emitted diagnostics.
    pub clock: Clock,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            builtin_decorators: DEFAULT_BUILTINS.iter().map(ToString::to_string).collect(),
            disabled_decorators: im::OrdSet::new(),
            clock: Clock::System,
        }
    }
}

impl AnalysisConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration whose output is reproducible: every diagnostic
    /// is stamped with the Unix epoch.
    #[must_use]
    pub fn deterministic() -> Self {
        Self::default().with_clock(Clock::Fixed(Timestamp::EPOCH))
    }

    /// Builder method to set the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builder method to disable one decorator name.
    #[must_use]
    pub fn with_disabled(mut self, name: impl Into<String>) -> Self {
        self.disabled_decorators.insert(name.into());
        self
    }

    /// Builder method to disable every name in a comma- or
    /// whitespace-separated list, e.g. `"metrics, acme.Trace"`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidDecoratorName`](conduit_foundation::ErrorKind::InvalidDecoratorName)
    /// for an entry that is not a (possibly dotted) identifier.
    pub fn with_disabled_list(mut self, list: &str) -> Result<Self> {
        let entries = list
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|entry| !entry.is_empty());
        for (i, entry) in entries.enumerate() {
            if !is_identifier_path(entry) {
                return Err(
                    Error::invalid_decorator_name(entry, "expected an identifier or pkg.Name")
                        .with_context(
                            ErrorContext::new()
                                .with_source("disabled decorators")
                                .with_entry(i + 1),
                        ),
                );
            }
            self.disabled_decorators.insert(entry.to_string());
        }
        Ok(self)
    }

    /// Builder method to add a builtin decorator.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidBuiltinName`](conduit_foundation::ErrorKind::InvalidBuiltinName)
    /// unless `name` is a plain identifier.
    pub fn with_builtin(mut self, name: &str) -> Result<Self> {
        let name = name.trim();
        if !is_identifier(name) {
            return Err(Error::invalid_builtin_name(name)
                .with_context(ErrorContext::new().with_source("builtin decorators")));
        }
        self.builtin_decorators.insert(name.to_string());
        Ok(self)
    }

    /// Returns true if `name` is a builtin decorator.
    #[must_use]
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtin_decorators.contains(name)
    }

    /// Returns true if `name` is disabled.
    #[must_use]
    pub fn is_disabled(&self, name: &str) -> bool {
        self.disabled_decorators.contains(name)
    }
}
