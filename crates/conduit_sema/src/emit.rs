//! Diagnostic accumulation shared by the validators.

use conduit_foundation::{Diagnostic, Timestamp};
use tracing::debug;

/// Append-only diagnostic sink for one validator pass.
///
/// Every diagnostic of a pass carries the same timestamp.
#[derive(Debug)]
pub(crate) struct Emitter {
    timestamp: Timestamp,
    diagnostics: Vec<Diagnostic>,
}

impl Emitter {
    pub(crate) fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn emit(&mut self, diagnostic: Diagnostic) {
        let diagnostic = diagnostic.at(self.timestamp);
        debug!(
            code = %diagnostic.code,
            func = diagnostic.func().unwrap_or_default(),
            span = %diagnostic.span,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
