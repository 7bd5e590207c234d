//! Runs both validators over whole files.
//!
//! The validators are independent: either may run alone, and a few findings
//! (a decorated worker, for instance) are reported by both.

use conduit_foundation::Report;
use conduit_language::SourceFile;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::decorator::DecoratorValidator;
use crate::worker::WorkerValidator;

/// Decorator and worker analysis for one or more files.
#[derive(Clone, Debug)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Default for Analyzer {
    /// An analyzer over [`AnalysisConfig::default`].
    ///
    /// That configuration reads the system clock, so two runs over the same
    /// file yield the same codes, messages and spans but usually different
    /// timestamps. Use [`AnalysisConfig::deterministic`] when whole
    /// diagnostics must compare equal across runs.
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analyzer {
    /// Creates an analyzer with the given configuration.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes one file: decorator diagnostics first, then worker
    /// diagnostics.
    #[must_use]
    pub fn analyze(&self, file: &SourceFile) -> Report {
        let mut report = Report::from(DecoratorValidator::new(&self.config).validate(file));
        report.extend(WorkerValidator::new(&self.config).validate(file));

        debug!(
            file = file.path.as_deref().unwrap_or("<memory>"),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "analyzed file"
        );
        report
    }

    /// Analyzes files in order, concatenating their reports.
    pub fn analyze_all<'a>(&self, files: impl IntoIterator<Item = &'a SourceFile>) -> Report {
        files.into_iter().flat_map(|file| self.analyze(file)).collect()
    }
}
