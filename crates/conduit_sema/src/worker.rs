//! Worker binding validation.
//!
//! Pipeline steps (`ingress`, `transform`, `egress`) name the function that
//! processes each event. The worker is either a reference to a declared
//! function, a reference through an import alias (not checked here), or an
//! inline function literal whose header is checked textually.

use std::collections::HashMap;

use conduit_foundation::{Diagnostic, DiagnosticCode, Span};
use conduit_language::generics::event_pointer_inner;
use conduit_language::signature::{FUNC_KEYWORD, parse_inline_signature};
use conduit_language::text::{split_key_value, trim_quotes};
use conduit_language::{FuncDecl, ImportScope, PipelineDecl, SourceFile, StepKind, StepStmt};
use tracing::trace;

use crate::config::AnalysisConfig;
use crate::emit::Emitter;
use crate::shape::{ERROR_TYPE, SignatureFault, signature_fault};

/// The argument key that names a step's worker explicitly.
pub const WORKER_KEY: &str = "worker";

/// The worker text of a step and where it was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkerRef<'a> {
    /// Worker text with surrounding quotes removed.
    pub text: &'a str,
    /// Span of the argument holding it.
    pub span: Span,
}

/// Finds the worker argument of a step.
///
/// A `worker=...` argument wins wherever it appears. Otherwise the first
/// argument without a key is the worker; arguments with other keys are never
/// taken positionally. Returns `None` if there is no worker or it is empty.
#[must_use]
pub fn worker_ref(step: &StepStmt) -> Option<WorkerRef<'_>> {
    let mut positional = None;
    for arg in &step.args {
        match split_key_value(&arg.text) {
            Some((key, value)) if key.eq_ignore_ascii_case(WORKER_KEY) => {
                positional = Some((value, arg.span));
                break;
            }
            Some(_) => {}
            None if positional.is_none() => positional = Some((arg.text.as_str(), arg.span)),
            None => {}
        }
    }
    let (text, span) = positional?;
    let text = trim_quotes(text.trim()).trim();
    if text.is_empty() {
        return None;
    }
    Some(WorkerRef { text, span })
}

/// Where a step was found, for diagnostic data.
#[derive(Clone, Copy)]
struct StepSite<'a> {
    pipeline: &'a str,
    kind: StepKind,
}

impl StepSite<'_> {
    fn tag(self, diagnostic: Diagnostic) -> Diagnostic {
        diagnostic
            .with_data("pipeline", self.pipeline)
            .with_data("step", self.kind.as_str())
    }
}

/// Validates the workers bound to pipeline steps.
#[derive(Debug)]
pub struct WorkerValidator<'c> {
    config: &'c AnalysisConfig,
}

impl<'c> WorkerValidator<'c> {
    /// Creates a validator reading `config`.
    #[must_use]
    pub fn new(config: &'c AnalysisConfig) -> Self {
        Self { config }
    }

    /// Checks every worker step of every pipeline in `file`.
    #[must_use]
    pub fn validate(&self, file: &SourceFile) -> Vec<Diagnostic> {
        let mut out = Emitter::new(self.config.clock.now());
        let scope = ImportScope::from_file(file);
        let functions = file.function_index();

        for pipeline in file.pipelines() {
            check_pipeline(pipeline, &scope, &functions, &mut out);
        }

        out.finish()
    }
}

fn check_pipeline(
    pipeline: &PipelineDecl,
    scope: &ImportScope,
    functions: &HashMap<&str, &FuncDecl>,
    out: &mut Emitter,
) {
    for step in pipeline.steps() {
        let Some(kind) = step.kind() else {
            continue;
        };
        let Some(worker) = worker_ref(step) else {
            trace!(pipeline = %pipeline.name, step = %step.name, "no worker argument");
            continue;
        };
        let site = StepSite {
            pipeline: &pipeline.name,
            kind,
        };

        // Anything starting with `func` is inline; the parser decides the rest.
        if worker.text.starts_with(FUNC_KEYWORD) {
            check_inline(worker, site, out);
            continue;
        }

        let name = match worker.text.rsplit_once('.') {
            Some((prefix, _)) if scope.contains(prefix) => {
                trace!(worker = worker.text, "external worker, skipping");
                continue;
            }
            Some((_, suffix)) => suffix,
            None => worker.text,
        };

        match functions.get(name) {
            Some(func) => check_declared(func, site, out),
            None => out.emit(site.tag(
                Diagnostic::new(
                    DiagnosticCode::WorkerUndefined,
                    format!("worker '{}' is not defined", worker.text),
                    worker.span,
                )
                .with_func(name),
            )),
        }
    }
}

/// Checks an inline function literal. Text that does not parse as a literal
/// header is accepted: it cannot be verified, so it is not flagged.
fn check_inline(worker: WorkerRef<'_>, site: StepSite<'_>, out: &mut Emitter) {
    let Some(sig) = parse_inline_signature(worker.text) else {
        trace!(worker = worker.text, "unrecognized inline worker, skipping");
        return;
    };
    let diag = |code: DiagnosticCode, message: String| {
        site.tag(Diagnostic::new(code, message, worker.span))
            .with_data("worker", worker.text)
    };

    if let Some(inner) = event_pointer_inner(&sig.param) {
        out.emit(diag(
            DiagnosticCode::EventPtrForbidden,
            format!("inline worker parameter carries a pointer event payload '{inner}'"),
        ));
    }
    if let Some(inner) = sig.results.first().and_then(|r| event_pointer_inner(r)) {
        out.emit(diag(
            DiagnosticCode::EventPtrForbidden,
            format!("inline worker result carries a pointer event payload '{inner}'"),
        ));
    }

    let fault = match sig.results.as_slice() {
        [] => Some("inline worker is missing results; expected (Event<T>, error)".to_string()),
        [only] if only != ERROR_TYPE => Some(format!(
            "inline worker with a single result must return 'error', found '{only}'"
        )),
        [_, second, ..] if second != ERROR_TYPE => Some(format!(
            "inline worker's second result must be 'error', found '{second}'"
        )),
        _ => None,
    };
    if let Some(message) = fault {
        out.emit(diag(DiagnosticCode::WorkerSignature, message));
    }
}

/// Checks a worker that resolved to a declaration in this file.
fn check_declared(func: &FuncDecl, site: StepSite<'_>, out: &mut Emitter) {
    let mut emit = |code: DiagnosticCode, message: String, span: Span| {
        out.emit(site.tag(Diagnostic::new(code, message, span).with_func(&func.name)));
    };

    if func.is_decorated() {
        emit(
            DiagnosticCode::DecoratorOnWorker,
            format!("worker function '{}' must not carry decorators", func.name),
            func.span,
        );
    }

    if func.is_factory() {
        return;
    }

    if let Some(fault) = signature_fault(func) {
        let message = match fault {
            SignatureFault::Param => format!(
                "worker '{}' must take exactly one Event<T> parameter",
                func.name
            ),
            SignatureFault::Results => {
                format!("worker '{}' must return (Event<T>, error)", func.name)
            }
        };
        emit(DiagnosticCode::WorkerSignature, message, func.span);
        if func.is_decorated() {
            emit(
                DiagnosticCode::DecoratorSignature,
                format!(
                    "decorators on '{}' may have changed its worker signature",
                    func.name
                ),
                func.span,
            );
        }
        return;
    }

    let param = &func.params[0];
    if let Some(inner) = event_pointer_inner(&param.ty) {
        emit(
            DiagnosticCode::EventPtrForbidden,
            format!(
                "worker '{}' parameter carries a pointer event payload '{inner}'",
                func.name
            ),
            param.span,
        );
    }
    let first = &func.results[0];
    if let Some(inner) = event_pointer_inner(&first.ty) {
        emit(
            DiagnosticCode::EventPtrForbidden,
            format!(
                "worker '{}' result carries a pointer event payload '{inner}'",
                func.name
            ),
            first.span,
        );
    }
}
