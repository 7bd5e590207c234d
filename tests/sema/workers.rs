//! Integration tests for worker binding validation

use conduit_foundation::{DiagnosticCode, Span};
use conduit_language::{
    Argument, Decorator, FuncDecl, ImportDecl, Param, PipelineDecl, ResultParam, SourceFile,
    StepStmt,
};
use conduit_sema::{AnalysisConfig, Analyzer, WorkerValidator};

fn validate(file: &SourceFile) -> Vec<DiagnosticCode> {
    WorkerValidator::new(&AnalysisConfig::deterministic())
        .validate(file)
        .iter()
        .map(|d| d.code)
        .collect()
}

fn step(name: &str, worker: &str) -> PipelineDecl {
    PipelineDecl::new("P").with_step(StepStmt::new(name).with_arg(Argument::new(worker)))
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn undeclared_worker_is_undefined_not_misshapen() {
    let codes = validate(&SourceFile::new().with(step("Transform", "F")));
    assert_eq!(codes, vec![DiagnosticCode::WorkerUndefined]);
}

#[test]
fn import_alias_suppresses_checks() {
    let file = SourceFile::new()
        .with(ImportDecl::new("alpha"))
        .with(step("Transform", "alpha.F"));
    assert!(validate(&file).is_empty());
}

#[test]
fn explicit_import_alias_suppresses_checks() {
    let file = SourceFile::new()
        .with(ImportDecl::new("acme/stages").with_alias("st"))
        .with(step("Ingress", "st.Kafka"))
        .with(step("Egress", "stages.Kafka"));
    // `stages` is shadowed by the alias, so it is resolved locally.
    assert_eq!(validate(&file), vec![DiagnosticCode::WorkerUndefined]);
}

#[test]
fn conforming_declaration_passes() {
    let file = SourceFile::new()
        .with(
            FuncDecl::new("F")
                .with_param(Param::new("ev", "Event<T>"))
                .with_result(ResultParam::new("Event<U>"))
                .with_result(ResultParam::new("error")),
        )
        .with(step("Transform", "F"));
    assert!(validate(&file).is_empty());
}

#[test]
fn quoted_worker_name_resolves() {
    let file = SourceFile::new()
        .with(
            FuncDecl::new("F")
                .with_param(Param::new("ev", "Event<T>"))
                .with_result(ResultParam::new("U"))
                .with_result(ResultParam::new("error")),
        )
        .with(
            PipelineDecl::new("P")
                .with_step(StepStmt::new("transform").with_arg(Argument::string("F"))),
        );
    assert!(validate(&file).is_empty());
}

#[test]
fn keyed_worker_argument() {
    let span = Span::new(30, 45, 3, 12);
    let file = SourceFile::new().with(
        PipelineDecl::new("P").with_step(
            StepStmt::new("Transform")
                .with_arg(Argument::new("retries=3"))
                .with_arg(Argument::new("worker=Missing").at(span)),
        ),
    );
    let diags = WorkerValidator::new(&AnalysisConfig::deterministic()).validate(&file);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, DiagnosticCode::WorkerUndefined);
    assert_eq!(diags[0].span, span);
}

// =============================================================================
// Signatures
// =============================================================================

#[test]
fn decorated_bad_signature_reports_signature_and_decorator_signature() {
    let file = SourceFile::new()
        .with(
            FuncDecl::new("F")
                .with_param(Param::new("a", "int"))
                .with_decorator(Decorator::new("metrics")),
        )
        .with(step("Transform", "F"));
    let codes = validate(&file);
    assert!(codes.contains(&DiagnosticCode::WorkerSignature));
    assert!(codes.contains(&DiagnosticCode::DecoratorSignature));
}

#[test]
fn inline_without_results() {
    let diags = WorkerValidator::new(&AnalysisConfig::deterministic())
        .validate(&SourceFile::new().with(step("Transform", "func(a int){}")));
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code, DiagnosticCode::WorkerSignature);
    assert!(diags[0].message.contains("missing results"));
}

#[test]
fn inline_pointer_in_param() {
    let file = SourceFile::new().with(step("Transform", "func(ev Event<*T>) (Event<U>, error)"));
    assert_eq!(validate(&file), vec![DiagnosticCode::EventPtrForbidden]);
}

#[test]
fn inline_pointer_in_result() {
    let file = SourceFile::new().with(step("Transform", "func(ev Event<T>) (Event<&U>, error)"));
    assert_eq!(validate(&file), vec![DiagnosticCode::EventPtrForbidden]);
}

#[test]
fn inline_keyed_and_quoted() {
    let file = SourceFile::new().with(
        PipelineDecl::new("P").with_step(
            StepStmt::new("Transform")
                .with_arg(Argument::new("worker=\"func(ev Event<T>) (Event<T>, bool) {}\"")),
        ),
    );
    assert_eq!(validate(&file), vec![DiagnosticCode::WorkerSignature]);
}

// =============================================================================
// Both validators
// =============================================================================

#[test]
fn decorated_worker_reported_by_both_passes() {
    let file = SourceFile::new()
        .with(
            FuncDecl::new("F")
                .with_param(Param::new("ev", "Event<T>"))
                .with_result(ResultParam::new("Event<U>"))
                .with_result(ResultParam::new("error"))
                .with_decorator(Decorator::new("metrics")),
        )
        .with(step("Transform", "F"));

    let report = Analyzer::new(AnalysisConfig::deterministic()).analyze(&file);
    assert_eq!(
        report.with_code(DiagnosticCode::DecoratorOnWorker).count(),
        2
    );
    assert_eq!(report.len(), 2);
}
