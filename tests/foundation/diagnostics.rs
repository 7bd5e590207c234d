//! Integration tests for diagnostics and reports

use conduit_foundation::{Diagnostic, DiagnosticCode, Report, Severity, Span, Timestamp};

// =============================================================================
// Codes
// =============================================================================

#[test]
fn codes_have_stable_strings() {
    let expected = [
        "E_DECORATOR_ON_WORKER",
        "E_DECORATOR_UNRESOLVED",
        "E_DECORATOR_UNDEFINED",
        "E_DECORATOR_DISABLED",
        "E_DECORATOR_CONFLICT",
        "W_DEPRECATED",
        "E_WORKER_UNDEFINED",
        "E_WORKER_SIGNATURE",
        "E_DECORATOR_SIGNATURE",
        "E_EVENT_PTR_FORBIDDEN",
    ];
    let actual: Vec<_> = DiagnosticCode::ALL.iter().map(|c| c.as_str()).collect();
    assert_eq!(actual, expected);
}

#[test]
fn code_parsing_trims_whitespace() {
    let code: DiagnosticCode = "  W_DEPRECATED\n".parse().unwrap();
    assert_eq!(code, DiagnosticCode::Deprecated);
    assert_eq!(code.severity(), Severity::Warning);
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn diagnostic_carries_aux_data_in_key_order() {
    let diag = Diagnostic::new(
        DiagnosticCode::DecoratorConflict,
        "conflict",
        Span::new(10, 20, 2, 3),
    )
    .with_data("second", "2")
    .with_data("first", "1")
    .with_func("F");

    let keys: Vec<_> = diag.data.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["first", "func", "second"]);
}

#[test]
fn timestamps_do_not_affect_display() {
    let base = Diagnostic::new(DiagnosticCode::WorkerUndefined, "missing", Span::point(0, 1, 1));
    let later = base.clone().at(Timestamp::from_millis(99));
    assert_eq!(base.to_string(), later.to_string());
    assert_ne!(base, later);
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn report_iterates_in_order() {
    let report = Report::from(vec![
        Diagnostic::new(DiagnosticCode::Deprecated, "a", Span::default()),
        Diagnostic::new(DiagnosticCode::WorkerSignature, "b", Span::default()),
    ]);

    let messages: Vec<_> = (&report).into_iter().map(|d| d.message.as_str()).collect();
    assert_eq!(messages, vec!["a", "b"]);
    assert_eq!(report.into_diagnostics().len(), 2);
}
