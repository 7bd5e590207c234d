//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use conduit_foundation::{DiagnosticCode, Error, ErrorContext, ErrorKind};

#[test]
fn error_unknown_code() {
    let err = "E_BOGUS".parse::<DiagnosticCode>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownDiagnosticCode(_)));
    assert!(format!("{err}").contains("E_BOGUS"));
}

#[test]
fn error_invalid_decorator_name() {
    let err = Error::invalid_decorator_name("1st", "must start with a letter");
    assert!(matches!(err.kind, ErrorKind::InvalidDecoratorName { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("1st"));
    assert!(msg.contains("must start with a letter"));
}

#[test]
fn error_context_display() {
    let ctx = ErrorContext::new().with_source("disabled decorators").with_entry(3);
    assert_eq!(format!("{ctx}"), "in disabled decorators (entry 3)");
}

#[test]
fn error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>(_: &E) {}
    assert_error(&Error::unknown_code("E_NOPE"));
}
