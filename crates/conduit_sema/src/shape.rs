//! Worker signature shapes.
//!
//! A worker takes one event and returns the next event plus an error:
//! `func Enrich(ev Event<Order>) (Event<Invoice>, error)`.

use conduit_language::FuncDecl;
use conduit_language::generics::is_event_type;

/// The result type that must close every worker signature.
pub const ERROR_TYPE: &str = "error";

/// Returns true if `func` has the canonical worker shape: one `Event` or
/// `Event<...>` parameter, and exactly the results `(Event[<...>], error)`.
///
/// Decorators are forbidden on functions of this shape.
#[must_use]
pub fn is_worker_shape(func: &FuncDecl) -> bool {
    let [param] = func.params.as_slice() else {
        return false;
    };
    let [first, second] = func.results.as_slice() else {
        return false;
    };
    is_event_type(&param.ty) && is_event_type(&first.ty) && second.ty.trim() == ERROR_TYPE
}

/// How a resolved worker declaration departs from the worker signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureFault {
    /// Not exactly one parameter, or the parameter is not `Event<...>`.
    Param,
    /// Not exactly two results, or the second is not `error`.
    Results,
}

/// Checks a resolved worker declaration. The parameter is checked first; the
/// first result's inner type is unconstrained.
#[must_use]
pub fn signature_fault(func: &FuncDecl) -> Option<SignatureFault> {
    let param_ok = matches!(func.params.as_slice(), [p] if p.ty.trim().starts_with("Event<"));
    if !param_ok {
        return Some(SignatureFault::Param);
    }
    let results_ok =
        matches!(func.results.as_slice(), [_, second] if second.ty.trim() == ERROR_TYPE);
    if results_ok {
        None
    } else {
        Some(SignatureFault::Results)
    }
}
