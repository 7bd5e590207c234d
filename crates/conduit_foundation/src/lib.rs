//! Source spans, diagnostics, and error types for Conduit.
//!
//! This crate provides:
//! - [`Span`] - Source positions for diagnostics
//! - [`Diagnostic`] - Structured analysis findings with stable [`DiagnosticCode`]s
//! - [`Report`] - An ordered collection of diagnostics from one or more passes
//! - [`Error`] - Rich error types for the fallible (non-analysis) operations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod diagnostic;
pub mod error;
pub mod report;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, Timestamp};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use report::Report;
pub use span::Span;
