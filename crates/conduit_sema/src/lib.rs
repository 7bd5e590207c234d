//! Decorator and worker binding validation for Conduit.
//!
//! This crate provides:
//! - [`DecoratorValidator`] - Resolution, conflict, and placement rules for decorators
//! - [`WorkerValidator`] - Signature rules for workers bound to pipeline steps
//! - [`Analyzer`] - Runs both validators over whole files
//! - [`AnalysisConfig`] - Builtin and disabled decorators, diagnostic clock
//!
//! Validation never fails: every finding becomes a
//! [`Diagnostic`](conduit_foundation::Diagnostic), and one pass reports every
//! offending construct in a file.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod analyzer;
pub mod config;
pub mod decorator;
mod emit;
pub mod shape;
pub mod worker;

pub use analyzer::Analyzer;
pub use config::{AnalysisConfig, Clock};
pub use decorator::DecoratorValidator;
pub use worker::WorkerValidator;
