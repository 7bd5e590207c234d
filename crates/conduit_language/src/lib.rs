//! Source model and signature text parsing for Conduit.
//!
//! This crate provides:
//! - [`ast`] - The read-only source model semantic analysis consumes
//! - [`text`] - Bracket-aware splitting and literal validators
//! - [`signature`] - Inline function-literal header parsing
//! - [`generics`] - `Event<T>` inner-type extraction
//! - [`imports`] - Import alias scopes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod generics;
pub mod imports;
pub mod signature;
pub mod text;


pub use ast::{
    Argument, ArgumentKind, Attribute, Declaration, Decorator, FuncDecl, ImportDecl, Param,
    PipelineDecl, ResultParam, SourceFile, Statement, StepKind, StepStmt,
};
pub use imports::ImportScope;
pub use signature::{InlineSignature, parse_inline_signature};
