//! Conduit - decorator and worker contract validation
//!
//! This crate re-exports all layers of the Conduit analysis for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: conduit_sema        — Decorator and worker validators, analyzer
//! Layer 1: conduit_language    — Source model, signature text parsing, import scopes
//! Layer 0: conduit_foundation  — Spans, diagnostics, errors
//! ```

pub use conduit_foundation as foundation;
pub use conduit_language as language;
pub use conduit_sema as sema;
