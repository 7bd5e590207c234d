//! Decorator validation.
//!
//! Every decorator must resolve to a builtin or to a function declared in the
//! same file, must not be disabled, and must not be repeated with different
//! arguments. Functions with the worker shape may not be decorated at all.
//!
//! Dotted names (`pkg.Name`) are tried both as written and by their last
//! segment, so a qualified reference to a local helper still resolves.

use std::collections::{HashMap, HashSet};

use conduit_foundation::{Diagnostic, DiagnosticCode};
use conduit_language::{Decorator, FuncDecl, SourceFile};

use crate::config::AnalysisConfig;
use crate::emit::Emitter;
use crate::shape::is_worker_shape;

/// The builtin decorator that marks a function deprecated.
pub const DEPRECATED: &str = "deprecated";

/// Returns the part of a decorator name after its last `.`, or the whole name.
#[must_use]
pub fn base_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, base)| base)
}

/// Validates the decorators attached to function declarations.
#[derive(Debug)]
pub struct DecoratorValidator<'c> {
    config: &'c AnalysisConfig,
}

impl<'c> DecoratorValidator<'c> {
    /// Creates a validator reading `config`.
    #[must_use]
    pub fn new(config: &'c AnalysisConfig) -> Self {
        Self { config }
    }

    /// Checks every decorated function in `file`, in declaration order.
    #[must_use]
    pub fn validate(&self, file: &SourceFile) -> Vec<Diagnostic> {
        let mut out = Emitter::new(self.config.clock.now());
        let locals: HashSet<&str> = file.functions().map(|f| f.name.as_str()).collect();

        for func in file.functions().filter(|f| f.is_decorated()) {
            self.check_function(func, &locals, &mut out);
        }

        out.finish()
    }

    fn check_function(&self, func: &FuncDecl, locals: &HashSet<&str>, out: &mut Emitter) {
        if is_worker_shape(func) {
            out.emit(
                Diagnostic::new(
                    DiagnosticCode::DecoratorOnWorker,
                    format!("worker function '{}' must not carry decorators", func.name),
                    func.span,
                )
                .with_func(&func.name),
            );
        }

        // First-seen canonical arguments per decorator name.
        let mut seen: HashMap<&str, String> = HashMap::new();

        for decorator in &func.decorators {
            let name = decorator.name.trim();
            if name.is_empty() {
                out.emit(
                    Diagnostic::new(
                        DiagnosticCode::DecoratorUnresolved,
                        format!("decorator on '{}' has an empty name", func.name),
                        decorator.span,
                    )
                    .with_func(&func.name),
                );
                continue;
            }
            let base = base_name(name);
            let args = decorator.canonical_args();

            self.check_disabled(func, decorator, name, base, out);

            if !self.resolves(name, base, locals) {
                out.emit(
                    Diagnostic::new(
                        DiagnosticCode::DecoratorUndefined,
                        format!(
                            "decorator '{name}' on '{}' is neither a builtin nor a function declared in this file",
                            func.name
                        ),
                        decorator.span,
                    )
                    .with_func(&func.name)
                    .with_data("decorator", name),
                );
            }

            if name == DEPRECATED || base == DEPRECATED {
                let message = if args.is_empty() {
                    format!("function '{}' is deprecated", func.name)
                } else {
                    format!("function '{}' is deprecated: {args}", func.name)
                };
                out.emit(
                    Diagnostic::new(DiagnosticCode::Deprecated, message, decorator.span)
                        .with_func(&func.name)
                        .with_data("args", args.as_str()),
                );
            }

            match seen.get(name) {
                Some(first) if *first != args => {
                    out.emit(
                        Diagnostic::new(
                            DiagnosticCode::DecoratorConflict,
                            format!(
                                "decorator '{name}' is repeated on '{}' with different arguments ('{first}' vs '{args}')",
                                func.name
                            ),
                            decorator.span,
                        )
                        .with_func(&func.name)
                        .with_data("decorator", name)
                        .with_data("first", first.as_str())
                        .with_data("second", args.as_str()),
                    );
                }
                Some(_) => {}
                None => {
                    seen.insert(name, args);
                }
            }
        }
    }

    /// The full name and, when it differs, the base name are checked
    /// separately; each match is reported.
    fn check_disabled(
        &self,
        func: &FuncDecl,
        decorator: &Decorator,
        name: &str,
        base: &str,
        out: &mut Emitter,
    ) {
        let forms = if base == name { vec![name] } else { vec![name, base] };
        for form in forms {
            if self.config.is_disabled(form) {
                out.emit(
                    Diagnostic::new(
                        DiagnosticCode::DecoratorDisabled,
                        format!("decorator '{form}' is disabled"),
                        decorator.span,
                    )
                    .with_func(&func.name)
                    .with_data("decorator", form),
                );
            }
        }
    }

    fn resolves(&self, name: &str, base: &str, locals: &HashSet<&str>) -> bool {
        [name, base]
            .into_iter()
            .any(|n| self.config.is_builtin(n) || locals.contains(n))
    }
}
