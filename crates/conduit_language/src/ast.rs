//! Source model for Conduit files.
//!
//! These types are the read-only view of a parsed file that semantic
//! analysis consumes. The lexer and parser that build them live with the
//! compiler driver; tests build them directly with the `with_*` builders.

use std::collections::HashMap;
use std::fmt;

use conduit_foundation::Span;

use crate::text;

// =============================================================================
// SourceFile
// =============================================================================

/// A parsed source file: top-level declarations in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceFile {
    /// Path the file was read from, if any.
    pub path: Option<String>,
    /// Top-level declarations in source order.
    pub decls: Vec<Declaration>,
}

impl SourceFile {
    /// Creates an empty file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Appends a top-level declaration.
    #[must_use]
    pub fn with(mut self, decl: impl Into<Declaration>) -> Self {
        self.decls.push(decl.into());
        self
    }

    /// Iterates over function declarations in source order.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|d| match d {
            Declaration::Func(f) => Some(f),
            _ => None,
        })
    }

    /// Iterates over import declarations in source order.
    pub fn imports(&self) -> impl Iterator<Item = &ImportDecl> {
        self.decls.iter().filter_map(|d| match d {
            Declaration::Import(i) => Some(i),
            _ => None,
        })
    }

    /// Iterates over pipeline declarations in source order.
    pub fn pipelines(&self) -> impl Iterator<Item = &PipelineDecl> {
        self.decls.iter().filter_map(|d| match d {
            Declaration::Pipeline(p) => Some(p),
            _ => None,
        })
    }

    /// Maps function names to declarations. On a name collision the last
    /// declaration wins.
    #[must_use]
    pub fn function_index(&self) -> HashMap<&str, &FuncDecl> {
        self.functions().map(|f| (f.name.as_str(), f)).collect()
    }
}

/// Any top-level declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    /// `func Name(...) ...`
    Func(FuncDecl),
    /// `import path [as alias]`
    Import(ImportDecl),
    /// `pipeline Name { ... }`
    Pipeline(PipelineDecl),
}

impl From<FuncDecl> for Declaration {
    fn from(decl: FuncDecl) -> Self {
        Self::Func(decl)
    }
}

impl From<ImportDecl> for Declaration {
    fn from(decl: ImportDecl) -> Self {
        Self::Import(decl)
    }
}

impl From<PipelineDecl> for Declaration {
    fn from(decl: PipelineDecl) -> Self {
        Self::Pipeline(decl)
    }
}

// =============================================================================
// Functions
// =============================================================================

/// A top-level function declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    /// Function name.
    pub name: String,
    /// Span of the name token.
    pub span: Span,
    /// Parameters in order.
    pub params: Vec<Param>,
    /// Result types in order.
    pub results: Vec<ResultParam>,
    /// Attached decorators in source order.
    pub decorators: Vec<Decorator>,
}

impl FuncDecl {
    /// Creates a function with no parameters, results, or decorators.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
            params: Vec::new(),
            results: Vec::new(),
            decorators: Vec::new(),
        }
    }

    /// Sets the name span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Appends a result.
    #[must_use]
    pub fn with_result(mut self, result: ResultParam) -> Self {
        self.results.push(result);
        self
    }

    /// Attaches a decorator.
    #[must_use]
    pub fn with_decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    /// Returns true if any decorator is attached.
    #[must_use]
    pub fn is_decorated(&self) -> bool {
        !self.decorators.is_empty()
    }

    /// Factory functions (`New...`) build workers rather than being one.
    #[must_use]
    pub fn is_factory(&self) -> bool {
        self.name.starts_with("New")
    }
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    /// Binding name.
    pub name: String,
    /// Type token as written.
    pub ty: String,
    /// Span of the parameter.
    pub span: Span,
}

impl Param {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            span: Span::default(),
        }
    }

    /// Sets the span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// A function result.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultParam {
    /// Type token as written.
    pub ty: String,
    /// Span of the result.
    pub span: Span,
}

impl ResultParam {
    /// Creates a result.
    #[must_use]
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            span: Span::default(),
        }
    }

    /// Sets the span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

// =============================================================================
// Decorators and Arguments
// =============================================================================

/// A decorator such as `@deprecated("use V2")` or `@pkg.Trace`.
#[derive(Clone, Debug, PartialEq)]
pub struct Decorator {
    /// Name as written; may be dotted.
    pub name: String,
    /// Span of the decorator.
    pub span: Span,
    /// Arguments in order.
    pub args: Vec<Argument>,
}

impl Decorator {
    /// Creates a decorator with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
            args: Vec::new(),
        }
    }

    /// Sets the span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Appends an argument.
    #[must_use]
    pub fn with_arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    /// The pipe-joined literal text of every argument, in order.
    ///
    /// Two applications of the same decorator conflict when these differ.
    #[must_use]
    pub fn canonical_args(&self) -> String {
        self.args
            .iter()
            .map(Argument::literal_text)
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// What kind of token an [`Argument`] holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgumentKind {
    /// A string literal.
    String,
    /// An identifier, possibly dotted.
    Ident,
    /// An integer or float literal.
    Number,
    /// A `key=value` pair.
    KeyValue,
    /// Anything else (calls, operators, composite literals).
    Other,
}

/// A decorator or step argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    /// Token text as written (string literals keep their quotes).
    pub text: String,
    /// Span of the argument.
    pub span: Span,
    /// True if the parser saw a string literal.
    pub is_string: bool,
}

impl Argument {
    /// Creates a non-string argument from its text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            span: Span::default(),
            is_string: false,
        }
    }

    /// Creates a string-literal argument holding `value`.
    #[must_use]
    pub fn string(value: impl fmt::Display) -> Self {
        Self {
            text: format!("\"{value}\""),
            span: Span::default(),
            is_string: true,
        }
    }

    /// Sets the span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Classifies the argument.
    #[must_use]
    pub fn kind(&self) -> ArgumentKind {
        if self.is_string {
            return ArgumentKind::String;
        }
        let text = self.text.trim();
        if text::split_key_value(text).is_some() {
            ArgumentKind::KeyValue
        } else if text::is_number_literal(text) {
            ArgumentKind::Number
        } else if text::is_identifier_path(text) {
            ArgumentKind::Ident
        } else {
            ArgumentKind::Other
        }
    }

    /// The literal text used for canonical comparison: the identifier name,
    /// the string value, or the numeric text. Other kinds yield `""`.
    #[must_use]
    pub fn literal_text(&self) -> &str {
        match self.kind() {
            ArgumentKind::String => text::trim_quotes(self.text.trim()),
            ArgumentKind::Ident | ArgumentKind::Number => self.text.trim(),
            ArgumentKind::KeyValue | ArgumentKind::Other => "",
        }
    }
}

// =============================================================================
// Imports
// =============================================================================

/// An import declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportDecl {
    /// Import path, e.g. `acme/stages`.
    pub path: String,
    /// Explicit alias, if given.
    pub alias: Option<String>,
    /// Span of the declaration.
    pub span: Span,
}

impl ImportDecl {
    /// Creates an import without an alias.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            alias: None,
            span: Span::default(),
        }
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

// =============================================================================
// Pipelines
// =============================================================================

/// A pipeline declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineDecl {
    /// Pipeline name.
    pub name: String,
    /// Span of the declaration.
    pub span: Span,
    /// Body statements in order.
    pub statements: Vec<Statement>,
}

impl PipelineDecl {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
            statements: Vec::new(),
        }
    }

    /// Sets the span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Appends a step statement.
    #[must_use]
    pub fn with_step(mut self, step: StepStmt) -> Self {
        self.statements.push(Statement::Step(step));
        self
    }

    /// Appends a statement this analysis does not inspect.
    #[must_use]
    pub fn with_other(mut self, text: impl Into<String>, span: Span) -> Self {
        self.statements.push(Statement::Other {
            text: text.into(),
            span,
        });
        self
    }

    /// Iterates over step statements in order.
    pub fn steps(&self) -> impl Iterator<Item = &StepStmt> {
        self.statements.iter().filter_map(|s| match s {
            Statement::Step(step) => Some(step),
            Statement::Other { .. } => None,
        })
    }
}

/// A statement in a pipeline body.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// `Name(args) [attrs]`
    Step(StepStmt),
    /// Any other statement, kept as text.
    Other {
        /// Statement text.
        text: String,
        /// Span of the statement.
        span: Span,
    },
}

/// The stage a step statement binds a worker to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Source stage.
    Ingress,
    /// Intermediate stage.
    Transform,
    /// Sink stage.
    Egress,
}

impl StepKind {
    /// Matches a step name case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("ingress") {
            Some(Self::Ingress)
        } else if name.eq_ignore_ascii_case("transform") {
            Some(Self::Transform)
        } else if name.eq_ignore_ascii_case("egress") {
            Some(Self::Egress)
        } else {
            None
        }
    }

    /// Returns the lowercase stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingress => "ingress",
            Self::Transform => "transform",
            Self::Egress => "egress",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A step statement such as `Transform(worker=Enrich) retries=3`.
#[derive(Clone, Debug, PartialEq)]
pub struct StepStmt {
    /// Step name as written.
    pub name: String,
    /// Span of the statement.
    pub span: Span,
    /// Arguments in order.
    pub args: Vec<Argument>,
    /// Trailing `key=value` attributes.
    pub attrs: Vec<Attribute>,
    /// Span of the opening parenthesis, if the step has an argument list.
    pub lparen: Option<Span>,
}

impl StepStmt {
    /// Creates a step with no arguments.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            span: Span::default(),
            args: Vec::new(),
            attrs: Vec::new(),
            lparen: None,
        }
    }

    /// Sets the span.
    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Appends an argument; the step gains a parenthesized list.
    #[must_use]
    pub fn with_arg(mut self, arg: Argument) -> Self {
        if self.lparen.is_none() {
            self.lparen = Some(self.span);
        }
        self.args.push(arg);
        self
    }

    /// Appends an attribute.
    #[must_use]
    pub fn with_attr(mut self, attr: Attribute) -> Self {
        self.attrs.push(attr);
        self
    }

    /// Returns the stage kind if this step binds a worker.
    #[must_use]
    pub fn kind(&self) -> Option<StepKind> {
        StepKind::from_name(&self.name)
    }

    /// Returns true if the step was written with parentheses.
    #[must_use]
    pub fn has_parens(&self) -> bool {
        self.lparen.is_some()
    }
}

/// A `key=value` step attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value as written.
    pub value: String,
    /// Span of the attribute.
    pub span: Span,
}

impl Attribute {
    /// Creates an attribute.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            span: Span::default(),
        }
    }
}
