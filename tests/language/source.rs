//! Integration tests for the source model

use conduit_language::{
    Argument, ArgumentKind, Attribute, Decorator, FuncDecl, ImportDecl, PipelineDecl, SourceFile,
    StepKind, StepStmt,
};

fn file() -> SourceFile {
    SourceFile::new()
        .with_path("orders.cdt")
        .with(ImportDecl::new("acme/stages"))
        .with(FuncDecl::new("Enrich"))
        .with(
            PipelineDecl::new("Orders")
                .with_step(StepStmt::new("Ingress").with_arg(Argument::new("stages.Kafka")))
                .with_step(
                    StepStmt::new("Transform")
                        .with_arg(Argument::new("Enrich"))
                        .with_attr(Attribute::new("retries", "3")),
                ),
        )
        .with(FuncDecl::new("Audit"))
}

#[test]
fn declarations_keep_source_order() {
    let file = file();
    let names: Vec<_> = file.functions().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["Enrich", "Audit"]);
    assert_eq!(file.imports().count(), 1);
    assert_eq!(file.pipelines().count(), 1);
    assert_eq!(file.path.as_deref(), Some("orders.cdt"));
}

#[test]
fn steps_expose_kind_and_attrs() {
    let file = file();
    let pipeline = file.pipelines().next().unwrap();
    let kinds: Vec<_> = pipeline.steps().filter_map(StepStmt::kind).collect();
    assert_eq!(kinds, vec![StepKind::Ingress, StepKind::Transform]);
    assert_eq!(pipeline.steps().nth(1).unwrap().attrs[0].key, "retries");
}

#[test]
fn step_without_args_has_no_parens() {
    assert!(!StepStmt::new("Egress").has_parens());
}

#[test]
fn string_arguments_canonicalize_to_value() {
    let arg = Argument::string("since v2");
    assert_eq!(arg.kind(), ArgumentKind::String);
    assert_eq!(arg.literal_text(), "since v2");
}

#[test]
fn canonical_text_distinguishes_argument_lists() {
    let a = Decorator::new("metrics").with_arg(Argument::new("1"));
    let b = Decorator::new("metrics").with_arg(Argument::new("2"));
    let c = Decorator::new("metrics")
        .with_arg(Argument::new("1"))
        .with_arg(Argument::new("x"));
    assert_ne!(a.canonical_args(), b.canonical_args());
    assert_eq!(c.canonical_args(), "1|x");
}
