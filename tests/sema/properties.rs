//! Property-based tests for the validators

use conduit_foundation::DiagnosticCode;
use conduit_language::{
    Argument, Decorator, FuncDecl, ImportDecl, Param, PipelineDecl, ResultParam, SourceFile,
    StepStmt,
};
use conduit_sema::{AnalysisConfig, Analyzer, DecoratorValidator, WorkerValidator};
use proptest::prelude::*;

fn type_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Event".to_string()),
        Just("Event<T>".to_string()),
        Just("Event<*T>".to_string()),
        Just("Event<&T>".to_string()),
        Just("error".to_string()),
        Just("int".to_string()),
        "[A-Z][a-z]{0,4}".prop_map(String::from),
    ]
}

fn decorator() -> impl Strategy<Value = Decorator> {
    let name = prop_oneof![
        Just(String::new()),
        Just("deprecated".to_string()),
        Just("metrics".to_string()),
        Just("pkg.metrics".to_string()),
        "[a-z]{1,5}".prop_map(String::from),
    ];
    let arg = prop_oneof![
        "[0-9]{1,2}".prop_map(Argument::new),
        "[a-z]{1,3}".prop_map(Argument::new),
        "[a-z ]{0,4}".prop_map(Argument::string),
    ];
    (name, prop::collection::vec(arg, 0..3)).prop_map(|(name, args)| {
        args.into_iter()
            .fold(Decorator::new(name), Decorator::with_arg)
    })
}

fn function() -> impl Strategy<Value = FuncDecl> {
    (
        "(New)?[A-F]",
        prop::collection::vec(type_token(), 0..3),
        prop::collection::vec(type_token(), 0..3),
        prop::collection::vec(decorator(), 0..4),
    )
        .prop_map(|(name, params, results, decorators)| {
            let func = params
                .into_iter()
                .fold(FuncDecl::new(name), |f, ty| f.with_param(Param::new("p", ty)));
            let func = results
                .into_iter()
                .fold(func, |f, ty| f.with_result(ResultParam::new(ty)));
            decorators.into_iter().fold(func, FuncDecl::with_decorator)
        })
}

fn step() -> impl Strategy<Value = StepStmt> {
    let name = prop_oneof![
        Just("Transform"),
        Just("ingress"),
        Just("EGRESS"),
        Just("Collect")
    ];
    let worker = prop_oneof![
        "[A-F]".prop_map(String::from),
        "New[A-F]".prop_map(String::from),
        "(alpha|beta)\\.[A-F]".prop_map(String::from),
        Just("func(ev Event<T>) (Event<U>, error) {}".to_string()),
        Just("func(ev Event<*T>) error".to_string()),
        Just("func(a int){}".to_string()),
        Just("worker=C".to_string()),
        Just("\"\"".to_string()),
    ];
    (name, worker).prop_map(|(name, worker)| StepStmt::new(name).with_arg(Argument::new(worker)))
}

fn source_file() -> impl Strategy<Value = SourceFile> {
    (
        prop::collection::vec(function(), 0..6),
        prop::collection::vec(step(), 0..6),
    )
        .prop_map(|(functions, steps)| {
            let file = SourceFile::new().with(ImportDecl::new("acme/alpha"));
            let file = functions.into_iter().fold(file, SourceFile::with);
            let pipeline = steps
                .into_iter()
                .fold(PipelineDecl::new("P"), PipelineDecl::with_step);
            file.with(pipeline)
        })
}

proptest! {
    #[test]
    fn validators_are_idempotent(file in source_file()) {
        let config = AnalysisConfig::deterministic();
        let decorators = DecoratorValidator::new(&config);
        let workers = WorkerValidator::new(&config);

        prop_assert_eq!(decorators.validate(&file), decorators.validate(&file));
        prop_assert_eq!(workers.validate(&file), workers.validate(&file));
    }

    #[test]
    fn analyzer_is_decorators_then_workers(file in source_file()) {
        let config = AnalysisConfig::deterministic();
        let mut expected = DecoratorValidator::new(&config).validate(&file);
        expected.extend(WorkerValidator::new(&config).validate(&file));

        let report = Analyzer::new(config).analyze(&file);
        prop_assert_eq!(report.into_diagnostics(), expected);
    }

    #[test]
    fn worker_shape_decoration_reported_once(
        decorators in prop::collection::vec(decorator(), 1..6)
    ) {
        let func = decorators.into_iter().fold(
            FuncDecl::new("W")
                .with_param(Param::new("ev", "Event<T>"))
                .with_result(ResultParam::new("Event<U>"))
                .with_result(ResultParam::new("error")),
            FuncDecl::with_decorator,
        );
        let diags = DecoratorValidator::new(&AnalysisConfig::deterministic())
            .validate(&SourceFile::new().with(func));
        let count = diags
            .iter()
            .filter(|d| d.code == DiagnosticCode::DecoratorOnWorker)
            .count();
        prop_assert_eq!(count, 1);
    }

    #[test]
    fn undefined_workers_never_get_signature_errors(name in "[G-Z][a-z]{0,5}") {
        let file = SourceFile::new().with(
            PipelineDecl::new("P")
                .with_step(StepStmt::new("Transform").with_arg(Argument::new(name))),
        );
        let codes: Vec<_> = WorkerValidator::new(&AnalysisConfig::deterministic())
            .validate(&file)
            .into_iter()
            .map(|d| d.code)
            .collect();
        prop_assert_eq!(codes, vec![DiagnosticCode::WorkerUndefined]);
    }
}
