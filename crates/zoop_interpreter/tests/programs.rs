use log::info;
use test_log::test;
use zoop_interpreter::{RuntimeErrorKind, ZoopError};
use zoop_tokens::spanned::{Position, Positioned};

mod common;

#[test]
fn sum_of_immutables() {
    let (console, result) = common::run_file("sum.zoop", &[]);
    result.unwrap();
    assert_eq!(console.output(), ["8"]);
}

#[test]
fn void_zoop_prints_once() {
    let (console, result) = common::run_file("hello.zoop", &[]);
    result.unwrap();
    assert_eq!(console.output(), ["hello from a zoop"]);
}

#[test]
fn inline_and_block_conditions() {
    let (console, result) = common::run_file("conditions.zoop", &[]);
    result.unwrap();
    assert_eq!(console.output(), ["a", "b", "medium"]);
}

#[test]
fn loop_ends_after_five_ticks() {
    let (console, result) = common::run_file("counter.zoop", &[]);
    result.unwrap();
    assert_eq!(
        console.output(),
        ["tick 1", "tick 2", "tick 3", "tick 4", "tick 5", "final 5"]
    );
}

#[test]
fn recursive_factorial() {
    let (console, result) = common::run_file("factorial.zoop", &[]);
    result.unwrap();
    assert_eq!(
        console.output(),
        [
            "fact(1) = 1",
            "fact(2) = 2",
            "fact(3) = 6",
            "fact(4) = 24",
            "fact(5) = 120",
            "fact(6) = 720"
        ]
    );
}

#[test]
fn greeter_reads_input() {
    let (console, result) = common::run_file("greeter.zoop", &["Ada", "36"]);
    result.unwrap();
    assert_eq!(console.prompts(), ["<-| Name? ", "<-| Age? "]);
    assert_eq!(
        console.output(),
        ["hello Ada", "next year you turn 37", "18 halves"]
    );
}

#[test]
fn greeter_rejects_bad_age() {
    let (console, result) = common::run_file("greeter.zoop", &["Ada", "thirty"]);
    let Err(ZoopError::Runtime(err)) = result else {
        panic!("expected a runtime error");
    };
    assert_eq!(
        err.kind,
        RuntimeErrorKind::InvalidInput {
            ty: zoop_ast::types::DataType::Uint,
            input: "thirty".to_string()
        }
    );
    assert!(console.output().is_empty());
}

#[test]
fn nested_blocks_update_outer_variable() {
    let (console, result) = common::run_file("scopes.zoop", &[]);
    result.unwrap();
    assert_eq!(console.output(), ["3", "0.75"]);
}

#[test]
fn undefined_variable_reports_its_position() {
    let source = std::fs::read_to_string(common::zoop_file("missing_variable.zoop")).unwrap();
    let (console, result) = common::run_source(&source, &[]);
    assert_eq!(console.output(), ["1"]);
    let err = result.unwrap_err();
    assert_eq!(err.position(), Position::new(3, 0));
    let rendered = err.render(&source).to_string();
    info!("rendered: {rendered}");
    assert_eq!(
        rendered,
        "\nRuntime Error: Undefined variable '@missing' (3,0)\n@missing ->|\n^"
    );
}

#[test]
fn numeric_literals_keep_their_type() {
    let source = "$a:int <- 3\n$b:dec <- 3.0\n$c:uint <- 3u\n$d:udec <- 3.0u\n$a ->|\n$b ->|\n$c ->|\n$d ->|";
    let (console, result) = common::run_source(source, &[]);
    result.unwrap();
    assert_eq!(console.output(), ["3", "3", "3", "3"]);
}

#[test]
fn division_by_zero_never_yields_infinity() {
    for source in ["1 / 0 ->|", "2.5 / 0.0 ->|", "$z:int <- 0\n7 / $z ->|"] {
        let (console, result) = common::run_source(source, &[]);
        let Err(ZoopError::Runtime(err)) = result else {
            panic!("{source:?} should fail at runtime");
        };
        assert_eq!(err.kind, RuntimeErrorKind::DivisionByZero);
        assert!(console.output().is_empty());
    }
}

#[test]
fn block_bindings_are_scoped() {
    let (console, result) = common::run_source("{\n@inner:int <- 1\n}\n@inner ->|", &[]);
    assert!(console.output().is_empty());
    assert_eq!(result.unwrap_err().position(), Position::new(4, 0));
}

#[test]
fn twenty_first_nested_call_overflows() {
    let source = "zoop `deep` <- $n:int\nif $n = 20 => \"deepest\" ->|\nif $n < 25 => `deep`de $n + 1\nend zoop\n`deep`de 0";
    let (console, result) = common::run_source(source, &[]);
    let Err(ZoopError::Runtime(err)) = result else {
        panic!("expected a runtime error");
    };
    assert_eq!(err.kind, RuntimeErrorKind::ContextOverflow);
    assert!(console.output().is_empty());

    let source = "zoop `deep` <- $n:int\nif $n = 19 => \"deepest\" ->|\nif $n < 19 => `deep`de $n + 1\nend zoop\n`deep`de 0";
    let (console, result) = common::run_source(source, &[]);
    result.unwrap();
    assert_eq!(console.output(), ["deepest"]);
}

#[test]
fn reassignment_casts_between_numeric_types() {
    let (console, result) = common::run_source("@x:int <- 5\n@x <- 5.0\n@x ->|", &[]);
    result.unwrap();
    assert_eq!(console.output(), ["5"]);

    let (_, result) = common::run_source("@x:int <- 5\n@x <- \"s\"", &[]);
    assert!(matches!(
        result,
        Err(ZoopError::Runtime(err)) if matches!(err.kind, RuntimeErrorKind::AssignType { .. })
    ));
}

#[test]
fn syntax_errors_stop_before_running() {
    let (console, result) = common::run_source("\"never\" ->|\nend", &[]);
    assert!(console.output().is_empty());
    let err = result.unwrap_err();
    assert_eq!(err.category(), "Syntax Error");
    assert_eq!(err.message(), "End statements can be used only inside loops");
}
