//! End-to-end tests of the full compile/execute pipeline.

use stacklet_core::vm::{CollectingTracer, NullTracer, TraceEvent};
use stacklet_core::{Error, RuntimeError, compile, eval, parse, run, tokenize};

/// Evaluate source and return one variable's final value.
fn final_value(source: &str, name: &str) -> i64 {
    eval(source)
        .expect("program should run")
        .get(name)
        .expect("variable should be bound")
}

#[test]
fn test_operator_precedence() {
    assert_eq!(final_value("var r = 2+3*4;", "r"), 14);
    assert_eq!(final_value("var r = (1+2)*3;", "r"), 9);
}

#[test]
fn test_left_associativity() {
    assert_eq!(final_value("var r = 10-3-2;", "r"), 5);
    assert_eq!(final_value("var r = 100/10/5;", "r"), 2);
}

#[test]
fn test_division_truncates_toward_zero() {
    assert_eq!(final_value("var r = 7/2;", "r"), 3);
    assert_eq!(final_value("var a = 0 - 7; var r = a / 2;", "r"), -3);
}

#[test]
fn test_division_by_zero_is_runtime_error() {
    assert_eq!(
        eval("var r = 1/0;").unwrap_err(),
        Error::Runtime(RuntimeError::DivisionByZero)
    );
}

#[test]
fn test_variable_lifecycle() {
    let env = eval("var x = 42; x = x + 3;").unwrap();
    assert_eq!(env.len(), 1);
    assert_eq!(env.get("x"), Some(45));
}

#[test]
fn test_unbound_variable_read() {
    assert_eq!(
        eval("y = y + 1;").unwrap_err(),
        Error::Runtime(RuntimeError::UnboundVariable("y".to_string()))
    );
}

#[test]
fn test_malformed_declaration() {
    let err = parse("var = 5;").unwrap_err();
    match err {
        Error::Parse { expected, .. } => assert_eq!(expected, "identifier"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_round_trip_completeness() {
    // A well-formed parse consumes every token up to and including END.
    let source = "var x = 1 + 2; x = x * x;";
    let token_count = tokenize(source)
        .map(|t| t.expect("should scan"))
        .count();
    assert_eq!(token_count, 14); // 13 tokens + END
    assert!(parse(source).is_ok());
}

#[test]
fn test_end_to_end_scenario() {
    let source = "var z = (1+2)*3;";

    // Token stream, rendered.
    let tokens: Vec<String> = tokenize(source)
        .map(|t| t.expect("should scan").to_string())
        .collect();
    assert_eq!(
        tokens,
        vec![
            "KEYWORD('var')",
            "IDENTIFIER('z')",
            "OPERATOR('=')",
            "PUNCTUATION('(')",
            "NUMBER('1')",
            "OPERATOR('+')",
            "NUMBER('2')",
            "PUNCTUATION(')')",
            "OPERATOR('*')",
            "NUMBER('3')",
            "PUNCTUATION(';')",
            "END('')",
        ]
    );

    // Bytecode, rendered.
    let code = compile(source).unwrap();
    let listing: Vec<String> = code.iter().map(|i| i.to_string()).collect();
    assert_eq!(
        listing,
        vec![
            "LOAD_CONST 1",
            "LOAD_CONST 2",
            "BINARY_+",
            "LOAD_CONST 3",
            "BINARY_*",
            "STORE_VAR z",
        ]
    );

    // Final environment.
    let env = run(&code, &mut NullTracer).unwrap();
    assert_eq!(env.get("z"), Some(9));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_lex_error_carries_position_and_character() {
    assert_eq!(
        parse("var x = 1 @ 2;").unwrap_err(),
        Error::Lex {
            position: 10,
            found: '@'
        }
    );
}

#[test]
fn test_invalid_assignment_target_fails_at_generation() {
    let program = parse("(1+2) = 3;").unwrap();
    assert!(stacklet_core::generate(&program).is_err());
}

#[test]
fn test_trace_renders_execution_steps() {
    let code = compile("var x = 42; x = x + 3;").unwrap();
    let mut tracer = CollectingTracer::new();
    let env = run(&code, &mut tracer).unwrap();
    assert_eq!(env.get("x"), Some(45));

    let lines: Vec<String> = tracer.events.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "PUSH 42",
            "STORE x = 42",
            "LOAD x = 42",
            "PUSH 3",
            "ADD: 42 + 3 = 45",
            "STORE x = 45",
        ]
    );
}

#[test]
fn test_bare_expression_statement_keeps_stack_balanced() {
    // The trailing bare expression is evaluated and then discarded.
    let code = compile("var x = 2; x * x; var y = 1;").unwrap();
    let mut tracer = CollectingTracer::new();
    let env = run(&code, &mut tracer).unwrap();
    assert_eq!(env.get("y"), Some(1));
    assert!(tracer
        .events
        .contains(&TraceEvent::Pop { value: 4 }));
}

#[test]
fn test_whitespace_insensitive_source() {
    assert_eq!(
        eval("var x=1;x=x+2;").unwrap(),
        eval("  var x = 1 ;\n  x = x + 2 ;\n").unwrap()
    );
}
