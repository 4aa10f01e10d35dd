//! End-to-end tests driving whole Monkey programs through the public API.

use rmonkey_lib::{
    environment::Environment,
    interpreter::{Interpreter, RuntimeError},
    object::Object,
    parser::Parser,
};
use std::{cell::RefCell, rc::Rc};

fn run(source: &str) -> Result<Object, RuntimeError> {
    let program = Parser::parse(source)
        .unwrap_or_else(|errors| panic!("parse errors in {source:?}: {errors:#?}"));
    Interpreter::interpret(&program, &Rc::new(RefCell::new(Environment::default())))
}

fn assert_result(source: &str, expected: Object) {
    match run(source) {
        Ok(value) => assert_eq!(value, expected, "source: {source:?}"),
        Err(error) => panic!("script failed: {error}\nsource: {source:?}"),
    }
}

fn assert_error(source: &str, expected: &str) {
    match run(source) {
        Err(error) => assert_eq!(error.to_string(), expected, "source: {source:?}"),
        Ok(value) => panic!("script succeeded with {value:?} but was expected to fail\nsource: {source:?}"),
    }
}

#[test]
fn arithmetic() {
    assert_result("(5 + 10 * 2 + 15 / 3) * 2 + -10", Object::Integer(50));
}

#[test]
fn nested_returns_exit_the_right_scope() {
    assert_result(
        "if (10 > 1) { if (10 > 1) { return 10; } return 1; }",
        Object::Integer(10),
    );

    // The same shape inside a function returns from the function, not the
    // program.
    assert_result(
        concat!(
            "let pick = func(n) { if (n > 1) { if (n > 1) { return n; } return 1; } };\n",
            "pick(7) + 1;",
        ),
        Object::Integer(8),
    );
}

#[test]
fn type_mismatch_is_reported() {
    assert_error(
        "5 + true;",
        "Error: operand type mismatch for operator \"+\" : INTEGER + BOOLEAN",
    );
}

#[test]
fn closures() {
    assert_result(
        concat!(
            "let newAdder = func(x) { func(y) { x + y }; };\n",
            "let addTwo = newAdder(2);\n",
            "addTwo(2);",
        ),
        Object::Integer(4),
    );
}

#[test]
fn unknown_identifier_is_reported() {
    assert_error("foobar", "Error: identifier not found: foobar");
}

#[test]
fn strings_and_len() {
    assert_result(
        "\"Hello\" + \" \" + \"World\"",
        Object::String("Hello World".to_string()),
    );
    assert_result("len(\"\")", Object::Integer(0));
}

#[test]
fn higher_order_functions() {
    assert_result(
        concat!(
            "let twice = func(f, x) { f(f(x)) };\n",
            "let inc = func(n) { n + 1 };\n",
            "twice(inc, 5);",
        ),
        Object::Integer(7),
    );
}

#[test]
fn recursion_terminates() {
    assert_result(
        concat!(
            "let countdown = func(n) { if (n == 0) { 0 } else { countdown(n - 1) } };\n",
            "countdown(100);",
        ),
        Object::Integer(0),
    );
}

#[test]
fn environment_persists_across_programs() {
    // The REPL evaluates each line as its own program against one shared
    // environment.
    let env = Rc::new(RefCell::new(Environment::default()));

    for line in ["let a = 2;", "let addA = func(x) { x + a };"] {
        let program = Parser::parse(line).expect("line should parse");
        Interpreter::interpret(&program, &env).expect("line should evaluate");
    }

    let program = Parser::parse("addA(40)").expect("line should parse");
    assert_eq!(
        Interpreter::interpret(&program, &env),
        Ok(Object::Integer(42))
    );
}

#[test]
fn parse_errors_are_collected_not_thrown() {
    let errors = Parser::parse("let x 5; @").unwrap_err();
    assert!(!errors.is_empty());
}
