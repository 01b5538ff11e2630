//! End-to-end evaluation tests

use std::io::Cursor;

use pretty_assertions::assert_eq;
use wick::*;

// Helper to run a program with the prelude on empty streams
fn eval(src: &str) -> Result<Value> {
    Interpreter::new()
        .with_stdio(Stdio::new(Cursor::new(""), SharedBuffer::new(), SharedBuffer::new()))
        .run(src)
}

// Helper that runs with the given input and returns the output too
fn eval_io(src: &str, input: &str) -> (Result<Value>, String) {
    let out = SharedBuffer::new();
    let stdio = Stdio::new(Cursor::new(input.to_string()), out.clone(), SharedBuffer::new());
    let result = Interpreter::new().with_stdio(stdio).run(src);
    (result, out.contents())
}

fn runtime_error(src: &str) -> EvalError {
    match eval(src) {
        Err(WickError::Eval(err)) => err,
        other => panic!("expected runtime error, got {:?}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_additive_chain() {
    assert_eq!(eval("1 + 2 + 3").unwrap(), Value::Number(6.0));
    assert_eq!(eval("1 + 2 + 3").unwrap(), eval("(1 + 2) + 3").unwrap());
}

#[test]
fn test_eval_subtraction_is_left_associative() {
    assert_eq!(eval("10 - 4 - 3").unwrap(), Value::Number(3.0));
}

#[test]
fn test_eval_tight_subtraction_is_left_associative() {
    assert_eq!(eval("10-4-3").unwrap(), Value::Number(3.0));
    assert_eq!(eval("8/2/2").unwrap(), Value::Number(2.0));
}

#[test]
fn test_eval_tight_operators() {
    assert_eq!(eval("2*3 + 1").unwrap(), Value::Number(7.0));
    assert_eq!(eval("7%4").unwrap(), Value::Number(3.0));
    assert_eq!(eval("-2 + 5").unwrap(), Value::Number(3.0));
}

#[test]
fn test_eval_number_literals() {
    assert_eq!(eval("0.5").unwrap(), Value::Number(0.5));
    assert_eq!(eval("42").unwrap(), Value::Number(42.0));
}

#[test]
fn test_eval_text_concatenation() {
    assert_eq!(eval("'ab' + \"cd\"").unwrap(), Value::text("abcd"));
    assert_eq!(eval(r"'a\tb'").unwrap(), Value::text("a\tb"));
}

#[test]
fn test_eval_division_by_zero() {
    assert!(matches!(
        runtime_error("1 / 0"),
        EvalError::BuiltinError { .. }
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Blocks and Assignment
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_empty_program_is_undefined() {
    assert_eq!(eval("").unwrap(), Value::Undefined);
    assert_eq!(eval("{}").unwrap(), Value::Undefined);
}

#[test]
fn test_eval_block_is_last_statement() {
    assert_eq!(eval("{\n  a = 1\n  a + 1\n}").unwrap(), Value::Number(2.0));
}

#[test]
fn test_eval_chained_assignment() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.run("a = b = 5").unwrap(), Value::Number(5.0));
    assert_eq!(interp.run("a").unwrap(), Value::Number(5.0));
    assert_eq!(interp.run("b").unwrap(), Value::Number(5.0));
}

#[test]
fn test_eval_destructuring() {
    let mut interp = Interpreter::new();
    interp.run("pair = 1, 2").unwrap();
    interp.run("a, b = pair").unwrap();
    assert_eq!(interp.run("a").unwrap(), Value::Number(1.0));
    assert_eq!(interp.run("b").unwrap(), Value::Number(2.0));
}

#[test]
fn test_eval_destructuring_errors() {
    assert!(matches!(
        runtime_error("a, b = 1"),
        EvalError::DestructureNotSequence { targets: 2, .. }
    ));
    assert!(matches!(
        runtime_error("a, b, c = 1, 2"),
        EvalError::DestructureOutOfRange { len: 2, targets: 3 }
    ));
}

#[test]
fn test_eval_operators_can_be_rebound() {
    let mut interp = Interpreter::new();
    interp.env_mut().define_builtin(
        Context::Inop1,
        BuiltinFn::new("+", 2, |_, args| {
            Ok(Value::text(format!("{}{}", args[0], args[1])))
        }),
    );
    assert_eq!(interp.run("1 + 2").unwrap(), Value::text("12"));
    // The tight form is a different name and keeps its meaning
    assert_eq!(interp.run("1+2").unwrap(), Value::Number(3.0));
}

// ═══════════════════════════════════════════════════════════════════════
// Macros
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_pipe_is_trailing_argument() {
    let piped = eval("'1 2 3' | split('')").unwrap();
    let direct = eval("split('', '1 2 3')").unwrap();
    assert_eq!(piped, direct);
    assert_eq!(piped.to_string(), r#"["1", "2", "3"]"#);
}

#[test]
fn test_eval_pipe_chain() {
    let result = eval("'4 5' | split('') | map(int)").unwrap();
    assert_eq!(result, Value::seq(vec![Value::from(4), Value::from(5)]));
}

#[test]
fn test_eval_member_access_on_text() {
    assert_eq!(eval("'  x '.trim()").unwrap(), Value::text("x"));
    assert_eq!(eval("'abc'.len()").unwrap(), Value::Number(3.0));
}

#[test]
fn test_eval_member_access_on_bound_value() {
    let mut interp = Interpreter::new();
    interp.run("parts = 'a b'.split(' ')").unwrap();
    assert_eq!(interp.run("parts.len()").unwrap(), Value::Number(2.0));
    assert_eq!(interp.run("parts.get(1)").unwrap(), Value::text("b"));
    assert_eq!(interp.run("parts.join('+')").unwrap(), Value::text("a+b"));
}

#[test]
fn test_eval_unknown_member() {
    let err = runtime_error("'abc'.nope()");
    assert_eq!(err.to_string(), "no field or method 'nope' on type 'text'");
}

#[test]
fn test_eval_user_macro_via_environment() {
    let mut interp = Interpreter::new();
    interp.env_mut().push_macro(MacroDefinition::new(
        BindingKey::new(Context::Postop, "!"),
        |mut args| {
            let operand = args.pop().ok_or("missing operand")?;
            Ok(Ast::apply(
                Ast::reference(Context::Inop1, "*"),
                vec![operand.clone(), operand],
            ))
        },
    ));
    assert_eq!(interp.run("3!").unwrap(), Value::Number(9.0));
}

#[test]
fn test_eval_expansion_limit() {
    let mut interp = Interpreter::new().with_context(EvalContext::new().with_max_expansions(3));
    interp.env_mut().push_macro(MacroDefinition::new(
        BindingKey::new(Context::Postop, "!"),
        |args| Ok(Ast::apply(Ast::reference(Context::Postop, "!"), args)),
    ));
    let err = interp.run("3!").unwrap_err();
    assert!(matches!(
        err,
        WickError::Eval(EvalError::Expansion(ExpansionError::RecursionLimitExceeded { .. }))
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Streams
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_stdin_read() {
    let (result, _) = eval_io("stdin.read()", "hello\nworld\n");
    assert_eq!(result.unwrap(), Value::text("hello\nworld\n"));
}

#[test]
fn test_eval_stdout_write() {
    let (result, out) = eval_io("stdout.write('hi')\nstdout.write(1 + 1)", "");
    assert_eq!(result.unwrap(), Value::Undefined);
    assert_eq!(out, "hi2");
}

#[test]
fn test_eval_read_sum_write() {
    let src = "\
a, b = stdin.read() | split('') | map(int)
stdout.write(a + b)";
    let (result, out) = eval_io(src, "3 4\n");
    assert!(result.is_ok());
    assert_eq!(out, "7");
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_eval_scan_error_surfaces() {
    match eval("\"") {
        Err(WickError::Scan(err)) => {
            assert_eq!((err.position(), err.line()), (0, 1));
        }
        other => panic!("expected scan error, got {:?}", other),
    }
}

#[test]
fn test_eval_undefined_name() {
    let err = runtime_error("undefinedName");
    assert!(matches!(
        err,
        EvalError::UndefinedName { ref name, context: Context::Symbol } if name == "undefinedName"
    ));
    assert_eq!(
        err.to_string(),
        "undefined name: 'undefinedName' of type 'symbol'"
    );
}

#[test]
fn test_eval_applying_text_to_arguments() {
    assert!(matches!(
        runtime_error("'a' 1"),
        EvalError::NotCallable { .. }
    ));
}

// ═══════════════════════════════════════════════════════════════════════
// Deep Nesting
// ═══════════════════════════════════════════════════════════════════════

fn parens(depth: usize) -> String {
    format!("{}1{}", "(".repeat(depth), ")".repeat(depth))
}

fn additions(terms: usize) -> String {
    let mut src = "1".to_string();
    for _ in 1..terms {
        src.push_str(" + 1");
    }
    src
}

#[test]
fn test_eval_deeply_nested_parens() {
    assert_eq!(eval(&parens(300)).unwrap(), Value::Number(1.0));
    assert_eq!(eval(&parens(500)).unwrap(), Value::Number(1.0));
}

#[test]
fn test_eval_long_additive_chain() {
    assert_eq!(eval(&additions(800)).unwrap(), Value::Number(800.0));
}

#[test]
fn test_eval_nesting_past_depth_limit_is_an_error() {
    assert!(matches!(
        runtime_error(&parens(wick::parse::MAX_NESTING)),
        EvalError::DepthExceeded { max: 1000, .. }
    ));
}

#[test]
fn test_eval_small_depth_limit_fires_before_stack_runs_out() {
    let mut interp = Interpreter::new().with_context(EvalContext::new().with_max_depth(50));
    let err = interp.run(&parens(200)).unwrap_err();
    assert!(matches!(
        err,
        WickError::Eval(EvalError::DepthExceeded { max: 50, .. })
    ));
    assert_eq!(interp.env().depth(), 0);
    assert_eq!(interp.env().block_depth(), 0);
}

#[test]
fn test_eval_error_keeps_earlier_bindings() {
    let mut interp = Interpreter::new();
    assert!(interp.run("kept = 1\nmissing").is_err());
    assert_eq!(interp.run("kept").unwrap(), Value::Number(1.0));
    assert_eq!(interp.env().depth(), 0);
}
