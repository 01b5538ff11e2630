//! Environment tests

use pretty_assertions::assert_eq;
use wick::*;

// ═══════════════════════════════════════════════════════════════════════
// Bindings
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_environment_new_is_empty() {
    let env = Environment::new();
    assert!(env.is_empty());
    assert_eq!(env.len(), 0);
    assert_eq!(env.depth(), 0);
    assert_eq!(env.block_depth(), 0);
}

#[test]
fn test_environment_same_name_different_context() {
    let mut env = Environment::new();
    env.define(BindingKey::new(Context::Preop, "-"), Value::text("negate"));
    env.define(BindingKey::new(Context::Inop1, "-"), Value::text("subtract"));

    assert_eq!(env.len(), 2);
    assert_eq!(env.lookup(Context::Preop, "-"), Some(&Value::text("negate")));
    assert_eq!(env.lookup(Context::Inop1, "-"), Some(&Value::text("subtract")));
    assert_eq!(env.lookup(Context::Inop2, "-"), None);
}

#[test]
fn test_environment_iterates_in_definition_order() {
    let mut env = Environment::new();
    env.define(BindingKey::symbol("b"), Value::from(1));
    env.define(BindingKey::symbol("a"), Value::from(2));
    env.define(BindingKey::symbol("b"), Value::from(3));

    let names: Vec<&str> = env.iter().map(|(k, _)| k.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);
}

#[test]
fn test_binding_key_display() {
    assert_eq!(BindingKey::new(Context::Inop2, ".").to_string(), "inop2 '.'");
    assert_eq!(BindingKey::symbol("x").to_string(), "symbol 'x'");
}

// ═══════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_prelude_operator_contexts() {
    let env = Environment::with_prelude();
    for context in [Context::Inop1, Context::Inop2] {
        for op in ["+", "-", "*", "/", "%"] {
            assert!(env.lookup(context, op).is_some(), "{} {}", context, op);
        }
    }
    assert!(env.lookup(Context::Preop, "-").is_some());
    assert!(env.lookup(Context::Postop, ",").is_some());
    assert!(env.lookup(Context::Inop0, "=").is_none());
}

#[test]
fn test_prelude_method_tables() {
    let env = Environment::with_prelude();
    let methods = env.methods();
    assert_eq!(methods.names("text"), vec!["split", "trim", "len"]);
    assert_eq!(methods.names("seq"), vec!["map", "len", "get", "join"]);
    assert_eq!(methods.names("number"), vec!["floor", "int"]);
    assert_eq!(methods.names("stdin"), vec!["read"]);
    assert_eq!(methods.names("stdout"), vec!["write"]);
}

#[test]
fn test_prelude_macros() {
    let env = Environment::with_prelude();
    assert!(env.macros().has_macro(&BindingKey::new(Context::Inop1, "|")));
    assert!(env.macros().has_macro(&BindingKey::new(Context::Inop2, ".")));
}

// ═══════════════════════════════════════════════════════════════════════
// Macro Scoping
// ═══════════════════════════════════════════════════════════════════════

fn marker(name: &str) -> MacroDefinition {
    let name = name.to_string();
    MacroDefinition::new(BindingKey::symbol("m"), move |_| Ok(Ast::quoted(&name)))
}

#[test]
fn test_macro_pushed_in_block_is_popped_on_exit() {
    let mut env = Environment::new();
    env.push_macro(marker("outer"));

    {
        let mut guard = env.block_guard();
        guard.push_macro(marker("inner"));
        assert_eq!(guard.macros().depth(&BindingKey::symbol("m")), 2);
        guard.finish();
    }

    let key = BindingKey::symbol("m");
    assert_eq!(env.macros().depth(&key), 1);
    let def = env.macros().get_macro(&key).unwrap();
    assert_eq!(def.expand(vec![]).unwrap(), Ast::quoted("outer"));
}

#[test]
fn test_macro_pushed_in_block_is_popped_on_error() {
    let mut interp = Interpreter::new();
    let body = Ast::block(
        BlockKind::Brace,
        vec![Ast::symbol("1"), Ast::symbol("missing")],
    );

    // Push inside a frame the block evaluation will not own
    {
        let mut guard = interp.env_mut().block_guard();
        guard.push_macro(marker("scoped"));
        let result = eval_block(std::slice::from_ref(&body), &mut guard, &EvalContext::new());
        assert!(result.is_err());
    }

    assert!(!interp.env().macros().has_macro(&BindingKey::symbol("m")));
    assert_eq!(interp.env().block_depth(), 0);
}

#[test]
fn test_builtin_push_and_pop_inside_block_keeps_pipe() {
    let mut interp = Interpreter::new();
    interp.env_mut().define_builtin(
        Context::Symbol,
        BuiltinFn::new("shadow", 0, |env, _| {
            let pipe = BindingKey::new(Context::Inop1, "|");
            env.push_macro(MacroDefinition::new(pipe.clone(), |_| Ok(Ast::quoted("shadowed"))));
            env.pop_macro(&pipe);
            Ok(Value::Undefined)
        }),
    );

    let pipe = BindingKey::new(Context::Inop1, "|");
    assert_eq!(interp.env().macros().depth(&pipe), 1);
    interp.run("{ shadow() }").unwrap();
    assert_eq!(interp.env().macros().depth(&pipe), 1);
    assert_eq!(
        interp.run("'a b' | split('')").unwrap().to_string(),
        r#"["a", "b"]"#
    );
}

#[test]
fn test_macro_pushed_at_top_level_persists() {
    let mut env = Environment::new();
    env.push_macro(marker("top"));
    assert_eq!(env.macros().depth(&BindingKey::symbol("m")), 1);
    assert!(env.pop_macro(&BindingKey::symbol("m")));
    assert!(!env.pop_macro(&BindingKey::symbol("m")));
}

// ═══════════════════════════════════════════════════════════════════════
// Depth Tracking
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_depth_limit() {
    let mut env = Environment::new();
    env.enter(2).unwrap();
    env.enter(2).unwrap();
    let err = env.enter(2).unwrap_err();
    assert!(matches!(err, EvalError::DepthExceeded { depth: 3, max: 2 }));
    env.exit();
    env.exit();
    assert_eq!(env.depth(), 0);
}
