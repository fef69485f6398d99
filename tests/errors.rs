use formulet::{
    CompilationOptions, Context, Error, EvalError, Node, Value, compile, compile_async,
    compile_with_options, evaluate, render_error_to_string_no_color,
};
use pretty_assertions::assert_eq;

#[test]
fn syntax_error_renders_with_source() {
    let err = compile("one +").unwrap_err();
    assert!(matches!(err, Error::Compilation { .. }));
    let output = render_error_to_string_no_color(&err);
    assert!(output.contains("one +"));
    assert!(output.contains("P001"));
}

#[test]
fn nesting_limit_is_configurable() {
    let options = CompilationOptions { max_parse_depth: 3 };
    assert!(compile_with_options("[[[1]]]", options).is_ok());
    let err = compile_with_options("[[[[1]]]]", options).unwrap_err();
    assert!(render_error_to_string_no_color(&err).contains("P004"));
}

#[tokio::test]
async fn long_prefix_runs_are_rejected_at_compile_time() {
    let source = "!".repeat(400) + "x";
    assert!(matches!(compile(&source), Err(Error::Compilation { .. })));
    assert!(matches!(compile_async(&source), Err(Error::Compilation { .. })));

    let source = "!".repeat(120) + "x";
    let ctx = Context::empty();
    assert_eq!(compile(&source).unwrap().evaluate(&ctx).unwrap(), Value::from(false));
    assert_eq!(
        compile_async(&source).unwrap().evaluate(&ctx).await.unwrap(),
        Value::from(false)
    );
}

#[test]
fn nullish_member_access_fails() {
    let expr = compile("settings.theme").unwrap();
    let err = expr.evaluate(&Context::empty()).unwrap_err();
    assert!(matches!(err, EvalError::NullishProperty { .. }));
    assert_eq!(
        err.to_string(),
        "cannot read properties of undefined (reading 'theme')"
    );
}

#[test]
fn unknown_operator_from_foreign_tree() {
    let node = Node::binary("**", Node::literal(2.0), Node::literal(8.0));
    let err = evaluate(&node, &Context::empty()).unwrap_err();
    assert_eq!(err.to_string(), "unknown operator '**'");
}

#[test]
fn unknown_node_kind_from_json_is_undefined() {
    let expr = formulet::CompiledExpression::from_json(
        r#"{"type": "Compound", "body": []}"#,
    )
    .unwrap();
    assert_eq!(expr.evaluate(&Context::empty()).unwrap(), Value::Undefined);
}

#[test]
fn host_errors_keep_their_type() {
    #[derive(Debug)]
    struct Offline;

    impl std::fmt::Display for Offline {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "offline")
        }
    }

    impl std::error::Error for Offline {}

    let ctx = Context::builder()
        .function("fetch", |_this, _args| Err(EvalError::host(Offline)))
        .build();
    let err = compile("fetch()").unwrap().evaluate(&ctx).unwrap_err();
    match err {
        EvalError::Host(inner) => assert!(inner.is::<Offline>()),
        other => panic!("expected host error, got {other:?}"),
    }
}
