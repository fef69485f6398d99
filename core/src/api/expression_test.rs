use pretty_assertions::assert_eq;

use super::*;
use crate::{Context, Node, Value, evaluator::EvalError};

fn numbers() -> Context {
    Context::builder()
        .register("x", Value::from(3))
        .register("y", Value::from(4))
        .build()
}

#[test]
fn test_compile_is_reusable() {
    let expr = compile("x * y").unwrap();
    assert_eq!(expr.evaluate(&numbers()).unwrap(), Value::from(12));

    let other = Context::builder()
        .register("x", Value::from("ab"))
        .register("y", Value::from(2))
        .build();
    assert!(expr.evaluate(&other).unwrap().as_number().unwrap().is_nan());

    let cloned = expr.clone();
    assert_eq!(cloned.evaluate(&numbers()).unwrap(), Value::from(12));
    assert_eq!(cloned.source(), Some("x * y"));
}

#[test]
fn test_compile_reports_diagnostics() {
    match compile("x +* y") {
        Err(Error::Compilation { diagnostics, src }) => {
            assert_eq!(src, "x +* y");
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].code.as_deref(), Some("P001"));
        }
        other => panic!("expected compilation error, got {other:?}"),
    }
}

#[test]
fn test_compile_with_options_limits_nesting() {
    let options = CompilationOptions { max_parse_depth: 2 };
    assert!(compile_with_options("((x))", options).is_ok());
    match compile_with_options("(((x)))", options) {
        Err(Error::Compilation { diagnostics, .. }) => {
            assert_eq!(diagnostics[0].code.as_deref(), Some("P004"));
        }
        other => panic!("expected depth error, got {other:?}"),
    }
}

#[test]
fn test_execution_options() {
    let expr = compile("[[[[x]]]]")
        .unwrap()
        .with_options(ExecutionOptions { max_depth: 3 });
    assert_eq!(expr.options().max_depth, 3);
    assert!(matches!(
        expr.evaluate(&numbers()),
        Err(EvalError::StackOverflow { .. })
    ));
}

#[test]
fn test_identifiers() {
    let expr = compile("a[b] + c.d + getValue('e')").unwrap();
    assert_eq!(expr.identifiers().unwrap(), ["a", "b", "c", "e"]);

    let expr = compile("getValue(p + 'q')").unwrap();
    let ctx = Context::builder().register("p", Value::from("p")).build();
    assert_eq!(expr.identifiers_in(&ctx).unwrap(), ["p", "pq"]);
}

#[test]
fn test_from_ast() {
    let expr = CompiledExpression::from_ast(Node::binary(
        "+",
        Node::ident("x"),
        Node::literal(1.0),
    ));
    assert_eq!(expr.source(), None);
    assert_eq!(expr.evaluate(&numbers()).unwrap(), Value::from(4));
    assert!(matches!(expr.ast(), Node::BinaryExpression { .. }));
}

#[test]
fn test_from_json() {
    let json = r#"{
        "type": "BinaryExpression",
        "operator": "*",
        "left": {"type": "Identifier", "name": "x"},
        "right": {"type": "Literal", "value": 2, "raw": "2"}
    }"#;
    let expr = CompiledExpression::from_json(json).unwrap();
    assert_eq!(expr.evaluate(&numbers()).unwrap(), Value::from(6));

    let err = CompiledExpression::from_json(r#"{"type": "Identifier"}"#).unwrap_err();
    assert!(matches!(err, Error::Api(_)));
}

#[tokio::test]
async fn test_compile_async() {
    let expr = compile_async("asyncFunc(one, two)").unwrap();
    let ctx = Context::builder()
        .register("one", Value::from(1))
        .register("two", Value::from(2))
        .async_function("asyncFunc", |_this, args| async move {
            Ok(crate::values::coercion::add(&args[0], &args[1]))
        })
        .build();
    assert_eq!(expr.evaluate(&ctx).await.unwrap(), Value::from(3));
    assert_eq!(expr.identifiers().unwrap(), ["one", "two"]);
    assert_eq!(expr.source(), Some("asyncFunc(one, two)"));
}

#[tokio::test]
async fn test_into_async_shares_tree() {
    let expr = compile("x - y").unwrap().with_options(ExecutionOptions { max_depth: 10 });
    let async_expr = expr.into_async();
    assert_eq!(async_expr.options().max_depth, 10);
    assert_eq!(async_expr.evaluate(&numbers()).await.unwrap(), Value::from(-1));
}

#[tokio::test]
async fn test_async_from_json() {
    let json = r#"{"type": "ArrayExpression", "elements": [{"type": "Identifier", "name": "y"}]}"#;
    let expr = AsyncCompiledExpression::from_json(json).unwrap();
    assert_eq!(
        expr.evaluate(&numbers()).await.unwrap(),
        Value::array([Value::from(4)])
    );
    assert!(AsyncCompiledExpression::from_ast(Node::Unknown).source().is_none());
}

#[test]
fn test_errors_compose_with_question_mark() {
    fn run(source: &str, ctx: &Context) -> Result<Value, Error> {
        Ok(compile(source)?.evaluate(ctx)?)
    }
    assert_eq!(run("x + y", &numbers()).unwrap(), Value::from(7));
    assert!(matches!(run("x +", &numbers()), Err(Error::Compilation { .. })));
    assert!(matches!(
        run("missing.prop", &numbers()),
        Err(Error::Evaluation(EvalError::NullishProperty { .. }))
    ));
}
