#![allow(dead_code, unused_macros)]

use formulet::{Context, Value, values::property::get_property};

/// The context shared by the integration cases.
pub fn context() -> Context {
    Context::builder()
        .register("one", Value::from(1))
        .register("two", Value::from(2))
        .register("name", Value::from("formulet"))
        .register("empty", Value::from(""))
        .register("nothing", Value::Null)
        .register("list", Value::array((1..=5).map(Value::from)))
        .register(
            "user",
            Value::object([
                ("name", Value::from("ada")),
                ("age", Value::from(36)),
                ("tags", Value::array([Value::from("admin"), Value::from("ops")])),
                (
                    "get",
                    Value::function(|this, args| get_property(this, &args[0])),
                ),
            ]),
        )
        .function("max", |_this, args| {
            let max = args
                .iter()
                .map(formulet::values::coercion::to_number)
                .fold(f64::NEG_INFINITY, f64::max);
            Ok(Value::from(max))
        })
        .build()
}

/// Declare a test evaluating `input` against [`context`] both synchronously and
/// asynchronously, checking the value and the identifiers the expression reads.
macro_rules! test_case {
    (
        name: $name:ident,
        input: $input:expr,
        value: $value:expr,
        idents: [$($ident:expr),* $(,)?] $(,)?
    ) => {
        #[tokio::test]
        async fn $name() {
            let ctx = $crate::cases::context();
            let expected: formulet::Value = $value.into();

            let expr = formulet::compile($input)
                .unwrap_or_else(|e| panic!("{}", formulet::render_error_to_string_no_color(&e)));
            pretty_assertions::assert_eq!(expr.evaluate(&ctx).unwrap(), expected, "sync");

            let expr = formulet::compile_async($input)
                .unwrap_or_else(|e| panic!("{}", formulet::render_error_to_string_no_color(&e)));
            pretty_assertions::assert_eq!(expr.evaluate(&ctx).await.unwrap(), expected, "async");

            let expected_idents: Vec<&str> = vec![$($ident),*];
            pretty_assertions::assert_eq!(expr.identifiers().unwrap(), expected_idents, "idents");
        }
    };
    (
        name: $name:ident,
        input: $input:expr,
        value: $value:expr $(,)?
    ) => {
        test_case! {
            name: $name,
            input: $input,
            value: $value,
            idents: [],
        }
    };
}
