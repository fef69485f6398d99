//! Asynchronous evaluation.
//!
//! Same semantics as the synchronous evaluator, except that host functions and resolvers
//! may return futures. Independent sub-expressions (array elements, call arguments and
//! both operands of a strict binary operator) are issued together and joined, then
//! consumed in positional order. Short-circuit operators and conditionals stay
//! sequential and lazy.

use futures::future::{self, BoxFuture, FutureExt};
use tracing::trace;

use crate::{
    ast::Node,
    context::{Context, Fallback},
    evaluator::{
        EvalError, EvaluatorOptions,
        operators::{binary_operator, unary_operator},
    },
    values::{
        Value,
        coercion::to_boolean,
        property::{get_named_property, get_property},
    },
};

type EvalFuture<'a, T = Value> = BoxFuture<'a, Result<T, EvalError>>;

/// Evaluator returning futures.
///
/// Joined sub-evaluations are polled cooperatively on the caller's task; no threads or
/// tasks are spawned. The first failure among joined sub-evaluations fails the whole
/// evaluation and drops the others.
pub struct AsyncEvaluator<'ctx> {
    options: EvaluatorOptions,
    context: &'ctx Context,
}

impl<'ctx> AsyncEvaluator<'ctx> {
    pub fn new(options: EvaluatorOptions, context: &'ctx Context) -> Self {
        Self { options, context }
    }

    /// Evaluate an expression node.
    pub async fn eval(&self, node: &Node) -> Result<Value, EvalError> {
        self.eval_at(node, 0).await
    }

    fn eval_at<'a>(&'a self, node: &'a Node, depth: usize) -> EvalFuture<'a> {
        async move {
            if depth >= self.options.max_depth {
                return Err(EvalError::StackOverflow {
                    depth,
                    max_depth: self.options.max_depth,
                });
            }
            self.eval_inner(node, depth + 1).await
        }
        .boxed()
    }

    async fn eval_inner(&self, node: &Node, depth: usize) -> Result<Value, EvalError> {
        match node {
            Node::Literal { value } => Ok(Value::from(value)),

            Node::ArrayExpression { elements } => {
                Ok(Value::from(self.eval_list(elements, depth).await?))
            }

            Node::BinaryExpression {
                operator,
                left,
                right,
            } => self.eval_binary(operator, left, right, depth).await,

            Node::LogicalExpression {
                operator,
                left,
                right,
            } => match operator.as_str() {
                "||" => {
                    let left = self.eval_at(left, depth).await?;
                    if to_boolean(&left) {
                        Ok(left)
                    } else {
                        self.eval_at(right, depth).await
                    }
                }
                "&&" => {
                    let left = self.eval_at(left, depth).await?;
                    if to_boolean(&left) {
                        self.eval_at(right, depth).await
                    } else {
                        Ok(left)
                    }
                }
                _ => self.eval_binary(operator, left, right, depth).await,
            },

            Node::UnaryExpression { operator, argument } => {
                let op = unary_operator(operator)?;
                let argument = self.eval_at(argument, depth).await?;
                Ok(op(&argument))
            }

            Node::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                if to_boolean(&self.eval_at(test, depth).await?) {
                    self.eval_at(consequent, depth).await
                } else {
                    self.eval_at(alternate, depth).await
                }
            }

            Node::Identifier { name } => self.lookup(name).await,

            Node::MemberExpression { .. } => Ok(self.eval_member_at(node, depth).await?.1),

            Node::CallExpression { callee, arguments } => {
                let (receiver, callee) = match callee.as_ref() {
                    Node::MemberExpression { .. } => self.eval_member_at(callee, depth).await?,
                    _ => (Value::Undefined, self.eval_at(callee, depth).await?),
                };
                let arguments = self.eval_list(arguments, depth).await?;
                let Value::Function(function) = callee else {
                    return Ok(Value::Undefined);
                };
                trace!(
                    argc = arguments.len(),
                    is_async = function.is_async(),
                    "calling host function"
                );
                function.call_async(receiver, arguments).await
            }

            Node::ThisExpression => Ok(self.context.this_value()),

            Node::Unknown => Ok(Value::Undefined),
        }
    }

    async fn eval_binary(
        &self,
        operator: &str,
        left: &Node,
        right: &Node,
        depth: usize,
    ) -> Result<Value, EvalError> {
        let op = binary_operator(operator)?;
        let (left, right) =
            future::try_join(self.eval_at(left, depth), self.eval_at(right, depth)).await?;
        Ok(op(&left, &right))
    }

    /// Fan out over `nodes`, join, and return the results in positional order.
    async fn eval_list(&self, nodes: &[Node], depth: usize) -> Result<Vec<Value>, EvalError> {
        future::try_join_all(nodes.iter().map(|node| self.eval_at(node, depth))).await
    }

    /// Evaluate a member expression to its `(receiver, value)` pair.
    ///
    /// Any other node evaluates to `(undefined, value)`.
    pub async fn eval_member(&self, node: &Node) -> Result<(Value, Value), EvalError> {
        self.eval_member_at(node, 0).await
    }

    fn eval_member_at<'a>(&'a self, node: &'a Node, depth: usize) -> EvalFuture<'a, (Value, Value)> {
        async move {
            let Node::MemberExpression {
                object,
                property,
                computed,
            } = node
            else {
                return Ok((Value::Undefined, self.eval_at(node, depth).await?));
            };
            let receiver = self.eval_at(object, depth).await?;
            let value = match property.as_ref() {
                Node::Identifier { name } if !computed => get_named_property(&receiver, name)?,
                _ => {
                    let key = self.eval_at(property, depth).await?;
                    get_property(&receiver, &key)?
                }
            };
            Ok((receiver, value))
        }
        .boxed()
    }

    async fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.context.get_own(name) {
            return Ok(value.clone());
        }
        match self.context.fallback() {
            Fallback::Resolver(resolver) => {
                trace!(name, "resolving through fallback");
                resolver
                    .call_async(self.context.this_value(), vec![Value::from(name)])
                    .await
            }
            Fallback::None => Ok(Value::Undefined),
        }
    }
}
