//! Synchronous evaluation.

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

/// Tree-walking evaluator that never suspends.
///
/// Children are evaluated depth-first, left to right. The evaluator holds no state besides
/// the recursion depth, so one evaluator may run any number of expressions.
pub struct Evaluator<'ctx> {
    options: EvaluatorOptions,
    context: &'ctx Context,
    depth: usize,
}

impl<'ctx> Evaluator<'ctx> {
    pub fn new(options: EvaluatorOptions, context: &'ctx Context) -> Self {
        Self {
            options,
            context,
            depth: 0,
        }
    }

    /// Evaluate an expression node.
    pub fn eval(&mut self, node: &Node) -> Result<Value, EvalError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(EvalError::StackOverflow {
                depth: self.depth,
                max_depth: self.options.max_depth,
            });
        }

        self.depth += 1;
        let result = self.eval_inner(node);
        self.depth -= 1;

        result
    }

    fn eval_inner(&mut self, node: &Node) -> Result<Value, EvalError> {
        match node {
            Node::Literal { value } => Ok(Value::from(value)),

            Node::ArrayExpression { elements } => Ok(Value::from(self.eval_list(elements)?)),

            Node::BinaryExpression {
                operator,
                left,
                right,
            } => self.eval_binary(operator, left, right),

            Node::LogicalExpression {
                operator,
                left,
                right,
            } => match operator.as_str() {
                "||" => {
                    let left = self.eval(left)?;
                    if to_boolean(&left) {
                        Ok(left)
                    } else {
                        self.eval(right)
                    }
                }
                "&&" => {
                    let left = self.eval(left)?;
                    if to_boolean(&left) {
                        self.eval(right)
                    } else {
                        Ok(left)
                    }
                }
                _ => self.eval_binary(operator, left, right),
            },

            Node::UnaryExpression { operator, argument } => {
                let op = unary_operator(operator)?;
                let argument = self.eval(argument)?;
                Ok(op(&argument))
            }

            Node::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                if to_boolean(&self.eval(test)?) {
                    self.eval(consequent)
                } else {
                    self.eval(alternate)
                }
            }

            Node::Identifier { name } => self.lookup(name),

            Node::MemberExpression { .. } => Ok(self.eval_member(node)?.1),

            Node::CallExpression { callee, arguments } => {
                let (receiver, callee) = match callee.as_ref() {
                    Node::MemberExpression { .. } => self.eval_member(callee)?,
                    _ => (Value::Undefined, self.eval(callee)?),
                };
                let arguments = self.eval_list(arguments)?;
                let Value::Function(function) = callee else {
                    return Ok(Value::Undefined);
                };
                trace!(argc = arguments.len(), "calling host function");
                function.call(&receiver, &arguments)
            }

            Node::ThisExpression => Ok(self.context.this_value()),

            Node::Unknown => Ok(Value::Undefined),
        }
    }

    fn eval_binary(&mut self, operator: &str, left: &Node, right: &Node) -> Result<Value, EvalError> {
        let op = binary_operator(operator)?;
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        Ok(op(&left, &right))
    }

    fn eval_list(&mut self, nodes: &[Node]) -> Result<Vec<Value>, EvalError> {
        nodes.iter().map(|node| self.eval(node)).collect()
    }

    /// Evaluate a member expression to its `(receiver, value)` pair.
    ///
    /// Any other node evaluates to `(undefined, value)`.
    pub fn eval_member(&mut self, node: &Node) -> Result<(Value, Value), EvalError> {
        let Node::MemberExpression {
            object,
            property,
            computed,
        } = node
        else {
            return Ok((Value::Undefined, self.eval(node)?));
        };
        let receiver = self.eval(object)?;
        let value = match property.as_ref() {
            Node::Identifier { name } if !computed => get_named_property(&receiver, name)?,
            _ => {
                let key = self.eval(property)?;
                get_property(&receiver, &key)?
            }
        };
        Ok((receiver, value))
    }

    fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.context.get_own(name) {
            return Ok(value.clone());
        }
        match self.context.fallback() {
            Fallback::Resolver(resolver) => {
                trace!(name, "resolving through fallback");
                resolver.call(&self.context.this_value(), &[Value::from(name)])
            }
            Fallback::None => Ok(Value::Undefined),
        }
    }
}
