//! Free-variable extraction.

use crate::{
    ast::Node,
    context::Context,
    evaluator::{EvalError, EvaluatorOptions, evaluate},
};

/// Callee name whose first argument is treated as a dynamic identifier reference.
pub const DYNAMIC_LOOKUP: &str = "getValue";

/// Collect the names an expression may read from its context.
///
/// The walk is static: no operator is applied and the context is consulted only for
/// `getValue(<expr>)` calls, whose first argument is evaluated (against `context`, or an
/// empty context) to obtain the referenced name. Names are reported in visiting order and
/// may repeat.
///
/// The `test` of a conditional expression is not visited; only its branches are. Trees nested
/// deeper than the default evaluation limit fail with [`EvalError::StackOverflow`].
///
/// ```
/// use formulet_core::{analyzer::read_identifiers, parser::parse};
///
/// let ast = parse(r#"a[b] + c.d + getValue("e" + "f")"#).unwrap();
/// assert_eq!(read_identifiers(&ast, None).unwrap(), ["a", "b", "c", "ef"]);
/// ```
pub fn read_identifiers(node: &Node, context: Option<&Context>) -> Result<Vec<String>, EvalError> {
    let empty;
    let context = match context {
        Some(context) => context,
        None => {
            empty = Context::empty();
            &empty
        }
    };
    let mut collector = IdentifierCollector {
        context,
        idents: Vec::new(),
        depth: 0,
        max_depth: EvaluatorOptions::default().max_depth,
    };
    collector.visit(node)?;
    Ok(collector.idents)
}

/// [`read_identifiers`] with duplicates removed, keeping first occurrences.
pub fn unique_identifiers(node: &Node, context: Option<&Context>) -> Result<Vec<String>, EvalError> {
    let mut seen = hashbrown::HashSet::new();
    let mut idents = read_identifiers(node, context)?;
    idents.retain(|name| seen.insert(name.clone()));
    Ok(idents)
}

struct IdentifierCollector<'ctx> {
    context: &'ctx Context,
    idents: Vec<String>,
    depth: usize,
    max_depth: usize,
}

impl IdentifierCollector<'_> {
    fn visit(&mut self, node: &Node) -> Result<(), EvalError> {
        if self.depth >= self.max_depth {
            return Err(EvalError::StackOverflow {
                depth: self.depth,
                max_depth: self.max_depth,
            });
        }

        self.depth += 1;
        let result = self.visit_inner(node);
        self.depth -= 1;

        result
    }

    fn visit_inner(&mut self, node: &Node) -> Result<(), EvalError> {
        match node {
            Node::ArrayExpression { elements } => self.visit_all(elements),

            Node::BinaryExpression { left, right, .. }
            | Node::LogicalExpression { left, right, .. } => {
                self.visit(left)?;
                self.visit(right)
            }

            Node::CallExpression { callee, arguments } => {
                self.visit_all(arguments)?;
                match callee.as_ref() {
                    Node::Identifier { name } if name == DYNAMIC_LOOKUP => {
                        if let Some(first) = arguments.first() {
                            let name = evaluate(first, self.context)?;
                            self.idents.push(name.to_string());
                        }
                        Ok(())
                    }
                    // The callee of a plain call is not a dependency.
                    Node::Identifier { .. } => Ok(()),
                    _ => self.visit(callee),
                }
            }

            Node::ConditionalExpression {
                consequent,
                alternate,
                ..
            } => {
                self.visit(consequent)?;
                self.visit(alternate)
            }

            Node::Identifier { name } => {
                self.idents.push(name.clone());
                Ok(())
            }

            Node::MemberExpression {
                object,
                property,
                computed,
            } => {
                self.visit(object)?;
                if *computed {
                    self.visit(property)?;
                }
                Ok(())
            }

            Node::UnaryExpression { argument, .. } => self.visit(argument),

            Node::Literal { .. } | Node::ThisExpression | Node::Unknown => Ok(()),
        }
    }

    fn visit_all(&mut self, nodes: &[Node]) -> Result<(), EvalError> {
        nodes.iter().try_for_each(|node| self.visit(node))
    }
}
