//! Expression syntax tree.
//!
//! The node grammar is fixed: every parser that produces these nodes is interchangeable.
//! Nodes serialize in the ESTree shape (`{"type": "BinaryExpression", ...}`), so trees built
//! by other tools can be decoded with `serde_json` and evaluated directly.

use serde::{Deserialize, Serialize};

/// A node of an expression tree.
///
/// Trees are immutable once built; evaluators only ever borrow them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Literal {
        value: Literal,
    },
    Identifier {
        name: String,
    },
    ThisExpression,
    ArrayExpression {
        elements: Vec<Node>,
    },
    UnaryExpression {
        operator: String,
        argument: Box<Node>,
    },
    /// Strict binary operation: both operands are always evaluated.
    BinaryExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Short-circuiting `&&` / `||`. Any other operator falls back to binary semantics.
    LogicalExpression {
        operator: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    /// `object.property` when `computed` is false, `object[property]` otherwise.
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
    CallExpression {
        callee: Box<Node>,
        arguments: Vec<Node>,
    },
    /// Any node kind outside the grammar. Evaluates to `undefined`.
    #[serde(other)]
    Unknown,
}

/// Literal constant carried by [`Node::Literal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Node {
    pub fn literal(value: impl Into<Literal>) -> Self {
        Node::Literal {
            value: value.into(),
        }
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Node::Identifier { name: name.into() }
    }

    pub fn array(elements: Vec<Node>) -> Self {
        Node::ArrayExpression { elements }
    }

    pub fn unary(operator: &str, argument: Node) -> Self {
        Node::UnaryExpression {
            operator: operator.to_string(),
            argument: Box::new(argument),
        }
    }

    /// Builds a `LogicalExpression` for `&&`/`||` and a `BinaryExpression` otherwise,
    /// matching what the bundled parser emits.
    pub fn binary(operator: &str, left: Node, right: Node) -> Self {
        let (operator, left, right) = (operator.to_string(), Box::new(left), Box::new(right));
        if operator == "&&" || operator == "||" {
            Node::LogicalExpression {
                operator,
                left,
                right,
            }
        } else {
            Node::BinaryExpression {
                operator,
                left,
                right,
            }
        }
    }

    pub fn conditional(test: Node, consequent: Node, alternate: Node) -> Self {
        Node::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        }
    }

    /// `object.name`
    pub fn field(object: Node, name: impl Into<String>) -> Self {
        Node::MemberExpression {
            object: Box::new(object),
            property: Box::new(Node::ident(name)),
            computed: false,
        }
    }

    /// `object[property]`
    pub fn index(object: Node, property: Node) -> Self {
        Node::MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed: true,
        }
    }

    pub fn call(callee: Node, arguments: Vec<Node>) -> Self {
        Node::CallExpression {
            callee: Box::new(callee),
            arguments,
        }
    }

    /// The ESTree `type` tag of this node.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Literal { .. } => "Literal",
            Node::Identifier { .. } => "Identifier",
            Node::ThisExpression => "ThisExpression",
            Node::ArrayExpression { .. } => "ArrayExpression",
            Node::UnaryExpression { .. } => "UnaryExpression",
            Node::BinaryExpression { .. } => "BinaryExpression",
            Node::LogicalExpression { .. } => "LogicalExpression",
            Node::ConditionalExpression { .. } => "ConditionalExpression",
            Node::MemberExpression { .. } => "MemberExpression",
            Node::CallExpression { .. } => "CallExpression",
            Node::Unknown => "Unknown",
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(value as f64)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_estree_json() {
        let json = r#"{
            "type": "BinaryExpression",
            "operator": "+",
            "left": {"type": "Literal", "value": 1, "raw": "1"},
            "right": {
                "type": "MemberExpression",
                "computed": false,
                "object": {"type": "ThisExpression"},
                "property": {"type": "Identifier", "name": "two"}
            }
        }"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(
            node,
            Node::binary("+", Node::literal(1), Node::field(Node::ThisExpression, "two"))
        );
    }

    #[test]
    fn test_decode_unknown_node_kind() {
        let json = r#"{"type": "Compound", "body": []}"#;
        let node: Node = serde_json::from_str(json).unwrap();
        assert_eq!(node, Node::Unknown);
    }

    #[test]
    fn test_decode_null_and_string_literals() {
        let node: Node = serde_json::from_str(r#"{"type": "Literal", "value": null}"#).unwrap();
        assert_eq!(node, Node::Literal { value: Literal::Null });

        let node: Node = serde_json::from_str(r#"{"type": "Literal", "value": "x"}"#).unwrap();
        assert_eq!(node, Node::literal("x"));
    }

    #[test]
    fn test_binary_helper_routes_short_circuit_operators() {
        assert_eq!(
            Node::binary("||", Node::literal(true), Node::literal(false)).kind(),
            "LogicalExpression"
        );
        assert_eq!(
            Node::binary("==", Node::literal(1), Node::literal(1)).kind(),
            "BinaryExpression"
        );
    }
}
