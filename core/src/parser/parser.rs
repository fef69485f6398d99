use crate::ast::{Literal, Node};
use crate::parser::error::{INVALID_NUMBER, ParseError, ParseErrorKind, convert_pest_error};
use crate::parser::Span;
use lazy_static::lazy_static;
use pest::Parser;
use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;
use tracing::debug;

/// Default bound on nesting accepted by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(Op::infix(Rule::or_op, Assoc::Left))             // `||`
        .op(Op::infix(Rule::and_op, Assoc::Left))            // `&&`
        .op(Op::infix(Rule::bit_or_op, Assoc::Left))         // `|`
        .op(Op::infix(Rule::bit_xor_op, Assoc::Left))        // `^`
        .op(Op::infix(Rule::bit_and_op, Assoc::Left))        // `&`
        .op(Op::infix(Rule::equality_op, Assoc::Left))       // `==`, `!=`, `===`, `!==`
        .op(Op::infix(Rule::relational_op, Assoc::Left))     // `<`, `>`, `<=`, `>=`
        .op(Op::infix(Rule::shift_op, Assoc::Left))          // `<<`, `>>`, `>>>`
        .op(Op::infix(Rule::additive_op, Assoc::Left))       // `+`, `-`
        .op(Op::infix(Rule::multiplicative_op, Assoc::Left)) // `*`, `/`, `%`
        .op(Op::prefix(Rule::unary_op))                      // `-`, `+`, `!`, `~`

        // Postfix operators.
        .op(
            Op::postfix(Rule::call_op) |
            Op::postfix(Rule::index_op) |
            Op::postfix(Rule::field_op)
        )                                                    // `()`, `[]`, `.`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/expression.pest"]
pub struct ExpressionParser;

fn custom_error(message: impl Into<String>, pair: &Pair<Rule>) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::CustomError {
            message: message.into(),
        },
        pair.as_span(),
    )
}

fn next_inner<'i>(
    inner: &mut pest::iterators::Pairs<'i, Rule>,
    parent: &Pair<'i, Rule>,
) -> Result<Pair<'i, Rule>, Error<Rule>> {
    inner
        .next()
        .ok_or_else(|| custom_error("missing expected pair in rule", parent))
}

pub fn parse_node(pair: Pair<Rule>) -> Result<Node, Error<Rule>> {
    match pair.as_rule() {
        Rule::main => {
            let mut inner = pair.clone().into_inner();
            parse_node(next_inner(&mut inner, &pair)?)
        }

        Rule::expression => {
            let mut inner = pair.clone().into_inner();
            let test = parse_node(next_inner(&mut inner, &pair)?)?;
            match inner.next() {
                None => Ok(test),
                Some(consequent) => {
                    let consequent = parse_node(consequent)?;
                    let alternate = parse_node(next_inner(&mut inner, &pair)?)?;
                    Ok(Node::conditional(test, consequent, alternate))
                }
            }
        }

        Rule::binary => PRATT_PARSER
            .map_primary(parse_node)
            .map_prefix(|op, rhs| Ok(Node::unary(op.as_str(), rhs?)))
            .map_infix(|lhs, op, rhs| Ok(Node::binary(op.as_str(), lhs?, rhs?)))
            .map_postfix(|lhs, op| match op.as_rule() {
                Rule::call_op => {
                    let arguments = op
                        .into_inner()
                        .map(parse_node)
                        .collect::<Result<_, _>>()?;
                    Ok(Node::call(lhs?, arguments))
                }
                Rule::index_op => {
                    let mut inner = op.clone().into_inner();
                    let index = parse_node(next_inner(&mut inner, &op)?)?;
                    Ok(Node::index(lhs?, index))
                }
                Rule::field_op => {
                    let mut inner = op.clone().into_inner();
                    let name = next_inner(&mut inner, &op)?;
                    Ok(Node::field(lhs?, name.as_str()))
                }
                other => Err(custom_error(
                    format!("unknown postfix operator: {:?}", other),
                    &op,
                )),
            })
            .parse(pair.into_inner()),

        Rule::array => {
            let elements = pair
                .into_inner()
                .map(parse_node)
                .collect::<Result<_, _>>()?;
            Ok(Node::array(elements))
        }

        Rule::number => {
            let value: f64 = pair
                .as_str()
                .parse()
                .map_err(|_| custom_error(format!("{INVALID_NUMBER}{}", pair.as_str()), &pair))?;
            Ok(Node::literal(value))
        }

        Rule::string => {
            let s = pair.as_str();
            Ok(Node::literal(unescape(&s[1..s.len() - 1])))
        }

        Rule::boolean => Ok(Node::literal(pair.as_str() == "true")),

        Rule::null => Ok(Node::literal(Literal::Null)),

        Rule::this => Ok(Node::ThisExpression),

        Rule::identifier => Ok(Node::ident(pair.as_str())),

        other => Err(custom_error(format!("Unhandled rule: {:?}", other), &pair)),
    }
}

/// Resolve backslash escapes in a quoted literal's body.
///
/// `\n \r \t \b \f \v` map to their control characters; any other escaped character stands
/// for itself.
fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Nesting opened inside one bracket level.
#[derive(Default)]
struct Frame {
    /// Prefix operators applying to the operand being scanned.
    unary: usize,
    /// Conditionals whose alternate is still open.
    conditional: usize,
}

impl Frame {
    fn open(&self) -> usize {
        self.unary + self.conditional
    }
}

/// Reject sources nesting deeper than `max_depth` before handing them to pest, whose
/// recursive descent would otherwise overflow the stack.
///
/// Each bracket, each prefix operator applied to an operand and each conditional whose
/// alternate is still open counts as one level. A prefix run ends with its operand, so
/// `-a + -b` nests one level, while `- - a` nests two.
fn check_depth(source: &str, max_depth: usize) -> Result<(), ParseError> {
    let mut frames = vec![Frame::default()];
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    let mut after_operand = false;
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if let Some(q) = quote {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                _ if c == q => {
                    quote = None;
                    after_operand = true;
                }
                _ => {}
            }
            continue;
        }

        let frame = frames.len() - 1;
        let opened = match c {
            _ if c.is_whitespace() => continue,
            '"' | '\'' => {
                quote = Some(c);
                false
            }
            '(' | '[' => {
                frames.push(Frame::default());
                after_operand = false;
                true
            }
            ')' | ']' => {
                if frames.len() > 1
                    && let Some(closed) = frames.pop()
                {
                    depth -= closed.open() + 1;
                }
                after_operand = true;
                false
            }
            '?' => {
                depth -= frames[frame].unary;
                frames[frame].unary = 0;
                frames[frame].conditional += 1;
                after_operand = false;
                true
            }
            ',' => {
                depth -= frames[frame].open();
                frames[frame] = Frame::default();
                after_operand = false;
                false
            }
            '-' | '+' | '!' | '~'
                if !after_operand && !(c == '!' && matches!(chars.peek(), Some((_, '=')))) =>
            {
                frames[frame].unary += 1;
                true
            }
            '-' | '+' | '!' | '~' | '*' | '/' | '%' | '<' | '>' | '=' | '&' | '|' | '^' | ':' => {
                depth -= frames[frame].unary;
                frames[frame].unary = 0;
                after_operand = false;
                false
            }
            '.' => false,
            _ => {
                after_operand = true;
                false
            }
        };

        if opened {
            depth += 1;
            if depth > max_depth {
                return Err(ParseError::new(
                    ParseErrorKind::MaxDepthExceeded { depth, max_depth },
                    source,
                    Span::new(offset, offset + c.len_utf8()),
                ));
            }
        }
    }
    Ok(())
}

/// Parse an expression into its tree.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// Parse an expression, rejecting nesting deeper than `max_depth`.
pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<Node, ParseError> {
    check_depth(source, max_depth)?;
    let node = ExpressionParser::parse(Rule::main, source)
        .and_then(|mut pairs| match pairs.next() {
            Some(pair) => parse_node(pair),
            None => Err(Error::new_from_pos(
                ErrorVariant::CustomError {
                    message: "missing expected pair in rule".to_string(),
                },
                pest::Position::from_start(source),
            )),
        })
        .map_err(|err| convert_pest_error(err, source))?;
    debug!(kind = node.kind(), "parsed expression");
    Ok(node)
}
