use std::str::FromStr;

use tracing::trace;

use super::element::{Associativity, Element};
use super::factory::Factory;
use super::node::Node;
use crate::error::{Error, Result};
use crate::scalar;

#[derive(Clone, Debug, PartialEq)]
enum Token<'f> {
    Number(f64),
    Identifier(&'f str),
    Symbol(&'f str),
    LeftParen,
    RightParen,
    Comma,
}

fn tokenize<'f>(formula: &'f str, factory: &Factory) -> Result<Vec<Token<'f>>> {
    let mut tokens = Vec::new();
    let mut rest = formula.trim_start();

    while let Some(c) = rest.chars().next() {
        let length = if c.is_ascii_digit() || c == '.' {
            let mut end = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                .unwrap_or(rest.len());

            // Exponent, e.g. 1e-3
            let exponent = rest[end..]
                .strip_prefix(&['e', 'E'][..])
                .map(|e| e.strip_prefix(&['+', '-'][..]).unwrap_or(e));

            if let Some(digits) = exponent.filter(|e| e.starts_with(|c: char| c.is_ascii_digit())) {
                let offset = rest.len() - digits.len();

                end = offset + digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
            }

            tokens.push(Token::Number(scalar::parse(&rest[..end])?));
            end
        } else if c.is_alphabetic() || c == '_' {
            let end = rest
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(rest.len());

            tokens.push(match &rest[..end] {
                "nan" | "inf" => Token::Number(scalar::parse(&rest[..end])?),
                identifier => Token::Identifier(identifier),
            });
            end
        } else {
            match c {
                '(' => tokens.push(Token::LeftParen),
                ')' => tokens.push(Token::RightParen),
                ',' => tokens.push(Token::Comma),
                _ => {
                    // Longest registered symbolic operator at this position
                    let symbol = factory
                        .operators()
                        .map(|op| op.name.as_str())
                        .filter(|name| !name.starts_with(char::is_alphanumeric) && rest.starts_with(name))
                        .max_by_key(|name| name.len())
                        .ok_or_else(|| Error::parse(formula, format!("unexpected character '{c}'")))?;

                    tokens.push(Token::Symbol(&rest[..symbol.len()]));
                    rest = rest[symbol.len()..].trim_start();
                    continue;
                },
            }
            c.len_utf8()
        };

        rest = rest[length..].trim_start();
    }

    Ok(tokens)
}

enum Pending {
    Operator(Element),
    /// An open parenthesis, with the function it calls (if any), the
    /// number of parsed nodes when it opened and the commas seen inside.
    Paren {
        function: Option<Element>,
        mark: usize,
        commas: usize,
    },
}

struct Parser<'a> {
    formula: &'a str,
    output: Vec<Node>,
    stack: Vec<Pending>,
}

impl Parser<'_> {
    fn apply(&mut self, element: Element) -> Result<()> {
        let node = match element.arity {
            1 => {
                let operand = self.pop_operand(&element)?;

                Node::unary(element, operand)
            },
            _ => {
                let right = self.pop_operand(&element)?;
                let left = self.pop_operand(&element)?;

                Node::binary(element, left, right)
            },
        };

        self.output.push(node);

        Ok(())
    }

    fn pop_operand(&mut self, element: &Element) -> Result<Node> {
        // Operands consumed by an open parenthesis belong to it
        let floor = self
            .stack
            .iter()
            .rev()
            .find_map(|pending| match pending {
                Pending::Paren { mark, .. } => Some(*mark),
                Pending::Operator(_) => None,
            })
            .unwrap_or(0);

        if self.output.len() > floor {
            if let Some(node) = self.output.pop() {
                return Ok(node);
            }
        }

        Err(Error::parse(self.formula, format!("missing operand for '{}'", element.name)))
    }

    /// Applies pending operators down to the innermost open parenthesis.
    fn unwind(&mut self) -> Result<()> {
        while let Some(Pending::Operator(_)) = self.stack.last() {
            if let Some(Pending::Operator(element)) = self.stack.pop() {
                self.apply(element)?;
            }
        }

        Ok(())
    }

    fn push_operator(&mut self, element: Element, prefix: bool) -> Result<()> {
        if !prefix {
            while let Some(Pending::Operator(top)) = self.stack.last() {
                let binds_tighter = top.precedence > element.precedence
                    || (top.precedence == element.precedence && element.associativity == Associativity::Left);

                if !binds_tighter {
                    break;
                }
                if let Some(Pending::Operator(top)) = self.stack.pop() {
                    self.apply(top)?;
                }
            }
        }

        self.stack.push(Pending::Operator(element));

        Ok(())
    }

    fn open_paren(&mut self, function: Option<Element>) {
        self.stack.push(Pending::Paren {
            function,
            mark: self.output.len(),
            commas: 0,
        });
    }

    /// Closes the innermost parenthesis; `dangling` is set when the last
    /// token still expected an operand.
    fn close_paren(&mut self, dangling: bool) -> Result<()> {
        self.unwind()?;

        let Some(Pending::Paren { function, mark, commas }) = self.stack.pop() else {
            return Err(Error::parse(self.formula, "mismatched parentheses"));
        };

        let found = self.output.len() - mark;

        // Only `()` may end right after its opening
        if dangling && (found > 0 || commas > 0) {
            return Err(Error::parse(self.formula, "expected an operand before ')'"));
        }
        if found > 0 && found != commas + 1 {
            return Err(Error::parse(self.formula, "expected arguments separated by ','"));
        }

        match function {
            Some(function) if found == function.arity => {
                let mut args = self.output.split_off(mark).into_iter();
                let node = match (args.next(), args.next()) {
                    (Some(operand), None) => Node::unary(function, operand),
                    (Some(left), Some(right)) => Node::binary(function, left, right),
                    _ => return Err(Error::parse(self.formula, "unexpected empty call")),
                };

                self.output.push(node);
            },
            Some(function) => {
                return Err(Error::ArityMismatch {
                    element: function.name,
                    expected: function.arity,
                    found,
                })
            },
            None if found != 1 => return Err(Error::parse(self.formula, "expected one expression in parentheses")),
            None => (),
        }

        Ok(())
    }
}

impl Node {
    /// Parses an infix formula such as `sin(x) + 2 ^ -y`, resolving names
    /// through `factory`. Names that are neither operators nor functions
    /// become variables.
    pub fn parse(formula: &str, factory: &Factory) -> Result<Node> {
        let mut tokens = tokenize(formula, factory)?.into_iter();
        let mut parser = Parser {
            formula,
            output: Vec::new(),
            stack: Vec::new(),
        };
        // Whether the next token starts an operand
        let mut expects_operand = true;

        while let Some(token) = tokens.next() {
            match token {
                Token::Number(_) | Token::LeftParen if !expects_operand => {
                    return Err(Error::parse(formula, "expected an operator between operands"));
                },
                Token::Identifier(name) if !expects_operand && factory.operator(name).is_none() => {
                    return Err(Error::parse(formula, format!("expected an operator before '{name}'")));
                },
                Token::Number(value) => {
                    parser.output.push(Node::Constant(value));
                    expects_operand = false;
                },
                Token::Identifier(name) | Token::Symbol(name) if factory.operator(name).is_some() => {
                    let prefix = expects_operand;
                    let name = match (prefix, name) {
                        (true, "+") => continue,
                        (true, "-") => "~",
                        _ => name,
                    };
                    let element = factory
                        .copy(name)
                        .ok_or_else(|| Error::parse(formula, format!("unknown operator '{name}'")))?;

                    if prefix != (element.arity == 1) {
                        return Err(Error::parse(formula, format!("misplaced operator '{name}'")));
                    }

                    parser.push_operator(element, prefix)?;
                    expects_operand = true;
                },
                Token::Identifier(name) => match factory.function(name) {
                    Some(function) => {
                        if tokens.next() != Some(Token::LeftParen) {
                            return Err(Error::parse(formula, format!("expected '(' after '{name}'")));
                        }

                        parser.open_paren(Some(function.clone()));
                        expects_operand = true;
                    },
                    None => {
                        parser.output.push(Node::Variable(name.to_owned()));
                        expects_operand = false;
                    },
                },
                Token::Symbol(symbol) => {
                    return Err(Error::parse(formula, format!("unknown operator '{symbol}'")));
                },
                Token::LeftParen => {
                    parser.open_paren(None);
                    expects_operand = true;
                },
                Token::RightParen => {
                    parser.close_paren(expects_operand)?;
                    expects_operand = false;
                },
                Token::Comma => {
                    if expects_operand {
                        return Err(Error::parse(formula, "expected an argument before ','"));
                    }

                    parser.unwind()?;

                    match parser.stack.last_mut() {
                        Some(Pending::Paren {
                            function: Some(_),
                            commas,
                            ..
                        }) => *commas += 1,
                        _ => return Err(Error::parse(formula, "unexpected ','")),
                    }
                    expects_operand = true;
                },
            }
        }

        while let Some(pending) = parser.stack.pop() {
            match pending {
                Pending::Operator(element) => parser.apply(element)?,
                Pending::Paren { .. } => return Err(Error::parse(formula, "mismatched parentheses")),
            }
        }

        let node = match (parser.output.pop(), parser.output.is_empty()) {
            (Some(node), true) => node,
            (None, _) => return Err(Error::parse(formula, "expected an expression")),
            (Some(_), false) => return Err(Error::parse(formula, "expected a single expression")),
        };

        trace!(formula, postfix = %node.postfix(), "parsed formula");

        Ok(node)
    }
}

impl FromStr for Node {
    type Err = Error;

    /// Parses with the built-in operators and functions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Node::parse(s, &Factory::new())
    }
}
