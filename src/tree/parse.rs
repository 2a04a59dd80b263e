//! Prefix text format for expression trees.
//!
//! Grammar (whitespace separated, parentheses may touch tokens):
//!
//! ```text
//! tree   := "t" | number | "#" number | "(" op tree+ ")"
//! op     := "+" | "-" | "*" | "/" | "^"          (two arguments)
//!         | "sin" | "cos" | "tan" | "exp" | "ln"  (one argument)
//! ```
//!
//! Plain numbers are `Constant` leaves; `#`-prefixed numbers are frozen
//! `RandomConstant` leaves. `Display` writes the same format, and numbers use
//! Rust's shortest round-trip formatting, so a printed tree parses back to an
//! equal tree.

use std::fmt;

use crate::error::AppError;
use crate::tree::ExprTree;

impl fmt::Display for ExprTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprTree::Constant(v) => write!(f, "{v}"),
            ExprTree::Parameter => write!(f, "t"),
            ExprTree::RandomConstant(v) => write!(f, "#{v}"),
            ExprTree::Add(a, b) => write!(f, "(+ {a} {b})"),
            ExprTree::Sub(a, b) => write!(f, "(- {a} {b})"),
            ExprTree::Mul(a, b) => write!(f, "(* {a} {b})"),
            ExprTree::Div(a, b) => write!(f, "(/ {a} {b})"),
            ExprTree::Pow(a, b) => write!(f, "(^ {a} {b})"),
            ExprTree::Sin(a) => write!(f, "(sin {a})"),
            ExprTree::Cos(a) => write!(f, "(cos {a})"),
            ExprTree::Tan(a) => write!(f, "(tan {a})"),
            ExprTree::Exp(a) => write!(f, "(exp {a})"),
            ExprTree::Ln(a) => write!(f, "(ln {a})"),
        }
    }
}

/// Parse a tree from its prefix text form.
pub fn parse_tree(text: &str) -> Result<ExprTree, AppError> {
    let spaced = text.replace('(', " ( ").replace(')', " ) ");
    let tokens: Vec<&str> = spaced.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(AppError::new(2, "Empty expression."));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let tree = parser.tree()?;
    if let Some(extra) = parser.peek() {
        return Err(AppError::new(
            2,
            format!("Unexpected trailing token '{extra}' in expression '{}'.", text.trim()),
        ));
    }
    Ok(tree)
}

struct Parser<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Result<&'a str, AppError> {
        let token = self
            .peek()
            .ok_or_else(|| AppError::new(2, "Unexpected end of expression."))?;
        self.pos += 1;
        Ok(token)
    }

    fn tree(&mut self) -> Result<ExprTree, AppError> {
        let token = self.advance()?;
        match token {
            "(" => self.application(),
            ")" => Err(AppError::new(2, "Unexpected ')' in expression.")),
            "t" => Ok(ExprTree::Parameter),
            _ => leaf(token),
        }
    }

    fn application(&mut self) -> Result<ExprTree, AppError> {
        let op = self.advance()?;
        let tree = match op {
            "+" | "-" | "*" | "/" | "^" => {
                let a = self.tree()?;
                let b = self.tree()?;
                match op {
                    "+" => ExprTree::add(a, b),
                    "-" => ExprTree::sub(a, b),
                    "*" => ExprTree::mul(a, b),
                    "/" => ExprTree::div(a, b),
                    _ => ExprTree::pow(a, b),
                }
            }
            "sin" => ExprTree::sin(self.tree()?),
            "cos" => ExprTree::cos(self.tree()?),
            "tan" => ExprTree::tan(self.tree()?),
            "exp" => ExprTree::exp(self.tree()?),
            "ln" => ExprTree::ln(self.tree()?),
            other => return Err(AppError::new(2, format!("Unknown operator '{other}'."))),
        };

        match self.advance()? {
            ")" => Ok(tree),
            other => Err(AppError::new(
                2,
                format!("Expected ')' after '{op}' arguments, found '{other}'."),
            )),
        }
    }
}

fn leaf(token: &str) -> Result<ExprTree, AppError> {
    let (frozen, digits) = match token.strip_prefix('#') {
        Some(rest) => (true, rest),
        None => (false, token),
    };
    let value: f64 = digits
        .parse()
        .map_err(|_| AppError::new(2, format!("Unknown token '{token}' in expression.")))?;
    Ok(if frozen {
        ExprTree::RandomConstant(value)
    } else {
        ExprTree::Constant(value)
    })
}
