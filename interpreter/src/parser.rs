use std::{fmt::Display, sync::LazyLock};

use itertools::Itertools;
use regex::Regex;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    /// Parses a whole postfix atom, which must be exactly one operator character.
    pub fn from_atom(atom: &str) -> Option<Self> {
        let mut chars = atom.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Operator::from_char(c),
            _ => None,
        }
    }

    pub const fn as_char(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    pub const fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 0,
            Operator::Mul | Operator::Div => 1,
            Operator::Pow => 2,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// Operands are runs of digits or runs of letters, never a mix of the two.
static EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\(*[+-]?(?-u:\s)?(?:[0-9]+|[a-zA-Z]+)(?:(?-u:\s)?(?:[+-]+|[*/^])(?-u:\s)?[()]*[+-]?(?:[0-9]+|[a-zA-Z]+)[()]*)*$",
    )
    .expect("expression grammar is a valid regex")
});

/// Checks the token grammar and that `(` and `)` occur equally often.
///
/// Only the counts are compared, not the nesting.
pub fn validate(expression: &str) -> bool {
    profiling::scope!("validate");
    let counts = expression
        .chars()
        .filter(|c| matches!(c, '(' | ')'))
        .counts();
    counts.get(&'(') == counts.get(&')') && EXPRESSION.is_match(expression)
}

fn is_symbol(c: char) -> bool {
    matches!(c, '(' | ')') || Operator::from_char(c).is_some()
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Pending {
    Operator(Operator),
    Open,
}

fn emit(result: &mut String, op: Operator) {
    result.push(op.as_char());
    result.push(' ');
}

/// Converts an already validated infix expression to space separated postfix.
///
/// A leading sign is applied against an implicit zero. Runs of the same sign
/// are folded into the operator on top of the stack: every repeated `-` flips
/// it, a repeated `+` leaves it alone. Equal precedence always pops first, so
/// `^` is left-associative like the rest.
pub fn to_postfix(expression: &str) -> String {
    profiling::scope!("to_postfix");
    let infix = if expression.trim().starts_with(['+', '-']) {
        format!("0 {expression}")
    } else {
        expression.to_string()
    };

    let mut result = String::new();
    let mut stack: Vec<Pending> = Vec::new();
    let mut last: Option<char> = None;

    for symbol in infix.chars() {
        if is_symbol(symbol) {
            let top = stack.last().copied();
            if top.is_some() && last == Some(symbol) && matches!(symbol, '+' | '-') {
                if symbol == '-' {
                    if let Some(Pending::Operator(op @ (Operator::Add | Operator::Sub))) =
                        stack.last_mut()
                    {
                        *op = if *op == Operator::Add {
                            Operator::Sub
                        } else {
                            Operator::Add
                        };
                    }
                }
            } else if symbol == '(' {
                stack.push(Pending::Open);
            } else if symbol == ')' {
                // Closes the nearest `(`; with nothing open it is dropped.
                while let Some(pending) = stack.pop() {
                    match pending {
                        Pending::Open => break,
                        Pending::Operator(op) => emit(&mut result, op),
                    }
                }
            } else if let None | Some(Pending::Open) = top {
                if let Some(op) = Operator::from_char(symbol) {
                    stack.push(Pending::Operator(op));
                }
            } else if let (Some(op), Some(Pending::Operator(top))) = (Operator::from_char(symbol), top)
            {
                if op.precedence() <= top.precedence() {
                    while let Some(&Pending::Operator(top)) = stack.last() {
                        if op.precedence() > top.precedence() {
                            break;
                        }
                        stack.pop();
                        emit(&mut result, top);
                    }
                }
                stack.push(Pending::Operator(op));
            }
        } else if symbol != ' ' {
            if !result.is_empty() && last.is_some_and(|c| !is_symbol(c)) {
                result.truncate(result.trim_end().len());
            }
            result.push(symbol);
            result.push(' ');
        }
        if symbol != ' ' {
            last = Some(symbol);
        }
    }

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Operator(op) => emit(&mut result, op),
            Pending::Open => result.push_str("( "),
        }
    }

    result.trim().to_string()
}
