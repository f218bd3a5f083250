use std::collections::HashMap;

use num::{BigInt, Zero};
use num_traits::ToPrimitive;

use crate::{
    error::Error,
    identifier::{is_identifier, Identifier},
    parser::{to_postfix, validate, Operator},
};

pub type Variables = HashMap<Identifier, BigInt>;

/// Parses a decimal integer with an optional leading sign.
///
/// Stricter than `BigInt`'s own `FromStr`, which also accepts `_` separators.
pub fn parse_integer(s: &str) -> Option<BigInt> {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// `^` goes through `f64` and saturates into `i32`, so large results are
/// clamped and fractional results (negative exponents) truncate toward zero.
fn pow(base: &BigInt, exp: &BigInt) -> BigInt {
    let base = base.to_f64().unwrap_or(f64::NAN);
    let exp = exp.to_f64().unwrap_or(f64::NAN);
    BigInt::from(base.powf(exp) as i32)
}

impl Operator {
    /// Applies the operator, `/` truncating toward zero.
    pub fn apply(&self, left: &BigInt, right: &BigInt) -> Result<BigInt, Error> {
        Ok(match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => {
                if right.is_zero() {
                    return Err(Error::DivisionByZero);
                }
                left / right
            }
            Operator::Pow => pow(left, right),
        })
    }
}

/// Evaluates a space separated postfix expression.
///
/// The stack starts out holding a single zero, which gives a dangling unary
/// operator (as in `(-2)`) something to work against.
pub fn evaluate(postfix: &str, variables: &Variables) -> Result<BigInt, Error> {
    profiling::scope!("evaluate");
    let mut stack = vec![BigInt::zero()];
    for atom in postfix.split_whitespace() {
        if is_identifier(atom) {
            let value = variables.get(atom).ok_or(Error::UnknownVariable)?;
            stack.push(value.clone());
        } else if let Some(op) = Operator::from_atom(atom) {
            let (Some(right), Some(left)) = (stack.pop(), stack.pop()) else {
                return Err(Error::InvalidExpression);
            };
            stack.push(op.apply(&left, &right)?);
        } else {
            stack.push(parse_integer(atom).ok_or(Error::InvalidExpression)?);
        }
    }
    stack.pop().ok_or(Error::InvalidExpression)
}

/// Validates, converts and evaluates an infix expression.
pub fn calculate(expression: &str, variables: &Variables) -> Result<BigInt, Error> {
    if !validate(expression) {
        return Err(Error::InvalidExpression);
    }
    evaluate(&to_postfix(expression), variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn vars(pairs: &[(&str, i64)]) -> Variables {
        pairs
            .iter()
            .map(|(name, value)| (Identifier::parse(name).unwrap(), int(*value)))
            .collect()
    }

    #[test]
    fn integers() {
        assert_eq!(parse_integer("42"), Some(int(42)));
        assert_eq!(parse_integer("-42"), Some(int(-42)));
        assert_eq!(parse_integer("+7"), Some(int(7)));
        assert_eq!(parse_integer("007"), Some(int(7)));
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("-"), None);
        assert_eq!(parse_integer("1_000"), None);
        assert_eq!(parse_integer("12a"), None);
        assert_eq!(parse_integer("1-2"), None);
        assert_eq!(parse_integer("--1"), None);
        assert_eq!(parse_integer(" 1"), None);
    }

    #[test]
    fn big_integers() {
        let big = "123456789012345678901234567890";
        let value = calculate(&format!("{big} * 10 + 1"), &Variables::new()).unwrap();
        assert_eq!(value.to_string(), "1234567890123456789012345678901");
    }

    #[test]
    fn precedence() {
        let empty = Variables::new();
        assert_eq!(calculate("2 + 3 * 4", &empty), Ok(int(14)));
        assert_eq!(calculate("(2 + 3) * 4", &empty), Ok(int(20)));
        assert_eq!(calculate("8 * 3 + 12 * (4 - 2)", &empty), Ok(int(48)));
        assert_eq!(calculate("2 - 3 - 4", &empty), Ok(int(-5)));
        assert_eq!(calculate("2 * 3 ^ 2", &empty), Ok(int(18)));
    }

    #[test]
    fn power_goes_left_to_right() {
        let empty = Variables::new();
        // (2 ^ 3) ^ 2 rather than 2 ^ (3 ^ 2)
        assert_eq!(calculate("2 ^ 3 ^ 2", &empty), Ok(int(64)));
    }

    #[test]
    fn power_through_floats() {
        let empty = Variables::new();
        assert_eq!(calculate("2 ^ 10", &empty), Ok(int(1024)));
        assert_eq!(calculate("2 ^ 0", &empty), Ok(int(1)));
        assert_eq!(calculate("2 ^ (0 - 1)", &empty), Ok(int(0)));
        assert_eq!(calculate("0 ^ (0 - 1)", &empty), Ok(int(i32::MAX as i64)));
        assert_eq!(calculate("2 ^ 40", &empty), Ok(int(i32::MAX as i64)));
        assert_eq!(calculate("(0 - 2) ^ 41", &empty), Ok(int(i32::MIN as i64)));
        assert_eq!(calculate("(0 - 3) ^ 3", &empty), Ok(int(-27)));
    }

    #[test]
    fn division_truncates_toward_zero() {
        let empty = Variables::new();
        assert_eq!(calculate("7 / 2", &empty), Ok(int(3)));
        assert_eq!(calculate("-7 / 2", &empty), Ok(int(-3)));
        assert_eq!(calculate("7 / (0 - 2)", &empty), Ok(int(-3)));
        assert_eq!(calculate("(0 - 7) / (0 - 2)", &empty), Ok(int(3)));
    }

    #[test]
    fn division_by_zero() {
        let empty = Variables::new();
        assert_eq!(calculate("1 / 0", &empty), Err(Error::DivisionByZero));
        assert_eq!(calculate("1 / (2 - 2)", &empty), Err(Error::DivisionByZero));
    }

    #[test]
    fn sign_folding() {
        let empty = Variables::new();
        assert_eq!(calculate("3--2", &empty), Ok(int(5)));
        assert_eq!(calculate("3++2", &empty), Ok(int(5)));
        assert_eq!(calculate("3---2", &empty), Ok(int(1)));
        assert_eq!(calculate("3 - -2", &empty), Ok(int(5)));
        assert_eq!(calculate("-5", &empty), Ok(int(-5)));
        assert_eq!(calculate("1 + (-2)", &empty), Ok(int(-1)));
    }

    #[test]
    fn mixed_signs() {
        let empty = Variables::new();
        // "3 - 2 +" runs against the seeded zero: (0 - 3) + 2.
        assert_eq!(calculate("3-+2", &empty), Ok(int(-1)));
        assert_eq!(calculate("3+-2", &empty), Ok(int(1)));
    }

    #[test]
    fn sign_after_operator() {
        let empty = Variables::new();
        // The sign pops the `/` early, leaving "7 / 2 -": (0 / 7) - 2.
        assert_eq!(calculate("7 / -2", &empty), Ok(int(-2)));
        // "2 3 - -": the inner sign leaves -1 above the seeded zero, which the
        // outer `-` then consumes, giving 0 - (-1).
        assert_eq!(calculate("2 - (-3)", &empty), Ok(int(1)));
    }

    #[test]
    fn variables() {
        let defines = vars(&[("a", 5), ("b", 5), ("Count", -2)]);
        assert_eq!(calculate("a+b*2", &defines), Ok(int(15)));
        assert_eq!(calculate("a * Count", &defines), Ok(int(-10)));
        assert_eq!(calculate("-a", &defines), Ok(int(-5)));
        assert_eq!(calculate("count", &defines), Err(Error::UnknownVariable));
    }

    #[test]
    fn unknown_variable() {
        assert_eq!(evaluate("x 1 +", &Variables::new()), Err(Error::UnknownVariable));
        assert_eq!(calculate("x+1", &Variables::new()), Err(Error::UnknownVariable));
    }

    #[test]
    fn invalid() {
        let empty = Variables::new();
        assert_eq!(calculate("2 +", &empty), Err(Error::InvalidExpression));
        assert_eq!(calculate(")(", &empty), Err(Error::InvalidExpression));
        assert_eq!(calculate("--5", &empty), Err(Error::InvalidExpression));
        // Passes validation by parenthesis count only.
        assert_eq!(calculate("2+)3(", &empty), Err(Error::InvalidExpression));
        assert_eq!(evaluate("+ +", &empty), Err(Error::InvalidExpression));
    }
}
