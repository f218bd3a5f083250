use crate::{
    error::Error,
    identifier::{is_identifier, Identifier},
    value::{parse_integer, Variables},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Exit,
    Help,
}

impl Command {
    pub fn from_str(string: &str) -> Option<Self> {
        match string {
            "/exit" => Some(Command::Exit),
            "/help" => Some(Command::Help),
            _ => None,
        }
    }
}

/// What a single input line asks for, decided from its shape alone.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Statement<'a> {
    Blank,
    Command(Option<Command>),
    Assignment(&'a str),
    Expression(&'a str),
}

impl<'a> Statement<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            Statement::Blank
        } else if line.starts_with('/') {
            Statement::Command(Command::from_str(line))
        } else if line.contains('=') {
            Statement::Assignment(line)
        } else {
            Statement::Expression(line)
        }
    }
}

/// Handles `name = value`, where value is an integer literal or another variable.
///
/// Only the first `=` separates the two sides, so `a = b = 5` is rejected as an
/// invalid value rather than chained. Nothing is written unless both sides
/// resolve.
pub fn assign(line: &str, variables: &mut Variables) -> Result<(), Error> {
    let (name, value) = line.split_once('=').ok_or(Error::InvalidAssignment)?;
    let name = Identifier::try_from(name.trim())?;
    let value = value.trim();
    let value = if is_identifier(value) {
        variables
            .get(value)
            .cloned()
            .ok_or(Error::UnknownVariable)?
    } else {
        parse_integer(value).ok_or(Error::InvalidAssignment)?
    };
    variables.insert(name, value);
    Ok(())
}
