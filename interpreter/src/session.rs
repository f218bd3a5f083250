use std::{
    fmt::Display,
    io::{self, BufRead, Write},
};

use num::BigInt;

use crate::{
    error::Error,
    statement::{assign, Command, Statement},
    value::{calculate, Variables},
};

pub const HELP: &str = "The program calculates integer expressions with + - * / ^ and parentheses.\n\
Assign a variable with `name = value`, where the value is a number or another variable,\n\
then use its name in expressions. Type /exit to quit.";

pub const BYE: &str = "Bye!";

/// The outcome of a single line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Reply {
    Silent,
    Value(BigInt),
    Help,
    Error(Error),
    Exit,
}

impl Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Silent => Ok(()),
            Reply::Value(value) => write!(f, "{value}"),
            Reply::Help => write!(f, "{HELP}"),
            Reply::Error(err) => write!(f, "{err}"),
            Reply::Exit => write!(f, "{BYE}"),
        }
    }
}

/// Holds the variables for as long as the user keeps typing.
#[derive(Default, Debug)]
pub struct Session {
    variables: Variables,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn execute(&mut self, line: &str) -> Reply {
        match Statement::parse(line) {
            Statement::Blank => Reply::Silent,
            Statement::Command(Some(Command::Exit)) => Reply::Exit,
            Statement::Command(Some(Command::Help)) => Reply::Help,
            Statement::Command(None) => Reply::Error(Error::UnknownCommand),
            Statement::Assignment(line) => match assign(line, &mut self.variables) {
                Ok(()) => Reply::Silent,
                Err(err) => Reply::Error(err),
            },
            Statement::Expression(expr) => {
                calculate(expr, &self.variables).map_or_else(Reply::Error, Reply::Value)
            }
        }
    }

    /// Reads lines until `/exit` or the end of input, then says goodbye.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        for line in input.lines() {
            let reply = self.execute(&line?);
            match reply {
                Reply::Exit => break,
                Reply::Silent => {}
                _ => writeln!(output, "{reply}")?,
            }
        }
        writeln!(output, "{BYE}")?;
        output.flush()
    }
}
