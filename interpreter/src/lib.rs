mod error;
mod identifier;
pub mod parser;
mod session;
mod statement;
mod value;

pub use error::Error;
pub use identifier::{is_identifier, Identifier};
pub use parser::{to_postfix, validate, Operator};
pub use session::{Reply, Session, BYE, HELP};
pub use statement::{assign, Command, Statement};
pub use value::{calculate, evaluate, parse_integer, Variables};
