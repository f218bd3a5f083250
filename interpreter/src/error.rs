use thiserror::Error;

/// Everything that can go wrong while handling a single line.
///
/// The messages are the exact text shown to the user; none of the variants
/// carry a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid expression")]
    InvalidExpression,
    #[error("Invalid identifier")]
    InvalidIdentifier,
    #[error("Invalid assignment")]
    InvalidAssignment,
    #[error("Unknown variable")]
    UnknownVariable,
    #[error("Unknown command")]
    UnknownCommand,
    #[error("Division by zero")]
    DivisionByZero,
}
