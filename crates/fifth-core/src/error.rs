use thiserror::Error;

use crate::command::Command;
use crate::stack::Stack;

/// Failure of a single stack operation. The stack is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("'{command}' requires at least one value on the stack")]
    EmptyStack { command: &'static str },

    #[error("'{operator}' requires at least two values on the stack")]
    InsufficientOperands { operator: &'static str },

    #[error("'/' arithmetic operator cannot divide by zero")]
    DivisionByZero,

    #[error("'{operator}' arithmetic operator overflowed the integer range")]
    Overflow { operator: &'static str },
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("command {command} at position {index} failed")]
    Command {
        /// Zero-based position in the command list.
        index: usize,
        command: Command,
        /// Stack contents left by the last successful command.
        stack: Stack,
        #[source]
        source: StackError,
    },

    #[error("invalid command: {0}")]
    InvalidCommand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Returns the underlying stack failure when a command was rejected.
    pub fn stack_error(&self) -> Option<StackError> {
        match self {
            Self::Command { source, .. } => Some(*source),
            _ => None,
        }
    }
}
