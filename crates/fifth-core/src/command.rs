//! The fixed Fifth command vocabulary.
//!
//! [`Command`] is the closed set of operations the stack engine understands.
//! Commands can be parsed from text (one per line, `PUSH 35`, `pop`, ...) or
//! assembled from the CLI flag shape through [`CommandFlags`], which applies
//! the fixed execution priority of the command-line tool.

use std::fmt;
use std::str::FromStr;

use typed_builder::TypedBuilder;

use crate::error::CoreError;

/// A single stack command. Only `Push` carries a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Push(i64),
    Pop,
    Swap,
    Dup,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Command {
    /// Upper-case command name as written in scripts and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Push(_) => "PUSH",
            Self::Pop => "POP",
            Self::Swap => "SWAP",
            Self::Dup => "DUP",
            Self::Add => "ADD",
            Self::Subtract => "SUBTRACT",
            Self::Multiply => "MULTIPLY",
            Self::Divide => "DIVIDE",
        }
    }

    /// Operator symbol for the four arithmetic commands.
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Self::Add => Some("+"),
            Self::Subtract => Some("-"),
            Self::Multiply => Some("*"),
            Self::Divide => Some("/"),
            _ => None,
        }
    }

    pub fn is_arithmetic(&self) -> bool {
        self.operator().is_some()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push(value) => write!(f, "PUSH {value}"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Command {
    type Err = CoreError;

    /// Parse `NAME [ARG]`, case-insensitive. `PUSH` needs exactly one integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CoreError::InvalidCommand("empty command".to_owned()));
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(CoreError::InvalidCommand(format!(
                "too many arguments in '{s}'"
            )));
        }

        let command = match (name.to_ascii_uppercase().as_str(), arg) {
            ("PUSH", Some(arg)) => {
                let value = arg.parse::<i64>().map_err(|e| {
                    CoreError::InvalidCommand(format!(
                        "PUSH argument '{arg}' is not an integer: {e}"
                    ))
                })?;
                Self::Push(value)
            }
            ("PUSH", None) => {
                return Err(CoreError::InvalidCommand(
                    "PUSH requires an integer argument".to_owned(),
                ));
            }
            ("POP", None) => Self::Pop,
            ("SWAP", None) => Self::Swap,
            ("DUP", None) => Self::Dup,
            ("ADD", None) => Self::Add,
            ("SUBTRACT", None) => Self::Subtract,
            ("MULTIPLY", None) => Self::Multiply,
            ("DIVIDE", None) => Self::Divide,
            (upper, Some(_)) if is_known(upper) => {
                return Err(CoreError::InvalidCommand(format!(
                    "{upper} takes no argument"
                )));
            }
            _ => {
                return Err(CoreError::InvalidCommand(format!(
                    "unknown command '{name}'"
                )));
            }
        };
        Ok(command)
    }
}

fn is_known(upper: &str) -> bool {
    matches!(
        upper,
        "POP" | "SWAP" | "DUP" | "ADD" | "SUBTRACT" | "MULTIPLY" | "DIVIDE"
    )
}

/// Parse a script with one command per line.
///
/// Blank lines and lines starting with `#` are skipped. Errors name the
/// 1-based line number.
///
/// # Errors
///
/// Returns `CoreError::InvalidCommand` for the first line that does not parse.
pub fn parse_script(script: &str) -> Result<Vec<Command>, CoreError> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(lineno, line)| {
            line.parse::<Command>().map_err(|e| match e {
                CoreError::InvalidCommand(msg) => {
                    CoreError::InvalidCommand(format!("line {lineno}: {msg}"))
                }
                other => other,
            })
        })
        .collect()
}

/// Commands selected by the command-line flags.
///
/// Each command runs at most once, in the fixed order PUSH, POP, SWAP, DUP,
/// DIVIDE, MULTIPLY, SUBTRACT, ADD regardless of flag order.
///
/// # Examples
///
/// ```
/// use fifth_core::{Command, CommandFlags};
///
/// let flags = CommandFlags::builder().push(35).add(true).pop(true).build();
/// assert_eq!(
///     flags.into_commands(),
///     vec![Command::Push(35), Command::Pop, Command::Add]
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, TypedBuilder)]
pub struct CommandFlags {
    #[builder(default, setter(strip_option))]
    pub push: Option<i64>,
    #[builder(default)]
    pub pop: bool,
    #[builder(default)]
    pub swap: bool,
    #[builder(default)]
    pub dup: bool,
    #[builder(default)]
    pub add: bool,
    #[builder(default)]
    pub subtract: bool,
    #[builder(default)]
    pub multiply: bool,
    #[builder(default)]
    pub divide: bool,
}

impl CommandFlags {
    pub fn into_commands(self) -> Vec<Command> {
        let selected = [
            (self.pop, Command::Pop),
            (self.swap, Command::Swap),
            (self.dup, Command::Dup),
            (self.divide, Command::Divide),
            (self.multiply, Command::Multiply),
            (self.subtract, Command::Subtract),
            (self.add, Command::Add),
        ];

        self.push
            .map(Command::Push)
            .into_iter()
            .chain(
                selected
                    .into_iter()
                    .filter_map(|(on, command)| on.then_some(command)),
            )
            .collect()
    }
}
