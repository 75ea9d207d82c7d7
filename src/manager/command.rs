use std::str::FromStr;

use derive_more::Display;
use snafu::Snafu;

const CREATE: &str = "CREATE";
const MOVE: &str = "MOVE";
const DELETE: &str = "DELETE";
const LIST: &str = "LIST";

/// A parsed directory command.
///
/// The `Display` form is the confirmation line printed once the command runs,
/// which echoes the operands exactly as they were given.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Command {
    #[display("CREATE {path}")]
    Create { path: String },
    #[display("MOVE {source} {destination}")]
    Move { source: String, destination: String },
    #[display("DELETE {path}")]
    Delete { path: String },
    #[display("LIST")]
    List,
}

impl FromStr for Command {
    type Err = CommandParseError;

    /// Splits on the first two single spaces, so the last operand keeps any
    /// further spaces and paths themselves cannot contain one.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.splitn(3, ' ');
        let action = parts.next().unwrap_or_default();
        let first = parts.next();
        let second = parts.next();

        match action {
            CREATE => Ok(Command::Create {
                path: first.unwrap_or_default().to_string(),
            }),
            MOVE => match (first, second) {
                (Some(source), Some(destination)) => Ok(Command::Move {
                    source: source.to_string(),
                    destination: destination.to_string(),
                }),
                _ => MissingOperandSnafu {
                    action: MOVE,
                    command: line,
                }
                .fail(),
            },
            DELETE => Ok(Command::Delete {
                path: first.unwrap_or_default().to_string(),
            }),
            LIST => Ok(Command::List),
            _ => UnsupportedCommandSnafu { command: line }.fail(),
        }
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum CommandParseError {
    #[snafu(display("Unsupported command: {command}"))]
    UnsupportedCommand { command: String },
    #[snafu(display("Invalid {action} command: {command}"))]
    MissingOperand {
        action: &'static str,
        command: String,
    },
}
