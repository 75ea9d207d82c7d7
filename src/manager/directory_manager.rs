use std::io::Write;

use snafu::{ResultExt, Snafu};
use tracing::{debug, info};

use crate::filesystem::{DirectoryError, DirectoryTree};
use crate::manager::{Command, CommandParseError};

const INDENT: &str = "  ";

/// Applies textual commands to an in-memory directory tree.
///
/// Every instance owns its own tree, so separate managers never observe each
/// other's changes.
#[derive(Debug, Default)]
pub struct DirectoryManager {
    tree: DirectoryTree,
}

impl DirectoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &DirectoryTree {
        &self.tree
    }

    /// Parses and runs a single command, writing its report lines to `out`.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<(), CommandError> {
        let command: Command = line.parse()?;
        debug!("Executing {:?}", command);

        match &command {
            Command::Create { path } => {
                self.tree.create(path)?;
                writeln!(out, "{command}").context(OutputSnafu)?;
            }
            Command::Move {
                source,
                destination,
            } => {
                self.tree.move_directory(source, destination)?;
                writeln!(out, "{command}").context(OutputSnafu)?;
            }
            Command::Delete { path } => {
                writeln!(out, "{command}").context(OutputSnafu)?;
                if !self.tree.delete(path)? {
                    info!("Nothing to delete at '{}'", path);
                    writeln!(out, "Cannot delete {path} - does not exist").context(OutputSnafu)?;
                }
            }
            Command::List => {
                writeln!(out, "{command}").context(OutputSnafu)?;
                for entry in self.listing() {
                    writeln!(out, "{entry}").context(OutputSnafu)?;
                }
            }
        }

        Ok(())
    }

    /// The indented lines printed by `LIST`, without the header.
    pub fn listing(&self) -> Vec<String> {
        if self.tree.is_empty() {
            return Vec::new();
        }
        let mut lines = Vec::with_capacity(self.tree.len());
        self.tree.walk(|depth, node| {
            lines.push(format!("{}{}", INDENT.repeat(depth), node.name()));
        });
        lines
    }
}

#[derive(Debug, Snafu)]
pub enum CommandError {
    #[snafu(transparent)]
    InvalidCommand { source: CommandParseError },
    #[snafu(transparent)]
    InvalidDirectory { source: DirectoryError },
    #[snafu(display("Failed to write command output"))]
    OutputError { source: std::io::Error },
}
