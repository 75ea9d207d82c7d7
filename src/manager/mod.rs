//! Command parsing and dispatch on top of the directory tree.

mod command;
mod directory_manager;

pub use command::{Command, CommandParseError};
pub use directory_manager::{CommandError, DirectoryManager};
