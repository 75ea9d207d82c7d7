use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Apply CREATE / MOVE / DELETE / LIST commands to an in-memory directory tree.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// YAML file with a `commands` list; the built-in demo runs when omitted
    pub script: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// Never color the error prefix
    #[clap(long)]
    pub no_color: bool,
}
