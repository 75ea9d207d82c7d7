mod command_script;

pub use command_script::{CommandScript, CommandScriptError};
