use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

const COMMANDS_KEY: &str = "commands";

/// Runs when no script file is given on the command line.
const DEMO_COMMANDS: &[&str] = &[
    "CREATE fruits",
    "CREATE vegetables",
    "CREATE grains",
    "CREATE fruits/apples",
    "CREATE fruits/apples/fuji",
    "LIST",
    "CREATE grains/squash",
    "MOVE grains/squash vegetables",
    "CREATE foods",
    "MOVE grains foods",
    "MOVE fruits foods",
    "MOVE vegetables foods",
    "LIST",
    "DELETE fruits/apples",
    "DELETE foods/fruits/apples",
    "LIST",
];

/// Ordered list of command lines to feed to the directory manager.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandScript {
    commands: Vec<String>,
}

impl CommandScript {
    pub fn demo() -> Self {
        CommandScript {
            commands: DEMO_COMMANDS.iter().map(|command| command.to_string()).collect(),
        }
    }

    /// Loads a YAML script of the form `commands: [<command>, ...]`.
    pub async fn read(path: &Path) -> Result<Self, CommandScriptError> {
        debug!("Opening command script: {}", path.display());
        let bytes = fs::read(path)
            .await
            .context(ReadSnafu { file_path: path })?;
        debug!("Successfully read command script: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu { file_path: path })?;
        contents.as_str().try_into()
    }

    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn parse_commands_from_yaml(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<String>, CommandScriptError> {
        let commands = top_level
            .get(&Yaml::Value(Scalar::String(Cow::Borrowed(COMMANDS_KEY))))
            .unwrap_or(&Yaml::Sequence(Vec::new()))
            .as_sequence()
            .context(CommandsNotSequenceSnafu)?
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| match entry.as_str() {
                Some(command) => Some(command.to_string()),
                None => {
                    warn!("Skipping non-text command entry #{}: {:?}", index, entry);
                    None
                }
            })
            .collect::<Vec<_>>();

        Ok(commands)
    }
}

impl TryFrom<&str> for CommandScript {
    type Error = CommandScriptError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedScriptSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        let commands = Self::parse_commands_from_yaml(top_level)?;
        debug!("Parsed {} commands from script", commands.len());

        Ok(CommandScript { commands })
    }
}

#[derive(Debug, Snafu)]
pub enum CommandScriptError {
    #[snafu(display("Failed to read the command script: {}", file_path.display()))]
    ReadError {
        file_path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Command script {} is not valid UTF-8", file_path.display()))]
    EncodingError {
        file_path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the command script"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted command script"))]
    MalformedScript,
    #[snafu(display("Top level of the command script should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Commands section should be a list"))]
    CommandsNotSequence,
}
