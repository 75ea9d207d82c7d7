use std::io::{self, Write};

use colored::Colorize;
use snafu::Snafu;
use snafu::prelude::*;
use supports_color::Stream;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::config::{CommandScript, CommandScriptError};
use crate::manager::{CommandError, DirectoryManager};

const ERROR_PREFIX: &str = "Error:";

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let script = match &app_config.script {
            Some(path) => CommandScript::read(path).await.context(ScriptSnafu)?,
            None => {
                info!("No command script given, running the built-in demo");
                CommandScript::demo()
            }
        };
        debug!("Loaded command script: {:?}", script);
        if script.is_empty() {
            info!("Command script contains no commands");
        }

        let color = app_config.color && supports_color::on(Stream::Stderr).is_some();
        let mut manager = DirectoryManager::new();
        let failed = Self::process(
            &mut manager,
            script.commands(),
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
            color,
        )?;
        info!(
            "Processed {} commands, {} failed, {} directories left",
            script.len(),
            failed,
            manager.tree().len()
        );

        Ok(())
    }

    /// Feeds `commands` to `manager` one at a time.
    ///
    /// A failing command is reported on `err` as `Error: <message>` and the
    /// loop moves on; only a broken output stream stops it. Returns the number
    /// of failed commands.
    pub fn process<'a>(
        manager: &mut DirectoryManager,
        commands: impl IntoIterator<Item = &'a str>,
        out: &mut impl Write,
        err: &mut impl Write,
        color: bool,
    ) -> Result<usize, ApplicationError> {
        let mut failed = 0;

        for command in commands {
            match manager.execute(command, out) {
                Ok(()) => debug!("Command '{}' completed", command),
                Err(CommandError::OutputError { source }) => {
                    return Err(source).context(OutputSnafu);
                }
                Err(error) => {
                    debug!("Command '{}' failed: {}", command, error);
                    failed += 1;
                    Self::report(err, &error, color).context(OutputSnafu)?;
                }
            }
        }

        out.flush().context(OutputSnafu)?;
        Ok(failed)
    }

    fn report(err: &mut impl Write, error: &CommandError, color: bool) -> io::Result<()> {
        if color {
            writeln!(err, "{} {}", ERROR_PREFIX.red().bold(), error)
        } else {
            writeln!(err, "{} {}", ERROR_PREFIX, error)
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the command script"))]
    ScriptError { source: CommandScriptError },
    #[snafu(display("Critical failure encountered while writing output"))]
    OutputError { source: std::io::Error },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::application::data::LogLevel;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .map_err(|_| io::Error::other("poisoned"))?
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn process(commands: &[&str]) -> (usize, String, String) {
        let mut manager = DirectoryManager::new();
        let mut out = Vec::new();
        let mut err = Vec::new();

        let failed = Application::process(
            &mut manager,
            commands.iter().copied(),
            &mut out,
            &mut err,
            false,
        )
        .expect("Processing should not fail");

        (
            failed,
            String::from_utf8(out).expect("Output should be UTF-8"),
            String::from_utf8(err).expect("Errors should be UTF-8"),
        )
    }

    #[test]
    fn test_demo_script_output() {
        let script = CommandScript::demo();
        let commands = script.commands().collect::<Vec<_>>();

        let (failed, out, err) = process(&commands);

        assert_eq!(failed, 0);
        assert_eq!(err, "");
        assert_eq!(
            out,
            "\
CREATE fruits
CREATE vegetables
CREATE grains
CREATE fruits/apples
CREATE fruits/apples/fuji
LIST
  fruits
    apples
      fuji
  grains
  vegetables
CREATE grains/squash
MOVE grains/squash vegetables
CREATE foods
MOVE grains foods
MOVE fruits foods
MOVE vegetables foods
LIST
  foods
    fruits
      apples
        fuji
    grains
    vegetables
      squash
DELETE fruits/apples
Cannot delete fruits/apples - does not exist
DELETE foods/fruits/apples
LIST
  foods
    fruits
    grains
    vegetables
      squash
"
        );
    }

    #[test]
    fn test_errors_are_reported_and_processing_continues() {
        let (failed, out, err) = process(&[
            "CREATE fruits",
            "RENAME fruits berries",
            "MOVE fruits nowhere",
            "MOVE fruits",
            "CREATE",
            "LIST",
        ]);

        assert_eq!(failed, 4);
        assert_eq!(out, "CREATE fruits\nLIST\n  fruits\n");
        assert_eq!(
            err,
            "Error: Unsupported command: RENAME fruits berries\n\
             Error: Cannot move fruits - destination does not exist\n\
             Error: Invalid MOVE command: MOVE fruits\n\
             Error: Invalid path: \n"
        );
    }

    #[test]
    fn test_colored_error_prefix_keeps_message() {
        let mut manager = DirectoryManager::new();
        let mut out = Vec::new();
        let mut err = Vec::new();

        Application::process(&mut manager, ["BOGUS"], &mut out, &mut err, true)
            .expect("Processing should not fail");

        let err = String::from_utf8(err).expect("Errors should be UTF-8");
        assert!(err.contains("Error:"));
        assert!(err.ends_with(" Unsupported command: BOGUS\n"));
    }

    #[compio::test]
    async fn test_run_fails_on_missing_script() {
        let config = RuntimeConfig {
            script: Some("does/not/exist.yaml".into()),
            color: false,
        };

        let result = Application::run(config).await;

        assert!(matches!(result, Err(ApplicationError::ScriptError { .. })));
    }

    #[test]
    fn test_failures_only_produce_error_lines_at_default_log_level() {
        let diagnostics = SharedBuffer::default();
        let writer = diagnostics.clone();
        let level = LogLevel::default()
            .to_tracing_level()
            .expect("Default level should log");
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(move || writer.clone())
            .without_time()
            .compact()
            .finish();

        let (failed, _, err) = tracing::subscriber::with_default(subscriber, || {
            process(&["", "   ", "CREATE a", "MOVE a a", "BOGUS"])
        });

        assert_eq!(failed, 4);
        assert_eq!(
            err,
            "Error: Unsupported command: \n\
             Error: Unsupported command:    \n\
             Error: Cannot move a - destination a is inside it\n\
             Error: Unsupported command: BOGUS\n"
        );
        let logged = diagnostics.0.lock().expect("Buffer lock").clone();
        assert_eq!(String::from_utf8(logged).expect("Logs should be UTF-8"), "");
    }
}
