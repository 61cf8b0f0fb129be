use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::domain::model::{Action, OutputFormat};
use crate::domain::set::SignalSet;
use crate::domain::signal::Signal;
use crate::utils::error::{Result, SignalError};
use crate::utils::validation::{self, Validate};
use clap::Parser;

/// Command line of `signal-watch`. Values given here override the ones
/// from the `--config` file.
#[derive(Debug, Clone, Parser)]
#[command(name = "signal-watch")]
#[command(about = "Print the Unix signals this process receives")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Signals to watch, e.g. INT,TERM,USR1 (default: all supported)
    #[arg(long, value_delimiter = ',')]
    pub signals: Vec<Signal>,

    /// Signals that stop the watcher with exit code 0
    #[arg(long, value_delimiter = ',')]
    pub exit_on: Vec<Signal>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Stop after this many signals
    #[arg(long)]
    pub max_signals: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Write logs as JSON")]
    pub log_json: bool,

    #[arg(skip)]
    pub file: Option<TomlConfig>,
}

impl CliConfig {
    /// Loads the `--config` file, if any.
    pub fn load_file(&mut self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
            tracing::debug!("Loading configuration from {}", path);
            self.file = Some(TomlConfig::from_file(path)?);
        }
        Ok(())
    }

    fn file_config(&self) -> TomlConfig {
        self.file.clone().unwrap_or_default()
    }
}

impl ConfigProvider for CliConfig {
    fn signals(&self) -> Result<SignalSet> {
        if self.signals.is_empty() {
            return self.file_config().signals();
        }
        SignalSet::from_signals(self.signals.iter().copied()).ok_or_else(|| {
            SignalError::MissingConfigError {
                field: "signals".to_string(),
            }
        })
    }

    fn output_format(&self) -> OutputFormat {
        self.format
            .unwrap_or_else(|| self.file_config().output_format())
    }

    fn actions(&self) -> Vec<(Signal, Action)> {
        let mut actions: Vec<(Signal, Action)> = self
            .file_config()
            .actions()
            .into_iter()
            .filter(|(signal, _)| !self.exit_on.contains(signal))
            .collect();
        actions.extend(
            self.exit_on
                .iter()
                .map(|signal| (*signal, Action::Exit { code: 0 })),
        );
        actions
    }

    fn max_signals(&self) -> Option<u64> {
        self.max_signals.or(self.file_config().max_signals())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }

        if let Some(file) = &self.file {
            file.validate()?;
        }

        if let Some(max) = self.max_signals {
            validation::validate_positive_number("max_signals", max, 1)?;
        }

        validation::validate_unique_signals("exit_on", &self.exit_on)?;

        let watched = self.signals()?;
        for (signal, _) in self.actions() {
            if !watched.contains(signal) {
                return Err(SignalError::InvalidConfigValueError {
                    field: "actions".to_string(),
                    value: signal.name().to_string(),
                    reason: "Signal is not being watched".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("signal-watch").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert_eq!(config.signals().unwrap(), SignalSet::all());
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.max_signals(), None);
        assert!(config.actions().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_signal_lists() {
        let config = parse(&[
            "--signals",
            "INT,usr1,SIGTERM",
            "--exit-on",
            "term",
            "--format",
            "json",
            "--max-signals",
            "3",
        ]);
        assert_eq!(
            config.signals().unwrap(),
            Signal::Interrupt | Signal::User1 | Signal::Terminate
        );
        assert_eq!(
            config.actions(),
            vec![(Signal::Terminate, Action::Exit { code: 0 })]
        );
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.max_signals(), Some(3));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_signal_is_a_parse_error() {
        let result = CliConfig::try_parse_from(["signal-watch", "--signals", "HUP"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let mut config = parse(&["--format", "text", "--exit-on", "USR1"]);
        config.file = Some(
            TomlConfig::from_toml_str(
                r#"
[watch]
format = "json"
max_signals = 5

[[actions]]
signal = "USR1"
action = "ignore"

[[actions]]
signal = "QUIT"
action = "log"
"#,
            )
            .unwrap(),
        );

        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.max_signals(), Some(5));
        assert_eq!(
            config.actions(),
            vec![
                (Signal::Quit, Action::Log),
                (Signal::User1, Action::Exit { code: 0 }),
            ]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_unwatched_exit_signal() {
        let config = parse(&["--signals", "INT", "--exit-on", "TERM"]);
        assert!(config.validate().is_err());

        let config = parse(&["--exit-on", "TERM,TERM"]);
        assert!(config.validate().is_err());

        let config = parse(&["--max-signals", "0"]);
        assert!(config.validate().is_err());
    }
}
