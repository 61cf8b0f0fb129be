use crate::core::ConfigProvider;
use crate::domain::model::{Action, OutputFormat};
use crate::domain::set::SignalSet;
use crate::domain::signal::Signal;
use crate::utils::error::{Result, SignalError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchConfig {
    pub signals: Option<Vec<Signal>>,
    pub format: Option<OutputFormat>,
    pub max_signals: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    pub signal: Signal,
    pub action: ActionKind,
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Log,
    Ignore,
    Exit,
}

impl ActionConfig {
    pub fn to_action(&self) -> Action {
        match self.action {
            ActionKind::Log => Action::Log,
            ActionKind::Ignore => Action::Ignore,
            ActionKind::Exit => Action::Exit {
                code: self.exit_code.unwrap_or(0),
            },
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SignalError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SignalError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value, leaving unknown
    /// variables as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SignalError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(signals) = &self.watch.signals {
            validation::validate_non_empty_signals("watch.signals", signals)?;
        }

        if let Some(max) = self.watch.max_signals {
            validation::validate_positive_number("watch.max_signals", max, 1)?;
        }

        validation::validate_unique_signals("actions", self.actions.iter().map(|a| &a.signal))?;

        let watched = self.signals()?;
        for action in &self.actions {
            if !watched.contains(action.signal) {
                return Err(SignalError::InvalidConfigValueError {
                    field: "actions.signal".to_string(),
                    value: action.signal.name().to_string(),
                    reason: "Signal is not in watch.signals".to_string(),
                });
            }

            match (action.action, action.exit_code) {
                (ActionKind::Exit, Some(code)) => {
                    validation::validate_exit_code("actions.exit_code", code)?;
                }
                (ActionKind::Exit, None) => {}
                (_, Some(code)) => {
                    return Err(SignalError::InvalidConfigValueError {
                        field: "actions.exit_code".to_string(),
                        value: code.to_string(),
                        reason: "exit_code is only allowed with action = \"exit\"".to_string(),
                    });
                }
                (_, None) => {}
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn signals(&self) -> Result<SignalSet> {
        match &self.watch.signals {
            None => Ok(SignalSet::all()),
            Some(signals) => SignalSet::from_signals(signals.iter().copied()).ok_or_else(|| {
                SignalError::MissingConfigError {
                    field: "watch.signals".to_string(),
                }
            }),
        }
    }

    fn output_format(&self) -> OutputFormat {
        self.watch.format.unwrap_or_default()
    }

    fn actions(&self) -> Vec<(Signal, Action)> {
        self.actions
            .iter()
            .map(|a| (a.signal, a.to_action()))
            .collect()
    }

    fn max_signals(&self) -> Option<u64> {
        self.watch.max_signals
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
