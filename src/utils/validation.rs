use crate::domain::signal::Signal;
use crate::utils::error::{Result, SignalError};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SignalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SignalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SignalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SignalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_exit_code(field_name: &str, code: i32) -> Result<()> {
    validate_range(field_name, code, 0, 255)
}

pub fn validate_non_empty_signals(field_name: &str, signals: &[Signal]) -> Result<()> {
    if signals.is_empty() {
        return Err(SignalError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "At least one signal is required".to_string(),
        });
    }
    Ok(())
}

pub fn validate_unique_signals<'a, I>(field_name: &str, signals: I) -> Result<()>
where
    I: IntoIterator<Item = &'a Signal>,
{
    let mut seen = HashSet::new();
    for signal in signals {
        if !seen.insert(*signal) {
            return Err(SignalError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: signal.name().to_string(),
                reason: "Signal is listed more than once".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("config", "watch.toml").is_ok());
        assert!(validate_path("config", "").is_err());
        assert!(validate_path("config", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_signals", 5, 1).is_ok());
        assert!(validate_positive_number("max_signals", 0, 1).is_err());
    }

    #[test]
    fn test_validate_exit_code() {
        assert!(validate_exit_code("exit_code", 0).is_ok());
        assert!(validate_exit_code("exit_code", 255).is_ok());
        assert!(validate_exit_code("exit_code", 256).is_err());
        assert!(validate_exit_code("exit_code", -1).is_err());
    }

    #[test]
    fn test_validate_signal_lists() {
        assert!(validate_non_empty_signals("signals", &[]).is_err());
        assert!(validate_non_empty_signals("signals", &[Signal::Quit]).is_ok());

        let unique = [Signal::Interrupt, Signal::Terminate];
        assert!(validate_unique_signals("actions", &unique).is_ok());

        let duplicated = [Signal::User1, Signal::Interrupt, Signal::User1];
        match validate_unique_signals("actions", &duplicated) {
            Err(SignalError::InvalidConfigValueError { value, .. }) => {
                assert_eq!(value, "SIGUSR1")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
