use payoff_config::ConfigError;
use payoff_core::CoreError;
use thiserror::Error;

/// Unified error type for the layers below the shell.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Backup not found: {0}")]
    BackupNotFound(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BackupNotFound(name) => AppError::BackupNotFound(name),
            CoreError::Io(err) => AppError::Storage(err.to_string()),
            CoreError::Serde(message) | CoreError::Storage(message) => AppError::Storage(message),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => AppError::Storage(io.to_string()),
            ConfigError::Serde(message) => AppError::Config(message),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        CliError::from(AppError::from(err))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(AppError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}
