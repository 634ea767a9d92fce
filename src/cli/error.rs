//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("render output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::Output(_) => exitcode::SOFTWARE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) | ApplicationError::InvalidChart { .. } => exitcode::DATAERR,
                ApplicationError::ChartNotFound(_) => exitcode::NOINPUT,
                ApplicationError::ChartExists(_) => exitcode::CANTCREAT,
                ApplicationError::Encode { .. } => exitcode::SOFTWARE,
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::Io { .. } => exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_exit_codes_follow_sysexits() {
        let domain = CliError::from(ApplicationError::from(DomainError::DuplicateKey("Assets".into())));
        let missing = CliError::from(ApplicationError::ChartNotFound(PathBuf::from("chart.toml")));
        let config = CliError::from(ApplicationError::Config {
            message: "bad".into(),
        });

        assert_eq!(domain.exit_code(), exitcode::DATAERR);
        assert_eq!(missing.exit_code(), exitcode::NOINPUT);
        assert_eq!(config.exit_code(), exitcode::CONFIG);
        assert_eq!(CliError::Usage("no chart".into()).exit_code(), exitcode::USAGE);
    }

    #[test]
    fn test_existing_chart_cannot_be_created() {
        let err = CliError::from(ApplicationError::ChartExists(PathBuf::from("chart.toml")));
        assert_eq!(err.exit_code(), exitcode::CANTCREAT);
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn test_domain_message_is_shown_unchanged() {
        let err = CliError::from(ApplicationError::from(DomainError::DuplicateKey("Assets".into())));
        assert_eq!(err.to_string(), DomainError::DuplicateKey("Assets".into()).to_string());
    }
}
