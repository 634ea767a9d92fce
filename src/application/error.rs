//! Application-level errors: chart files, settings and the ordering engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::application::ChartFormat;
use crate::domain::DomainError;

#[derive(Error, Debug)]
pub enum ApplicationError {
    /// The records were read but cannot be ordered.
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("no chart at {0}")]
    ChartNotFound(PathBuf),

    #[error("{0} already exists (pass --force to replace it)")]
    ChartExists(PathBuf),

    #[error("{path} is not a valid {format} chart: {message}")]
    InvalidChart {
        path: PathBuf,
        format: ChartFormat,
        message: String,
    },

    #[error("cannot write chart as {format}: {message}")]
    Encode { format: ChartFormat, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("cannot {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
