use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UfwCliError {
    #[error("failed to start `{invocation}`: {source}")]
    SpawnFailed {
        invocation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{invocation}` exited with {status}")]
    ExitFailed {
        invocation: String,
        status: ExitStatus,
    },

    #[error("failed to read port list: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, UfwCliError>;
