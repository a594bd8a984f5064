use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{command} exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("output of {command} is not valid utf-8")]
    InvalidUtf8 { command: String },

    #[error("unable to read xrandr output from {path:?}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error on persisting configuration to {path:?}, changes will be lost after reboot: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid orientation {0:?}, expected one of normal, left, right, inverted")]
    InvalidOrientation(String),

    #[error("invalid resolution {0:?}, expected WIDTHxHEIGHT")]
    InvalidResolution(String),

    #[error("invalid rate {0:?}, expected a positive number")]
    InvalidRate(String),

    #[error("no output named {0:?}")]
    UnknownOutput(String),

    #[cfg(feature = "json")]
    #[error("unable to render topology as json: {0}")]
    Json(#[from] serde_json::Error),
}
