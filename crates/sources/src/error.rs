//! Adapter errors.

use thiserror::Error;

/// A line or frame that could not be turned into a reading
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("bad index '{0}'")]
    BadIndex(String),
    #[error("bad number '{0}'")]
    BadNumber(String),
    #[error("frame is not valid UTF-8")]
    NotUtf8,
    #[error("frame '{0}' is not '<code>:<value>'")]
    BadFrame(String),
}

/// Failure talking to an external process or socket
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' exited with {status}: {output}")]
    Exit {
        command: String,
        status: std::process::ExitStatus,
        output: String,
    },
    #[error("socket error on {address}: {source}")]
    Socket {
        address: String,
        #[source]
        source: std::io::Error,
    },
}
