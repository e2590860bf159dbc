use std::io;

use thiserror::Error;

use crate::strings::completion_code_desc;

/// Result type used across this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error reported by the transport or the output sink.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The controller produced no response within the transport's deadline.
    #[error("timeout waiting for response")]
    Timeout,

    /// The controller answered with a nonzero completion code.
    #[error(
        "completion code {completion_code:#04x}: {}",
        completion_code_desc(*completion_code).unwrap_or("unknown error")
    )]
    Device {
        /// Raw completion code returned by the BMC.
        completion_code: u8,
    },

    /// Response payload shorter than the fixed layout being decoded.
    #[error("{command} response too short: {len} bytes, need {min}")]
    ShortResponse {
        /// Command whose response was truncated.
        command: &'static str,
        /// Bytes actually received.
        len: usize,
        /// Minimum bytes the layout requires.
        min: usize,
    },

    /// A channel subcommand was invoked with the wrong argument shape.
    #[error("bad channel command usage")]
    Usage,

    /// The first argument did not name a known channel subcommand.
    #[error("invalid channel command: {0}")]
    InvalidCommand(String),

    /// A `setaccess` option outside the recognized key set.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// Invalid caller-supplied argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
