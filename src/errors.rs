/*!
 * Error types for the subsync application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while reading or writing a subtitle document
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp did not have the `H:MM:SS,mmm` shape
    #[error("malformed timestamp: `{input}`")]
    MalformedTimestamp {
        /// The offending text as given
        input: String,
    },

    /// The first line of a cue was not a single non-negative integer
    #[error("wrong index line at line {line_number}: `{line}`")]
    WrongIndexLine {
        /// 1-based line number in the input
        line_number: usize,
        /// The line as read, without its terminator
        line: String,
    },

    /// The second line of a cue was not `start --> end`
    #[error("wrong timing line at line {line_number}: `{line}`")]
    WrongTimingLine {
        /// 1-based line number in the input
        line_number: usize,
        /// The line as read, without its terminator
        line: String,
    },

    /// Underlying read or write failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors that prevent a linear re-synchronization
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SyncError {
    /// There is no first or last cue to anchor on
    #[error("document contains no cues")]
    EmptyDocument,

    /// First and last cue start at the same time but must move to different targets
    #[error("cannot compute synchronization: first and last anchor timestamps are identical ({start_ms} ms)")]
    IdenticalAnchors {
        /// The shared start time of the first and last cue
        start_ms: u64,
    },

    /// Requested first time is later than the requested last time
    #[error("first subtitle can not be after last subtitle ({first_ms} ms > {last_ms} ms), please check the values of -f and/or -l options")]
    FirstAfterLast {
        first_ms: u64,
        last_ms: u64,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error opening or creating a file
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing or serialization
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from the synchronizer or anchor validation
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
