//! Error type shared by the interpreter's components.

use rustyline::error::ReadlineError;
use std::collections::TryReserveError;
use std::io;
use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ShellError>;

/// Everything that can go wrong while reading, splitting or dispatching a command.
///
/// Failures a user can cause by typing something wrong (a bad `cd` target, an unknown
/// program) never show up here: commands report those on the error stream themselves
/// and keep the loop running. What is left is split by [`ShellError::is_fatal`].
#[derive(Debug, Error)]
pub enum ShellError {
    /// A growable buffer could not be extended.
    #[error("allocation error while growing the {what}")]
    Allocation {
        /// Which buffer was being grown.
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    /// The operating system could not report the current working directory.
    #[error("cannot determine the current directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// Reading from the input stream failed.
    #[error("cannot read input: {0}")]
    Read(#[source] io::Error),

    /// The interactive line editor failed.
    #[error("line editor failure: {0}")]
    Editor(#[from] ReadlineError),

    /// Writing command output failed.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Whether this error must stop the interpreter instead of being reported and skipped.
    pub fn is_fatal(&self) -> bool {
        match self {
            ShellError::Allocation { .. }
            | ShellError::CurrentDir(_)
            | ShellError::Read(_)
            | ShellError::Editor(_) => true,
            ShellError::Io(_) => false,
        }
    }
}
