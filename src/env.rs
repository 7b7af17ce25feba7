use crate::command::ExitCode;
use std::env as stdenv;
use std::ffi::OsString;

/// Search path used when `PATH` is not set, the same fallback `execvp` uses.
pub const DEFAULT_SEARCH_PATH: &str = "/bin:/usr/bin";

/// State the interpreter keeps between commands.
///
/// The working directory is deliberately not part of it: `cd` changes the directory of
/// the whole process, and everything else reads it back from the operating system.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Directories searched for external programs, in `PATH` syntax.
    pub search_path: OsString,
    /// Exit code of the most recent external command, 0 before any ran.
    pub last_status: ExitCode,
}

impl Environment {
    /// Capture the search path of the current process.
    pub fn new() -> Self {
        let search_path =
            stdenv::var_os("PATH").unwrap_or_else(|| OsString::from(DEFAULT_SEARCH_PATH));
        Self::with_search_path(search_path)
    }

    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: search_path.into(),
            last_status: 0,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
