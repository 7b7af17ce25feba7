//! A tiny interactive command interpreter.
//!
//! Each line typed at the prompt is split on whitespace into a command name and its
//! arguments. A handful of commands (`cd`, `pwd`, `help`, `exit`) are built in; anything
//! else is looked up on the search path and run as a child process, and the shell waits
//! for it before prompting again. There are no pipes, redirections, quotes or variables.
//!
//! The main entry point is [`Interpreter`], which dispatches tokenized lines to an
//! ordered list of command factories and drives the read-eval loop over any
//! [`reader::LineSource`].

mod buffer;
mod builtin;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod external;
mod interpreter;
pub mod prompt;
pub mod reader;
pub mod tokenizer;

/// Name used to prefix every diagnostic.
pub const SHELL_NAME: &str = "noosh";

pub use builtin::builtin_names;
pub use command::{CommandResult, ExitCode, Streams};
pub use error::{Result, ShellError};
pub use external::{CANNOT_EXECUTE_STATUS, NOT_FOUND_STATUS, find_command_path};
/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Serializes tests that read or change the process' working directory.
    pub(crate) fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
