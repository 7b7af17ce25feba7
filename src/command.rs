use crate::env::Environment;
use crate::error::Result;
use crate::tokenizer::TokenList;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Children killed by a signal are recorded as `128 + signal`, as POSIX shells do.
pub type ExitCode = i32;

/// What the command loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// Read the next line.
    Continue,
    /// Leave the loop.
    Terminate,
}

/// Output and error streams handed to every command.
///
/// Builtins write through these so that their output can be captured; external programs
/// inherit the process' own standard streams instead.
pub struct Streams<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl<'a> Streams<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }
}

/// Object-safe trait for any command that can be executed by the shell.
///
/// This is implemented by built-ins via a blanket impl and by external commands.
pub trait ExecutableCommand {
    /// Executes the command.
    ///
    /// Problems caused by the command line itself are reported on `io.err` and still
    /// yield `Ok`; only errors the loop has to know about are returned.
    fn execute(
        self: Box<Self>,
        io: &mut Streams<'_>,
        env: &mut Environment,
    ) -> Result<CommandResult>;
}

/// Factory that tries to create a command from a tokenized command line.
///
/// Returns `None` when the factory doesn't recognize the command name.
pub trait CommandFactory {
    /// Name of the builtin this factory creates, `None` for the external launcher.
    fn name(&self) -> Option<&'static str>;

    /// Attempt to create a command instance for the given tokens.
    fn try_create(
        &self,
        env: &Environment,
        tokens: &TokenList<'_>,
    ) -> Option<Box<dyn ExecutableCommand>>;
}
