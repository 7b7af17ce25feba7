use crate::SHELL_NAME;
use crate::command::{CommandFactory, CommandResult, ExecutableCommand, Streams};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::tokenizer::TokenList;
use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::{OsStr, OsString};

/// Built-in commands known to the shell at compile time.
///
/// Builtins run in-process without spawning a child. They get the words after their name
/// exactly as typed: nothing is treated as an option, so `cd -x` means the directory `-x`.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "pwd" or "cd".
    fn name() -> &'static str;

    /// Build the command from the words following its name.
    fn from_args(args: &[&OsStr]) -> Self;

    /// Executes the command using provided streams and environment.
    ///
    /// An error is printed to the error stream and the loop continues, unless it wraps a
    /// fatal [`ShellError`].
    fn execute(self, io: &mut Streams<'_>, env: &mut Environment) -> Result<CommandResult>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        io: &mut Streams<'_>,
        env: &mut Environment,
    ) -> crate::error::Result<CommandResult> {
        match <T as BuiltinCommand>::execute(*self, io, env) {
            Ok(signal) => Ok(signal),
            Err(e) => match e.downcast::<ShellError>() {
                Ok(err) if err.is_fatal() => Err(err),
                Ok(err) => {
                    writeln!(io.err, "{SHELL_NAME}: {err}")?;
                    Ok(CommandResult::Continue)
                }
                Err(e) => {
                    writeln!(io.err, "{SHELL_NAME}: {e:#}")?;
                    Ok(CommandResult::Continue)
                }
            },
        }
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn name(&self) -> Option<&'static str> {
        Some(T::name())
    }

    fn try_create(
        &self,
        _env: &Environment,
        tokens: &TokenList<'_>,
    ) -> Option<Box<dyn ExecutableCommand>> {
        if tokens.first()? != T::name() {
            return None;
        }
        Some(Box::new(T::from_args(tokens.args())))
    }
}

/// Factories for every builtin, in lookup order.
pub(crate) fn registry() -> Vec<Box<dyn CommandFactory>> {
    vec![
        Box::new(Factory::<Cd>::default()),
        Box::new(Factory::<Pwd>::default()),
        Box::new(Factory::<Help>::default()),
        Box::new(Factory::<Exit>::default()),
    ]
}

/// Names of the builtins, in lookup order.
pub fn builtin_names() -> Vec<&'static str> {
    registry().iter().filter_map(|factory| factory.name()).collect()
}

/// Change the current working directory of the shell.
pub struct Cd {
    /// Directory to switch to; absolute or relative to the current directory. Words after
    /// the first are ignored.
    pub target: Option<OsString>,
}

impl BuiltinCommand for Cd {
    fn name() -> &'static str {
        "cd"
    }

    fn from_args(args: &[&OsStr]) -> Self {
        Self {
            target: args.first().map(|target| target.to_os_string()),
        }
    }

    fn execute(self, _io: &mut Streams<'_>, _env: &mut Environment) -> Result<CommandResult> {
        let Some(target) = self.target else {
            bail!("expected argument to \"cd\"");
        };

        let shown = target.to_string_lossy();
        env::set_current_dir(&target).with_context(|| format!("cd: {shown}"))?;
        log::debug!("changed directory to {shown}");
        Ok(CommandResult::Continue)
    }
}

/// Print the current working directory to standard output.
pub struct Pwd;

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn from_args(_args: &[&OsStr]) -> Self {
        Self
    }

    fn execute(self, io: &mut Streams<'_>, _env: &mut Environment) -> Result<CommandResult> {
        let cwd = env::current_dir().map_err(ShellError::CurrentDir)?;
        writeln!(io.out, "{}", cwd.display())?;
        Ok(CommandResult::Continue)
    }
}

/// Show which commands are built into the shell.
pub struct Help;

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn from_args(_args: &[&OsStr]) -> Self {
        Self
    }

    fn execute(self, io: &mut Streams<'_>, _env: &mut Environment) -> Result<CommandResult> {
        writeln!(io.out, "{SHELL_NAME}")?;
        writeln!(io.out, "Type program names and arguments, and hit enter.")?;
        writeln!(io.out, "The following are built in:")?;
        for name in builtin_names() {
            writeln!(io.out, "  {name}")?;
        }
        writeln!(io.out, "Use the man command for information on other programs.")?;
        Ok(CommandResult::Continue)
    }
}

/// Exit the shell.
pub struct Exit;

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn from_args(_args: &[&OsStr]) -> Self {
        Self
    }

    fn execute(self, _io: &mut Streams<'_>, _env: &mut Environment) -> Result<CommandResult> {
        Ok(CommandResult::Terminate)
    }
}
