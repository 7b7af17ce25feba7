use crate::SHELL_NAME;
use crate::command::{CommandFactory, CommandResult, ExitCode, Streams};
use crate::env::Environment;
use crate::error::Result;
use crate::prompt::Prompt;
use crate::reader::{LineSource, RawLine, ReadOutcome};
use crate::tokenizer::{self, TokenList};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only support commands defined in this crate — builtins and ExternalCommand.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// The interpreter keeps an [`Environment`] and an ordered list of [`CommandFactory`]
/// objects. A command goes to the first factory that recognizes it, so anything earlier
/// in the list shadows what comes later. See [`Default`] for the factories included out
/// of the box.
///
/// Example
/// ```
/// use noosh::{CommandResult, Interpreter, Streams};
///
/// let mut sh = Interpreter::default();
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// let mut io = Streams::new(&mut out, &mut err);
/// assert_eq!(sh.execute_line("help", &mut io).unwrap(), CommandResult::Continue);
/// assert_eq!(sh.execute_line("exit", &mut io).unwrap(), CommandResult::Terminate);
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            env: Environment::new(),
            commands,
        }
    }

    /// Replace the environment captured from the process.
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Exit code of the last external command.
    pub fn last_status(&self) -> ExitCode {
        self.env.last_status
    }

    /// Number of registered builtins.
    pub fn builtin_count(&self) -> usize {
        self.commands.iter().filter(|f| f.name().is_some()).count()
    }

    /// Run one tokenized command.
    ///
    /// An empty command does nothing. Otherwise the factories are asked in order and the
    /// first one to recognize the command runs it.
    pub fn dispatch(
        &mut self,
        tokens: &TokenList<'_>,
        io: &mut Streams<'_>,
    ) -> Result<CommandResult> {
        let Some(name) = tokens.first() else {
            return Ok(CommandResult::Continue);
        };

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(&self.env, tokens) {
                log::debug!(
                    "dispatching {:?} to {}",
                    tokens.as_slice(),
                    factory.name().unwrap_or("external launcher")
                );
                return cmd.execute(io, &mut self.env);
            }
        }

        writeln!(
            io.err,
            "{SHELL_NAME}: {}: command not found",
            name.to_string_lossy()
        )?;
        Ok(CommandResult::Continue)
    }

    /// Tokenize and run one line.
    pub fn run_line(&mut self, line: &RawLine, io: &mut Streams<'_>) -> Result<CommandResult> {
        let tokens = tokenizer::tokenize(line)?;
        self.dispatch(&tokens, io)
    }

    /// Convenience wrapper around [`Interpreter::run_line`] for a plain string.
    pub fn execute_line(&mut self, line: &str, io: &mut Streams<'_>) -> Result<CommandResult> {
        self.run_line(&RawLine::from(line), io)
    }

    /// Read-eval loop: prompt, read, split, dispatch, until `exit` or end of input.
    ///
    /// Recoverable errors are reported on `io.err` and the loop goes on; fatal ones are
    /// returned.
    pub fn repl(
        &mut self,
        source: &mut dyn LineSource,
        prompt: &Prompt,
        io: &mut Streams<'_>,
    ) -> Result<()> {
        loop {
            let ReadOutcome { line, at_eof } = source.read_line(&prompt.render())?;

            let signal = match self.run_line(&line, io) {
                Ok(signal) => signal,
                Err(e) if !e.is_fatal() => {
                    writeln!(io.err, "{SHELL_NAME}: {e}")?;
                    CommandResult::Continue
                }
                Err(e) => return Err(e),
            };

            if signal == CommandResult::Terminate {
                log::debug!("exit requested");
                return Ok(());
            }
            if at_eof {
                log::debug!("end of input");
                return Ok(());
            }
        }
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the default set of commands:
    /// - built-ins: `cd`, `pwd`, `help`, `exit`
    /// - external command launcher, tried last
    fn default() -> Self {
        use crate::external::ExternalCommand;
        let mut commands = crate::builtin::registry();
        commands.push(Box::new(Factory::<ExternalCommand>::default()));
        Self::new(commands)
    }
}
