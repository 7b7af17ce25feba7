use crate::SHELL_NAME;
use crate::command::{CommandFactory, CommandResult, ExecutableCommand, ExitCode, Streams};
use crate::env::Environment;
use crate::error::Result;
use crate::interpreter::Factory;
use crate::tokenizer::TokenList;
use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// Recorded when no executable matches the command name.
pub const NOT_FOUND_STATUS: ExitCode = 127;
/// Recorded when the program was found but could not be started.
pub const CANNOT_EXECUTE_STATUS: ExitCode = 126;

/// Command that is not a builtin.
pub struct ExternalCommand {
    name: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(name: OsString, args: Vec<OsString>) -> Self {
        Self { name, args }
    }

    /// Resolve, spawn and wait for the program, returning its exit code.
    ///
    /// Failures to find or start the program are written to `err`; they are the user's
    /// problem, not the shell's.
    fn launch(&self, search_paths: &OsStr, err: &mut dyn Write) -> io::Result<ExitCode> {
        let display_name = self.name.to_string_lossy();
        let Some(program) = find_command_path(search_paths, Path::new(&self.name)) else {
            writeln!(err, "{SHELL_NAME}: {display_name}: command not found")?;
            return Ok(NOT_FOUND_STATUS);
        };

        let mut command = Command::new(&*program);
        command.args(&self.args);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.arg0(&self.name);
        }

        log::debug!("spawning {} as {:?}", program.display(), command);
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                writeln!(err, "{SHELL_NAME}: {display_name}: {e}")?;
                return Ok(CANNOT_EXECUTE_STATUS);
            }
        };

        // `wait` only returns once the child has exited or was killed; stops and
        // continues are not reported.
        match child.wait() {
            Ok(status) => {
                let code = status_code(status);
                log::debug!("{} (pid {}) finished with {}", display_name, child.id(), code);
                Ok(code)
            }
            Err(e) => {
                writeln!(err, "{SHELL_NAME}: {e}")?;
                Ok(1)
            }
        }
    }
}

impl CommandFactory for Factory<ExternalCommand> {
    fn name(&self) -> Option<&'static str> {
        None
    }

    /// Accepts any command; resolution happens at launch so a miss can be reported.
    fn try_create(
        &self,
        _env: &Environment,
        tokens: &TokenList<'_>,
    ) -> Option<Box<dyn ExecutableCommand>> {
        let name = tokens.first()?;
        Some(Box::new(ExternalCommand::new(
            name.to_os_string(),
            tokens.args().iter().map(|arg| arg.to_os_string()).collect(),
        )))
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        io: &mut Streams<'_>,
        env: &mut Environment,
    ) -> Result<CommandResult> {
        env.last_status = self.launch(&env.search_path, io.err)?;
        Ok(CommandResult::Continue)
    }
}

fn status_code(exit_status: ExitStatus) -> ExitCode {
    match exit_status.code() {
        Some(x) => x,
        None => terminated_by_signal(exit_status),
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Resolve a command path the way a typical shell would.
///
/// Behavior:
/// - Absolute path: returns it if it is an executable file.
/// - `./foo` on Unix or any relative path on other platforms: returns it if it is an
///   executable file.
/// - Relative with multiple components (e.g., `bin/sh`): same, relative to the current
///   directory.
/// - Single path component (no separators): search each directory in `search_paths`
///   (PATH syntax) and return the first executable match.
/// - Empty path: returns `None`.
///
/// Returns either a borrowed reference to the provided `path` or an owned `PathBuf`
/// when the result is discovered via PATH lookup.
pub fn find_command_path<'a>(search_paths: &OsStr, path: &'a Path) -> Option<Cow<'a, Path>> {
    if path.is_absolute() {
        return find_by_path(path).map(Cow::Borrowed);
    }

    let search_in_current_dir = cfg!(not(unix)) || path.starts_with("./");
    if search_in_current_dir && is_executable(path) {
        return Some(Cow::Borrowed(path));
    }

    let mut components = path.components();
    let first = components.next();
    let second = components.next();
    match (first, second) {
        (None, None) => None,
        (Some(x), None) => find_in_path(search_paths, x.as_os_str()).map(Cow::Owned),
        _ => find_by_path(path).map(Cow::Borrowed),
    }
}

fn find_in_path(search_paths: &OsStr, cmd: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(search_paths)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(cmd))
        .find(|candidate| is_executable(candidate))
}

fn find_by_path(path: &Path) -> Option<&Path> {
    if is_executable(path) { Some(path) } else { None }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
