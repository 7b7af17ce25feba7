use anyhow::{Context, Result};
use argh::FromArgs;
use noosh::config::{self, ColorConfig};
use noosh::prompt::Prompt;
use noosh::reader::{EditorSource, LineReader, LineSource};
use noosh::{Interpreter, SHELL_NAME, Streams};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(FromArgs)]
/// A tiny interactive command interpreter.
struct Args {
    #[argh(option)]
    /// color configuration file; defaults to noosh_config.txt next to the executable.
    config: Option<PathBuf>,

    #[argh(switch)]
    /// show a bare "> " prompt instead of the colored user@host:cwd one.
    plain_prompt: bool,

    #[argh(switch)]
    /// read lines through an interactive editor with history.
    edit: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Args = argh::from_env();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{SHELL_NAME}: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let prompt = if args.plain_prompt {
        Prompt::plain()
    } else {
        let colors = match args.config.or_else(config::default_path) {
            Some(path) => ColorConfig::load(&path),
            None => ColorConfig::default(),
        };
        Prompt::from_system(colors)
    };

    let mut source: Box<dyn LineSource> = if args.edit {
        Box::new(EditorSource::new().context("cannot start the line editor")?)
    } else {
        Box::new(LineReader::new(io::stdin().lock(), io::stdout()))
    };

    let (mut out, mut err) = (io::stdout(), io::stderr());
    let mut streams = Streams::new(&mut out, &mut err);

    let mut interpreter = Interpreter::default();
    interpreter.repl(source.as_mut(), &prompt, &mut streams)?;
    log::debug!("last external status: {}", interpreter.last_status());
    Ok(())
}
