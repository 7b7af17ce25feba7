use crate::config::ColorConfig;
use std::env;
use std::path::Path;

/// How the prompt is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStyle {
    /// `user@host:cwd$ ` with ANSI colors.
    Colored {
        colors: ColorConfig,
        user: String,
        host: String,
    },
    /// A bare `> `.
    Plain,
}

/// Renders the text shown before each line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    style: PromptStyle,
}

impl Prompt {
    pub fn colored(colors: ColorConfig, user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            style: PromptStyle::Colored {
                colors,
                user: user.into(),
                host: host.into(),
            },
        }
    }

    /// Colored prompt for the user and host this process runs as.
    ///
    /// Both are looked up once; only the working directory is refreshed per render.
    pub fn from_system(colors: ColorConfig) -> Self {
        Self::colored(colors, current_user(), current_host())
    }

    pub fn plain() -> Self {
        Self {
            style: PromptStyle::Plain,
        }
    }

    pub fn style(&self) -> &PromptStyle {
        &self.style
    }

    pub fn render(&self) -> String {
        match env::current_dir() {
            Ok(cwd) => self.render_with_cwd(&cwd),
            Err(e) => {
                log::warn!("cannot determine the current directory for the prompt: {e}");
                self.render_with_cwd(Path::new("?"))
            }
        }
    }

    pub fn render_with_cwd(&self, cwd: &Path) -> String {
        match &self.style {
            PromptStyle::Plain => "> ".to_owned(),
            PromptStyle::Colored { colors, user, host } => format!(
                "\x1b[0;{u}m{user}@\x1b[0;{u}m{host}\x1b[0m:\x1b[0;{c}m{cwd}\x1b[0m$ ",
                u = colors.username_color,
                c = colors.cwd_color,
                cwd = cwd.display(),
            ),
        }
    }
}

fn current_user() -> String {
    env::var("USER")
        .or_else(|_| env::var("LOGNAME"))
        .unwrap_or_else(|_| "unknown".to_owned())
}

fn current_host() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            log::warn!("cannot look up the hostname: {e}");
            "localhost".to_owned()
        }
    }
}
