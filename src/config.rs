//! Color configuration for the prompt.
//!
//! The file is a list of `key=value` lines:
//!
//! ```text
//! # ANSI SGR color codes
//! username_color=32
//! cwd_color=35
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up next to the running executable.
pub const CONFIG_FILE_NAME: &str = "noosh_config.txt";

/// ANSI color codes used by the colored prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    /// Color of the `user@host` part.
    pub username_color: i32,
    /// Color of the working directory.
    pub cwd_color: i32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            username_color: 32,
            cwd_color: 35,
        }
    }
}

impl ColorConfig {
    /// Load the configuration from `path`, falling back to the defaults if it can't be read.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => {
                log::debug!("loading color config from {}", path.display());
                Self::parse(&contents)
            }
            Err(e) => {
                log::warn!("cannot read config {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse `key=value` lines on top of the defaults.
    pub fn parse(contents: &str) -> Self {
        let mut config = Self::default();

        for (lineno, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                log::warn!("config line {}: expected key=value, got {:?}", lineno + 1, line);
                continue;
            };

            let slot = match key.trim() {
                "username_color" => &mut config.username_color,
                "cwd_color" => &mut config.cwd_color,
                other => {
                    log::debug!("config line {}: ignoring unknown key {:?}", lineno + 1, other);
                    continue;
                }
            };
            match value.trim().parse::<i32>() {
                Ok(parsed) => *slot = parsed,
                Err(e) => log::warn!(
                    "config line {}: bad value {:?} for {}: {}",
                    lineno + 1,
                    value.trim(),
                    key.trim(),
                    e
                ),
            }
        }

        config
    }
}

/// `noosh_config.txt` in the directory holding the running executable.
pub fn default_path() -> Option<PathBuf> {
    match env::current_exe() {
        Ok(exe) => exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)),
        Err(e) => {
            log::warn!("cannot locate the executable: {e}");
            None
        }
    }
}
