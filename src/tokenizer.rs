//! Splitting a raw line into whitespace-delimited tokens.
//!
//! There is no quoting, escaping or expansion: a token is any maximal run of
//! non-delimiter bytes. Tokens borrow from the line they were cut from, so a
//! [`TokenList`] can never outlive its [`RawLine`].

use crate::buffer::grow;
use crate::error::Result;
use crate::reader::RawLine;
use std::ffi::OsStr;

/// Initial capacity of the token list, and the step it grows by.
pub const TOKEN_BUFSIZE: usize = 64;

/// Bytes that separate tokens: space, tab, carriage return, newline and bell.
pub const DELIMITERS: [u8; 5] = *b" \t\r\n\x07";

pub fn is_delimiter(byte: u8) -> bool {
    DELIMITERS.contains(&byte)
}

/// Ordered, non-empty tokens of one command line. Element 0 is the command name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenList<'a> {
    tokens: Vec<&'a OsStr>,
}

impl<'a> TokenList<'a> {
    /// The command name, or `None` for an empty command.
    pub fn first(&self) -> Option<&'a OsStr> {
        self.tokens.first().copied()
    }

    pub fn get(&self, index: usize) -> Option<&'a OsStr> {
        self.tokens.get(index).copied()
    }

    /// Everything after the command name.
    pub fn args(&self) -> &[&'a OsStr] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[&'a OsStr] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a OsStr> + '_ {
        self.tokens.iter().copied()
    }
}

/// Tokenize a line read by the line reader.
pub fn tokenize(line: &RawLine) -> Result<TokenList<'_>> {
    split_bytes(line.as_bytes())
}

/// Split `line` on runs of [`DELIMITERS`], skipping empty pieces.
pub fn split_line(line: &str) -> Result<TokenList<'_>> {
    split_bytes(line.as_bytes())
}

fn split_bytes(line: &[u8]) -> Result<TokenList<'_>> {
    let mut tokens = Vec::new();
    grow(&mut tokens, TOKEN_BUFSIZE, "token list")?;

    for token in line.split(|&b| is_delimiter(b)).filter(|t| !t.is_empty()) {
        if tokens.len() >= tokens.capacity() {
            grow(&mut tokens, TOKEN_BUFSIZE, "token list")?;
        }
        tokens.push(os_str(token));
    }

    Ok(TokenList { tokens })
}

#[cfg(unix)]
fn os_str(bytes: &[u8]) -> &OsStr {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(bytes)
}

// Lines are valid UTF-8 here and only ever cut at ASCII delimiters.
#[cfg(not(unix))]
fn os_str(bytes: &[u8]) -> &OsStr {
    OsStr::new(std::str::from_utf8(bytes).unwrap_or_default())
}
