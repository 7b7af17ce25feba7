//! Acquiring one line of input at a time.
//!
//! [`LineReader`] is the plain reader used by default: it pulls bytes from any [`Read`]
//! until a newline or end-of-input, growing its buffer in fixed steps. [`EditorSource`]
//! reads through `rustyline` instead, for interactive sessions that want line editing
//! and history.

use crate::buffer::grow;
use crate::error::{Result, ShellError};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::borrow::Cow;
use std::io::{ErrorKind, Read, Write};

/// Initial capacity of the line buffer, and the step it grows by.
pub const LINE_BUFSIZE: usize = 1024;

/// One line of user input without its terminator.
///
/// The bytes are kept exactly as read, so tokens can reach a child process untouched even
/// when they are not valid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLine {
    bytes: Vec<u8>,
}

impl RawLine {
    /// Build a line from raw bytes.
    ///
    /// Off unix, where arguments must be Unicode, invalid UTF-8 is replaced with U+FFFD.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        #[cfg(not(unix))]
        let bytes = match String::from_utf8(bytes) {
            Ok(text) => text.into_bytes(),
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned().into_bytes(),
        };
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The line for display, with invalid UTF-8 replaced.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<String> for RawLine {
    fn from(text: String) -> Self {
        Self {
            bytes: text.into_bytes(),
        }
    }
}

impl From<&str> for RawLine {
    fn from(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }
}

/// What a [`LineSource`] produced for one prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    pub line: RawLine,
    /// The input ended while this line was being read; no further lines will follow.
    pub at_eof: bool,
}

/// Anything the command loop can pull lines from.
pub trait LineSource {
    /// Show `prompt` and read the next line.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Reads lines byte by byte from an input stream and writes prompts to an output stream.
pub struct LineReader<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> LineReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read until a newline or end-of-input and return everything before the terminator.
    ///
    /// The buffer starts at [`LINE_BUFSIZE`] bytes and grows by the same amount each time
    /// it fills up.
    pub fn read_raw(&mut self) -> Result<ReadOutcome> {
        let mut buffer = Vec::new();
        grow(&mut buffer, LINE_BUFSIZE, "line buffer")?;

        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => {
                    return Ok(ReadOutcome {
                        line: RawLine::from_bytes(buffer),
                        at_eof: true,
                    });
                }
                Ok(_) => {
                    if byte[0] == b'\n' {
                        return Ok(ReadOutcome {
                            line: RawLine::from_bytes(buffer),
                            at_eof: false,
                        });
                    }
                    if buffer.len() >= buffer.capacity() {
                        grow(&mut buffer, LINE_BUFSIZE, "line buffer")?;
                    }
                    buffer.push(byte[0]);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ShellError::Read(e)),
            }
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: Read, W: Write> LineSource for LineReader<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;
        self.read_raw()
    }
}

/// Interactive line source backed by `rustyline`, with in-memory history.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(ReadOutcome {
                    line: RawLine::from(line),
                    at_eof: false,
                })
            }
            // Ctrl-C at the prompt discards the line.
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome {
                line: RawLine::default(),
                at_eof: false,
            }),
            Err(ReadlineError::Eof) => Ok(ReadOutcome {
                line: RawLine::default(),
                at_eof: true,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(input: &[u8]) -> LineReader<Cursor<Vec<u8>>, Vec<u8>> {
        LineReader::new(Cursor::new(input.to_vec()), Vec::<u8>::new())
    }

    #[test]
    fn test_reads_line_without_terminator() {
        let mut r = reader(b"ls -la\npwd\n");

        let first = r.read_raw().unwrap();
        assert_eq!(first.line.as_bytes(), b"ls -la");
        assert!(!first.at_eof);

        let second = r.read_raw().unwrap();
        assert_eq!(second.line.as_bytes(), b"pwd");
        assert!(!second.at_eof);
    }

    #[test]
    fn test_empty_input_yields_empty_line_at_eof() {
        let outcome = reader(b"").read_raw().unwrap();
        assert!(outcome.line.is_empty());
        assert!(outcome.at_eof);
    }

    #[test]
    fn test_last_line_without_newline_is_kept() {
        let mut r = reader(b"echo hi\nexit");
        r.read_raw().unwrap();
        let last = r.read_raw().unwrap();
        assert_eq!(last.line.as_bytes(), b"exit");
        assert!(last.at_eof);
    }

    #[test]
    fn test_line_exactly_at_capacity_boundary() {
        let text = "x".repeat(LINE_BUFSIZE);
        let outcome = reader(text.as_bytes()).read_raw().unwrap();
        assert_eq!(outcome.line.len(), LINE_BUFSIZE);
        assert_eq!(outcome.line.as_bytes(), text.as_bytes());
    }

    #[test]
    fn test_long_line_survives_several_growth_steps() {
        let text: String = (0..LINE_BUFSIZE * 3 + 17)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let mut input = text.clone().into_bytes();
        input.push(b'\n');

        let outcome = reader(&input).read_raw().unwrap();
        assert_eq!(outcome.line.as_bytes(), text.as_bytes());
        assert!(!outcome.at_eof);
    }

    #[test]
    fn test_carriage_return_is_kept_for_the_tokenizer() {
        let outcome = reader(b"pwd\r\n").read_raw().unwrap();
        assert_eq!(outcome.line.as_bytes(), b"pwd\r");
    }

    #[test]
    #[cfg(unix)]
    fn test_invalid_utf8_is_kept_verbatim() {
        let outcome = reader(b"ab\xffcd\n").read_raw().unwrap();
        assert_eq!(outcome.line.as_bytes(), b"ab\xffcd");
        assert_eq!(outcome.line.to_string_lossy(), "ab\u{fffd}cd");
    }

    #[test]
    fn test_prompt_is_written_before_reading() {
        let mut r = reader(b"help\n");
        let outcome = r.read_line("> ").unwrap();
        assert_eq!(outcome.line.as_bytes(), b"help");

        let (_, output) = r.into_inner();
        assert_eq!(output, b"> ");
    }

    struct FailingInput;

    impl Read for FailingInput {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device gone"))
        }
    }

    #[test]
    fn test_read_failure_is_fatal() {
        let err = LineReader::new(FailingInput, Vec::<u8>::new())
            .read_raw()
            .unwrap_err();
        assert!(matches!(err, ShellError::Read(_)));
        assert!(err.is_fatal());
    }
}
