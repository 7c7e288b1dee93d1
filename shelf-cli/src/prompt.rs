//! Line-oriented prompts over any `BufRead` / `Write` pair.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use thiserror::Error;

/// Why a prompt produced no value.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The line could not be parsed as the requested number.
    #[error("Invalid number: '{input}'")]
    InvalidNumber { input: String },

    /// Input ended before a line was read.
    #[error("input closed")]
    Closed,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Writes a label, flushes, and reads one answer line.
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Read one line with the trailing newline removed.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn line(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Err(PromptError::Closed);
        }
        let mut buf = String::from_utf8_lossy(&bytes).into_owned();
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(buf)
    }

    /// Read one line and parse it, ignoring surrounding whitespace.
    pub fn number<T: FromStr>(&mut self, label: &str) -> Result<T, PromptError> {
        let raw = self.line(label)?;
        raw.trim()
            .parse()
            .map_err(|_| PromptError::InvalidNumber { input: raw })
    }
}
