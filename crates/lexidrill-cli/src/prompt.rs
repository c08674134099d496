//! Line-based prompting with validation loops.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Asks questions on `output` and reads one line per answer from `input`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` without a trailing newline.
    pub fn say(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Write `text` followed by a newline.
    pub fn say_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Read one line, without the line terminator. Closed input is an error.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Print `question` and return the answer line.
    pub fn ask(&mut self, question: &str) -> Result<String> {
        self.say_line(question)?;
        self.read_line()
    }

    /// Ask until the answer parses as `T`, printing `retry` after bad input.
    ///
    /// An empty answer yields `default` when one is given.
    pub fn ask_parsed<T: FromStr>(
        &mut self,
        question: &str,
        retry: &str,
        default: Option<T>,
    ) -> Result<T> {
        self.say_line(question)?;
        let mut default = default;
        loop {
            let line = self.read_line()?;
            if line.trim().is_empty() {
                if let Some(value) = default.take() {
                    return Ok(value);
                }
            }
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say_line(retry)?,
            }
        }
    }

    /// Ask until `accept` returns a value for the trimmed answer.
    pub fn ask_until<T>(
        &mut self,
        question: &str,
        retry: &str,
        mut accept: impl FnMut(&str) -> Option<T>,
    ) -> Result<T> {
        self.say_line(question)?;
        loop {
            let line = self.read_line()?;
            if let Some(value) = accept(line.trim()) {
                return Ok(value);
            }
            self.say_line(retry)?;
        }
    }
}
