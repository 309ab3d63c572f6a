use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::ProductError;

/// Line-oriented console: prompts on `output`, answers read from `input`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes one full line.
    pub fn say(&mut self, line: impl Display) -> Result<(), ProductError> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Reads one line without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> Result<Option<String>, ProductError> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Shows `label` and returns the answer as typed.
    pub fn prompt(&mut self, label: &str) -> Result<String, ProductError> {
        write!(self.output, "{}", label)?;
        self.read_line()?.ok_or(ProductError::InputClosed)
    }

    /// Shows `label` and parses the answer, failing with `InvalidInput` on bad text.
    pub fn prompt_parsed<T: FromStr>(
        &mut self,
        label: &str,
        field: &'static str,
    ) -> Result<T, ProductError> {
        let answer = self.prompt(label)?;
        parse_field(&answer, field)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parses a numeric answer, ignoring surrounding whitespace.
pub fn parse_field<T: FromStr>(value: &str, field: &'static str) -> Result<T, ProductError> {
    value.trim().parse().map_err(|_| ProductError::InvalidInput {
        field,
        value: value.to_string(),
    })
}
