use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::Result;

/// Line-oriented text interface the game talks to the players through.
pub trait Console {
    /// Shows `prompt` and reads one line without its line ending.
    /// `None` once the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    fn say(&mut self, message: &str) -> Result<()>;
}

#[derive(Debug)]
pub struct IoConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> IoConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

pub fn stdio() -> IoConsole<StdinLock<'static>, Stdout> {
    IoConsole::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Console for IoConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }
}
