//! Console prompt adapter for the pairing procedure.

use std::io::{BufRead, Write};

use crate::app::ports::PromptPort;
use crate::error::{Error, Result};

/// Prints a message and blocks until a line is read from `input`.
pub struct ConsolePrompt<I, O> {
    input: I,
    output: O,
}

impl ConsolePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<I: BufRead, O: Write> ConsolePrompt<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

impl<I: BufRead, O: Write> PromptPort for ConsolePrompt<I, O> {
    fn wait_for_operator(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        write!(self.output, "Press Enter to continue...")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::ConsoleClosed);
        }
        Ok(())
    }
}
