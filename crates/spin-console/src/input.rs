//! Prompt-and-retry console input

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::str::FromStr;

use spin_core::{SlotError, SlotResult, StakeSource};

/// Reads typed values from a line-oriented stream, re-prompting until a
/// line parses. Doubles as the session's stake source.
pub struct ConsoleInput<R, W> {
    input: R,
    output: W,
}

impl ConsoleInput<BufReader<Stdin>, Stdout> {
    /// Interactive input over stdin/stdout
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt until a line parses as `T`. Fails with `InputClosed` once the
    /// stream runs out of lines.
    pub fn read_value<T: FromStr>(&mut self, prompt: &str) -> SlotResult<T> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(SlotError::InputClosed);
            }
            match line.trim().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "Invalid input, please try again.")?,
            }
        }
    }
}

impl<R: BufRead, W: Write> StakeSource for ConsoleInput<R, W> {
    fn request_stake(&mut self) -> SlotResult<f64> {
        self.read_value("Please enter a stake amount: ")
    }
}
