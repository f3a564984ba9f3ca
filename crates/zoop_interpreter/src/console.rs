//! Where printed lines go and where input lines come from

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// The output and input sinks of a running program
pub trait Console {
    /// Writes one printed value as a line
    fn print_line(&mut self, line: &str) -> io::Result<()>;

    /// Shows `prompt` and reads one line without its line terminator. `None` when the input has
    /// been closed.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Stdout and stdin
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{line}")
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{prompt}")?;
            stdout.flush()?;
        }
        let mut buffer = String::new();
        if io::stdin().lock().read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(buffer)))
    }
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Keeps printed lines in memory and answers prompts from a queue
#[derive(Debug, Default)]
pub struct BufferedConsole {
    output: Vec<String>,
    input: VecDeque<String>,
    prompts: Vec<String>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// A console that answers prompts with `lines`, in order
    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Every line printed so far
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Every prompt shown so far
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }
}

impl Console for BufferedConsole {
    fn print_line(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.input.pop_front())
    }
}
