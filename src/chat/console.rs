//! Console capability - the only way the chat layer talks to the user
//!
//! The engine never touches stdin/stdout directly, so sessions can be
//! driven by a script in tests or by the real terminal in `chat`.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Line-oriented user I/O
#[cfg_attr(test, mockall::automock)]
pub trait Console {
    /// Show `prompt` (no newline) and block for one line of input.
    ///
    /// The line terminator is stripped. End of input is reported as
    /// `io::ErrorKind::UnexpectedEof`.
    fn prompt_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Write one full line of output
    fn emit_line(&mut self, text: &str) -> io::Result<()>;
}

/// Console bound to the process stdin/stdout
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn prompt_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut out = self.stdout.lock();
        write!(out, "{}", prompt)?;
        out.flush()?;
        drop(out);

        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(strip_line_ending(line))
    }

    fn emit_line(&mut self, text: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        writeln!(out, "{}", text)?;
        out.flush()
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

/// Console that replays canned input and records everything shown
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Prompts shown so far, in order
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Lines emitted so far, in order
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Input lines not yet consumed
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn prompt_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn emit_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("hi\n".to_string()), "hi");
        assert_eq!(strip_line_ending("hi\r\n".to_string()), "hi");
        assert_eq!(strip_line_ending("hi".to_string()), "hi");
        assert_eq!(strip_line_ending("  \n".to_string()), "  ");
    }

    #[test]
    fn test_scripted_console_replays_and_records() {
        let mut console = ScriptedConsole::new(["first", ""]);
        assert_eq!(console.prompt_line("You: ").unwrap(), "first");
        console.emit_line("reply").unwrap();
        assert_eq!(console.prompt_line("Again: ").unwrap(), "");
        assert_eq!(console.remaining(), 0);

        let err = console.prompt_line("You: ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        assert_eq!(console.prompts(), &["You: ", "Again: ", "You: "]);
        assert_eq!(console.output(), &["reply"]);
    }
}
