//! Output and input seams.
//!
//! The evaluator never touches stdout/stdin directly; it goes through these
//! enum-dispatch handlers so a REPL writes to the terminal, tests capture
//! into buffers, and scripted runs pre-seed input lines.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::errors::{input_failed, EvalResult};

/// Where `print` output goes.
#[derive(Debug)]
pub enum PrintHandler {
    /// Write to stdout (the default).
    Stdout,
    /// Capture into a buffer, one line per `print`.
    Buffer(String),
    /// Discard all output.
    Silent,
}

impl PrintHandler {
    /// An empty capturing handler.
    pub fn buffer() -> Self {
        PrintHandler::Buffer(String::new())
    }

    /// Print one line.
    pub fn println(&mut self, msg: &str) {
        match self {
            PrintHandler::Stdout => println!("{msg}"),
            PrintHandler::Buffer(buffer) => {
                buffer.push_str(msg);
                buffer.push('\n');
            }
            PrintHandler::Silent => {}
        }
    }

    /// Captured output; empty for non-capturing handlers.
    pub fn output(&self) -> &str {
        match self {
            PrintHandler::Buffer(buffer) => buffer,
            PrintHandler::Stdout | PrintHandler::Silent => "",
        }
    }

    /// Drop captured output.
    pub fn clear(&mut self) {
        if let PrintHandler::Buffer(buffer) = self {
            buffer.clear();
        }
    }
}

impl Default for PrintHandler {
    fn default() -> Self {
        PrintHandler::Stdout
    }
}

/// Where `input()` lines come from.
#[derive(Debug)]
pub enum InputSource {
    /// Block on one line from stdin.
    Stdin,
    /// Pop pre-seeded lines; exhausted queues yield empty strings, the same
    /// way an EOF'd stdin does.
    Queue(VecDeque<String>),
}

impl InputSource {
    /// A queue of pre-seeded input lines.
    pub fn queue(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        InputSource::Queue(lines.into_iter().map(Into::into).collect())
    }

    /// Read one line, without its trailing newline.
    pub fn read_line(&mut self) -> EvalResult<String> {
        match self {
            InputSource::Stdin => {
                let mut line = String::new();
                std::io::stdin()
                    .lock()
                    .read_line(&mut line)
                    .map_err(|e| input_failed(&e))?;
                while line.ends_with('\n') || line.ends_with('\r') {
                    line.pop();
                }
                Ok(line)
            }
            InputSource::Queue(lines) => Ok(lines.pop_front().unwrap_or_default()),
        }
    }
}

impl Default for InputSource {
    fn default() -> Self {
        InputSource::Stdin
    }
}
