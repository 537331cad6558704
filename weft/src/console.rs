//! Line-oriented console used by the drivers and the drafter node.
//!
//! `StdConsole` reads tokio stdin and writes stdout; `ScriptedConsole` replays
//! fixed input lines and captures everything printed, for tests.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::AgentError;

/// Word that ends every interactive loop.
pub const EXIT_COMMAND: &str = "exit";

/// True when `line` is the exit sentinel: `exit` in any case, surrounding whitespace ignored.
pub fn is_exit_command(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

/// Where user input comes from and where output goes.
#[async_trait]
pub trait Console: Send + Sync {
    /// Shows `prompt` and reads one line without its line terminator. `None` on end of input.
    async fn read_line(&self, prompt: &str) -> Result<Option<String>, AgentError>;

    /// Prints `text` followed by a newline.
    fn print(&self, text: &str);
}

/// Console over the process stdin / stdout.
pub struct StdConsole {
    lines: tokio::sync::Mutex<Lines<BufReader<Stdin>>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: tokio::sync::Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn read_line(&self, prompt: &str) -> Result<Option<String>, AgentError> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;
        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }

    fn print(&self, text: &str) {
        println!("{}", text);
    }
}

/// Console fed from a fixed list of lines; records prompts and printed text.
#[derive(Default)]
pub struct ScriptedConsole {
    input: Mutex<VecDeque<String>>,
    output: Mutex<String>,
}

impl ScriptedConsole {
    pub fn new<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            input: Mutex::new(lines.into_iter().map(Into::into).collect()),
            output: Mutex::new(String::new()),
        }
    }

    /// Everything shown so far: prompts verbatim, printed text with a trailing newline.
    pub fn output(&self) -> String {
        match self.output.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        match self.input.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    fn append(&self, text: &str) {
        match self.output.lock() {
            Ok(mut guard) => guard.push_str(text),
            Err(poisoned) => poisoned.into_inner().push_str(text),
        }
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&self, prompt: &str) -> Result<Option<String>, AgentError> {
        self.append(prompt);
        let line = match self.input.lock() {
            Ok(mut guard) => guard.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        Ok(line)
    }

    fn print(&self, text: &str) {
        self.append(text);
        self.append("\n");
    }
}
