//! # Console
//!
//! The read-eval-print loop, and the only module that writes output.
//!
//! Every command produces its lines or exactly one fixed error line;
//! argument errors never end the loop. Only real faults (a failed write to
//! `hbnb.json`, a broken output stream) propagate out of [`Console::run`].

use crate::api::HbnbApi;
use crate::error::{CommandError, HbnbError, Result};
use crate::store::Backend;
use crate::syntax::{parse_line, Line, Verb};
use std::io::{BufRead, Write};
use tracing::debug;

pub const DEFAULT_PROMPT: &str = "(hbnb) ";

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

const EXTRA_TOPICS: [(&str, &str); 3] = [
    ("EOF", "Exit the console on end of input"),
    ("help", "List commands, or describe one: help [command]"),
    ("quit", "Exit the console"),
];

pub struct Console<B: Backend, W: Write> {
    api: HbnbApi<B>,
    out: W,
    prompt: String,
}

impl<B: Backend, W: Write> Console<B, W> {
    pub fn new(api: HbnbApi<B>, out: W) -> Self {
        Self {
            api,
            out,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn api(&self) -> &HbnbApi<B> {
        &self.api
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Reads lines until `quit` or end of input. The prompt is only shown
    /// when `interactive` is set.
    ///
    /// Bytes that are not UTF-8 are replaced with U+FFFD, so such a line is
    /// reported like any other bad input and the loop goes on.
    pub fn run<R: BufRead>(&mut self, mut input: R, interactive: bool) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            if interactive {
                write!(self.out, "{}", self.prompt)?;
                self.out.flush()?;
            }
            buf.clear();
            let control = match input.read_until(b'\n', &mut buf)? {
                0 => self.onecmd("EOF")?,
                _ => {
                    let line = String::from_utf8_lossy(&buf);
                    self.onecmd(line.trim_end_matches(['\r', '\n']))?
                }
            };
            if control == Control::Exit {
                return Ok(());
            }
        }
    }

    /// Interprets a single line.
    pub fn onecmd(&mut self, line: &str) -> Result<Control> {
        match parse_line(line) {
            Line::Empty => {}
            Line::Quit => return Ok(Control::Exit),
            Line::Eof => {
                writeln!(self.out)?;
                return Ok(Control::Exit);
            }
            Line::Help(topic) => self.help(topic.as_deref())?,
            Line::InvalidMethod => writeln!(self.out, "{}", CommandError::InvalidMethod)?,
            Line::Unknown(text) => writeln!(self.out, "*** Unknown syntax: {}", text)?,
            Line::Invoke(invocation) => match self.api.execute(&invocation) {
                Ok(result) => {
                    debug!(
                        verb = %invocation.verb,
                        records = result.affected_records.len(),
                        "command done"
                    );
                    for line in &result.output {
                        writeln!(self.out, "{}", line)?;
                    }
                }
                Err(HbnbError::Command(e)) => writeln!(self.out, "{}", e)?,
                Err(e) => return Err(e),
            },
        }
        self.out.flush()?;
        Ok(Control::Continue)
    }

    fn help(&mut self, topic: Option<&str>) -> Result<()> {
        let Some(topic) = topic else {
            let mut names: Vec<&str> = Verb::ALL.iter().map(|verb| verb.name()).collect();
            names.extend(EXTRA_TOPICS.iter().map(|(name, _)| *name));
            names.sort_unstable();

            let header = "Documented commands (type help <topic>):";
            writeln!(self.out)?;
            writeln!(self.out, "{}", header)?;
            writeln!(self.out, "{}", "=".repeat(header.len()))?;
            writeln!(self.out, "{}", names.join("  "))?;
            writeln!(self.out)?;
            return Ok(());
        };

        let usage = topic
            .parse::<Verb>()
            .map(|verb| verb.usage())
            .ok()
            .or_else(|| {
                EXTRA_TOPICS
                    .iter()
                    .find(|(name, _)| *name == topic)
                    .map(|(_, usage)| *usage)
            });
        match usage {
            Some(usage) => writeln!(self.out, "{}", usage)?,
            None => writeln!(self.out, "*** No help on {}", topic)?,
        }
        Ok(())
    }
}
