//! # Commands
//!
//! One module per console verb. Each exposes a `run` function taking the
//! registry and the normalized [`Args`](crate::syntax::Args), and returns
//! a [`CmdResult`] holding the lines to print.
//!
//! Argument problems come back as `HbnbError::Command`, always before any
//! mutation happens, and always checked in the same order (see
//! [`helpers`]). Everything else (`Io`, `Serialization`) is a real fault.
//!
//! Nothing in here writes to stdout.

use crate::model::Record;

pub mod all;
pub mod count;
pub mod create;
pub mod destroy;
pub mod helpers;
pub mod show;
pub mod update;

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub output: Vec<String>,
}

impl CmdResult {
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.add_line(line);
        self
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }
}
