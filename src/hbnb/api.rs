//! # API Facade
//!
//! A thin layer between the console and the commands. It owns the
//! registry and dispatches each verb to its command module; it never
//! prints and never parses text.
//!
//! `HbnbApi<B: Backend>` is generic over the storage backend:
//! - Production: `HbnbApi<FileBackend>`
//! - Testing: `HbnbApi<InMemoryBackend>`

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::store::{Backend, Storage};
use crate::syntax::{Args, Invocation, Verb};

pub struct HbnbApi<B: Backend> {
    storage: Storage<B>,
}

impl<B: Backend> HbnbApi<B> {
    pub fn new(storage: Storage<B>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage<B> {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Storage<B> {
        &mut self.storage
    }

    pub fn execute(&mut self, invocation: &Invocation) -> Result<CmdResult> {
        let args = &invocation.args;
        match invocation.verb {
            Verb::Create => self.create(args),
            Verb::Show => self.show(args),
            Verb::All => self.all(args),
            Verb::Update => self.update(args),
            Verb::Destroy => self.destroy(args),
            Verb::Count => self.count(args),
        }
    }

    pub fn create(&mut self, args: &Args) -> Result<CmdResult> {
        commands::create::run(&mut self.storage, args)
    }

    pub fn show(&self, args: &Args) -> Result<CmdResult> {
        commands::show::run(&self.storage, args)
    }

    pub fn all(&self, args: &Args) -> Result<CmdResult> {
        commands::all::run(&self.storage, args)
    }

    pub fn update(&mut self, args: &Args) -> Result<CmdResult> {
        commands::update::run(&mut self.storage, args)
    }

    pub fn destroy(&mut self, args: &Args) -> Result<CmdResult> {
        commands::destroy::run(&mut self.storage, args)
    }

    pub fn count(&self, args: &Args) -> Result<CmdResult> {
        commands::count::run(&self.storage, args)
    }
}
