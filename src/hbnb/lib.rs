//! # HBnB Console Architecture
//!
//! hbnb is an interactive console over a small object registry: users,
//! places, cities, states, amenities, reviews and plain base records, all
//! kept in memory and saved to one JSON file.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Console (console.rs, wired by main.rs)                     │
//! │  - Reads lines, prints results and fixed error messages     │
//! │  - The ONLY place that knows about stdin/stdout             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Syntax (syntax.rs)                                         │
//! │  - `verb Kind id ...` and `Kind.verb(...)` into one shape   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API + Commands (api.rs, commands/*.rs)                     │
//! │  - One module per verb, validation in a fixed order         │
//! │  - Returns lines to print, never prints                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - Registry keyed by "Kind.id", persist / reload            │
//! │  - FileBackend (production), InMemoryBackend (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Errors
//!
//! A mistyped command is not a failure of the program. Those come back as
//! [`error::CommandError`] and the console prints their fixed message.
//! Everything else in [`error::HbnbError`] is a genuine fault and ends the
//! process.
//!
//! ## Module Overview
//!
//! - [`api`]: facade dispatching verbs to commands
//! - [`commands`]: one module per verb
//! - [`console`]: the read-eval-print loop
//! - [`syntax`]: the two command parsers
//! - [`store`]: registry and backends
//! - [`model`]: `Kind`, `Record`, timestamps
//! - [`config`]: console configuration file
//! - [`logging`]: tracing bootstrap
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;
pub mod syntax;
