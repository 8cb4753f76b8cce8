//! # Dogshow Architecture
//!
//! Dogshow keeps the entry roster of a dog show: who is entered, with which
//! breed, owner, judge and award. Rosters are saved as XML files and can be
//! rendered as an HTML report.
//!
//! The crate is a library with a thin interactive client on top. All state
//! and behavior live here; the binary only reads commands and prints results.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Startup flags, the session loop, prompts, tables         │
//! │  - The ONLY place that knows about stdin/stdout/exit codes  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - The controller: selection, clean/dirty state, exit       │
//! │  - Parses row references (1-based) into positions           │
//! │  - Dispatches load/save/report to the worker (worker.rs)    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One function per operation, returning `CmdResult`        │
//! │  - No terminal I/O                                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - In-memory RecordStore, XML codec                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Commands**, **store** and **codec**: unit tests of the logic itself.
//! 2. **API**: state transitions (clean/dirty, selection, exit decisions) and
//!    task completions.
//! 3. **CLI**: session scripts run against in-memory input and output, plus
//!    end-to-end tests of the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The controller, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: The record store and its XML file format
//! - [`model`]: `DogEntry` and `Field`
//! - [`index`]: 1-based row numbers and row ranges
//! - [`form`]: The entry form behind add and edit
//! - [`report`]: HTML reports via templates
//! - [`worker`]: Background thread for load, save and report
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod index;
pub mod model;
pub mod report;
pub mod store;
pub mod worker;
