//! # Crimedesk Architecture
//!
//! Crimedesk is a **UI-agnostic case desk library**. The shell in `main.rs` is
//! one client; the same core could sit behind a web form or a desktop app.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (main.rs, args.rs)                                   │
//! │  - Reads one command per line, prints tables and counts     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the Session              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation, returns CmdResult              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (session, validation, query, stats, id, officers)     │
//! │  Storage (store/): records in memory, attachments on disk   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session lifetime
//!
//! All case data lives in a [`session::Session`] and dies with it. There is
//! no persistence engine: a backup is a one-way JSON snapshot, never read
//! back. Only evidence files and the config file touch disk.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`session`]: The explicit context object every operation runs against
//! - [`model`]: `CaseRecord`, `CaseDraft` and the closed enumerations
//! - [`id`]: Case identifier format and generation
//! - [`validation`]: Form and registration checks
//! - [`officers`]: The officer registry
//! - [`query`]: Record filtering
//! - [`stats`]: Grouped counts for reporting
//! - [`store`]: Record store, attachment index and attachment backends
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod officers;
pub mod query;
pub mod session;
pub mod stats;
pub mod store;
pub mod validation;
