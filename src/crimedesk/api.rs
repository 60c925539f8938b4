//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the
//! single entry point for every desk operation, whatever the client.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns the session** for its whole lifetime
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (e.g., case id strings into [`CaseId`])
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs` and the core modules
//! - **Terminal I/O**: no stdout or stderr
//! - **Presentation**: returns data, not formatted strings
//!
//! ## Generic Over AttachmentStore
//!
//! `DeskApi<A: AttachmentStore>`:
//! - Production: `DeskApi<FsAttachmentStore>`
//! - Testing: `DeskApi<InMemoryAttachmentStore>`

use crate::commands;
use crate::config::DeskConfig;
use crate::error::Result;
use crate::id::CaseId;
use crate::model::CaseDraft;
use crate::query::CaseQuery;
use crate::session::Session;
use crate::store::AttachmentStore;
use std::path::Path;

/// The main API facade for desk operations.
pub struct DeskApi<A: AttachmentStore> {
    session: Session<A>,
    paths: commands::DeskPaths,
    config: DeskConfig,
}

impl<A: AttachmentStore> DeskApi<A> {
    pub fn new(attachments: A, paths: commands::DeskPaths, config: DeskConfig) -> Self {
        Self {
            session: Session::new(attachments, &config),
            paths,
            config,
        }
    }

    pub fn register_case(&mut self, draft: CaseDraft) -> Result<commands::CmdResult> {
        commands::register::run(&mut self.session, draft)
    }

    pub fn list_cases(&self, query: &CaseQuery) -> Result<commands::CmdResult> {
        commands::list::run(&self.session, query)
    }

    pub fn show_case(&self, id: &str) -> Result<commands::CmdResult> {
        let id: CaseId = id.parse()?;
        commands::show::run(&self.session, &id)
    }

    pub fn case_stats(&self, query: &CaseQuery) -> Result<commands::CmdResult> {
        commands::stats::run(&self.session, query)
    }

    pub fn add_officer(&mut self, name: &str) -> Result<commands::CmdResult> {
        commands::officers::add(&mut self.session, name)
    }

    pub fn list_officers(&self) -> Result<commands::CmdResult> {
        commands::officers::list(&self.session)
    }

    pub fn export_csv(&self, query: &CaseQuery) -> Result<commands::CmdResult> {
        commands::export::run(&self.session, query)
    }

    pub fn backup(&self) -> Result<commands::CmdResult> {
        commands::backup::run(&self.session)
    }

    pub fn clear(&mut self) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.session)
    }

    pub fn case_files(&self, id: &str) -> Result<commands::CmdResult> {
        let id: CaseId = id.parse()?;
        commands::files::list(&self.session, &id)
    }

    pub fn extract_files(&self, id: &str, dest: &Path) -> Result<commands::CmdResult> {
        let id: CaseId = id.parse()?;
        commands::files::extract(&self.session, &id, dest)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    /// Counts and locations, using the config the session started with.
    pub fn info(&self) -> Result<commands::CmdResult> {
        commands::info::run(&self.session, &self.paths, &self.config)
    }

    pub fn export_dir(&self) -> std::path::PathBuf {
        self.paths.export_dir(&self.config)
    }

    pub fn session(&self) -> &Session<A> {
        &self.session
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{
    ArtifactKind, CmdMessage, CmdResult, DeskPaths, ExportArtifact, MessageLevel,
};
