use crate::commands::{CmdResult, DeskPaths};
use crate::config::DeskConfig;
use crate::error::Result;
use crate::session::Session;
use crate::store::AttachmentStore;
use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;

/// Counts and locations for the running session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    pub total_cases: usize,
    pub officers: usize,
    /// Most recent registration, `None` for an empty store.
    pub last_registered: Option<DateTime<FixedOffset>>,
    pub data_dir: PathBuf,
    pub attachments_dir: PathBuf,
    pub export_dir: PathBuf,
}

pub fn run<A: AttachmentStore>(
    session: &Session<A>,
    paths: &DeskPaths,
    config: &DeskConfig,
) -> Result<CmdResult> {
    let info = SessionInfo {
        total_cases: session.len(),
        officers: session.officers().len(),
        last_registered: session.records().iter().map(|r| r.registered_at).max(),
        data_dir: paths.data_dir.clone(),
        attachments_dir: session.attachment_store().root().to_path_buf(),
        export_dir: paths.export_dir(config),
    };
    Ok(CmdResult::default().with_info(info))
}
