use crate::config::DeskConfig;
use crate::error::{DeskError, Result};
use crate::model::CaseRecord;
use crate::stats::CaseStats;
use crate::store::AttachmentRef;
use std::fs;
use std::path::{Path, PathBuf};

pub mod backup;
pub mod clear;
pub mod config;
pub mod export;
pub mod files;
pub mod info;
pub mod list;
pub mod officers;
pub mod register;
pub mod show;
pub mod stats;

#[derive(Debug, Clone)]
pub struct DeskPaths {
    pub data_dir: PathBuf,
}

impl DeskPaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn attachments_dir(&self, config: &DeskConfig) -> PathBuf {
        config.attachments_path(&self.data_dir)
    }

    pub fn export_dir(&self, config: &DeskConfig) -> PathBuf {
        config.export_path(&self.data_dir)
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Csv,
    Backup,
}

/// A generated download: bytes plus the file name it should be saved under.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub contents: Vec<u8>,
    pub record_count: usize,
}

impl ExportArtifact {
    /// Writes the artifact into `dir` (created if missing) under its own name.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(DeskError::Io)?;
        }
        let path = dir.join(&self.file_name);
        self.write_to(&path)?;
        Ok(path)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.contents).map_err(DeskError::Io)?;
        tracing::info!(path = %path.display(), records = self.record_count, "export written");
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<CaseRecord>,
    pub listed_records: Vec<CaseRecord>,
    /// Size of the store the listing was drawn from.
    pub total_records: usize,
    pub officers: Vec<String>,
    pub attachments: Vec<AttachmentRef>,
    pub written_paths: Vec<PathBuf>,
    pub stats: Option<CaseStats>,
    pub artifact: Option<ExportArtifact>,
    pub config: Option<DeskConfig>,
    pub info: Option<info::SessionInfo>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<CaseRecord>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<CaseRecord>, total: usize) -> Self {
        self.listed_records = records;
        self.total_records = total;
        self
    }

    pub fn with_officers(mut self, officers: Vec<String>) -> Self {
        self.officers = officers;
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<AttachmentRef>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn with_written_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.written_paths = paths;
        self
    }

    pub fn with_stats(mut self, stats: CaseStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_artifact(mut self, artifact: ExportArtifact) -> Self {
        self.artifact = Some(artifact);
        self
    }

    pub fn with_config(mut self, config: DeskConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_info(mut self, info: info::SessionInfo) -> Self {
        self.info = Some(info);
        self
    }
}
