use super::{attachment_path, AttachmentRef, AttachmentStore};
use crate::error::{DeskError, Result};
use crate::id::CaseId;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub struct FsAttachmentStore {
    root: PathBuf,
}

impl FsAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(DeskError::Io)?;
        }
        Ok(())
    }
}

impl AttachmentStore for FsAttachmentStore {
    fn put(&mut self, case_id: &CaseId, file_name: &str, bytes: &[u8]) -> Result<AttachmentRef> {
        self.ensure_dir()?;
        let path = attachment_path(&self.root, case_id, file_name);
        fs::write(&path, bytes).map_err(DeskError::Io)?;
        tracing::debug!(case = %case_id, path = %path.display(), size = bytes.len(), "stored attachment");
        Ok(AttachmentRef {
            file_name: file_name.to_string(),
            path,
        })
    }

    fn read(&self, reference: &AttachmentRef) -> Result<Vec<u8>> {
        fs::read(&reference.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                DeskError::AttachmentNotFound(reference.path.display().to_string())
            }
            _ => DeskError::Io(e),
        })
    }

    fn remove(&mut self, reference: &AttachmentRef) -> Result<()> {
        match fs::remove_file(&reference.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeskError::Io(e)),
        }
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
