//! # Storage Layer
//!
//! Case records live in memory for the lifetime of a session. The only thing
//! that touches disk is evidence: files attached at registration. Attachment
//! storage sits behind the [`AttachmentStore`] trait so the session logic
//! never needs to know where bytes end up.
//!
//! ## Implementations
//!
//! - [`fs::FsAttachmentStore`]: production storage
//!   - One file per attachment: `<dir>/<caseId>_<fileName>`
//!   - Directory is created on first write
//!
//! - [`memory::InMemoryAttachmentStore`]: for tests
//!   - Same naming scheme, bytes kept in a map
//!   - Can be told to fail writes, to exercise rollback
//!
//! ## Records and the attachment index
//!
//! [`RecordStore`] owns the ordered record list and the attachment index
//! (case id -> stored file references). Appending is the only write path;
//! `clear` is the only way anything leaves.
//!
//! ```text
//! uploads/
//! ├── CASE-20240309-AB12CD_report.pdf
//! └── CASE-20240309-AB12CD_photo.jpg
//! ```

use crate::error::Result;
use crate::id::CaseId;
use std::path::{Path, PathBuf};

pub mod fs;
pub mod memory;
mod records;

pub use records::RecordStore;

/// Where a stored attachment lives, plus the name it was uploaded with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRef {
    pub file_name: String,
    pub path: PathBuf,
}

/// Path an attachment for `case_id` named `file_name` is stored under.
pub fn attachment_path(root: &Path, case_id: &CaseId, file_name: &str) -> PathBuf {
    root.join(format!("{}_{}", case_id, file_name))
}

/// Abstract interface for evidence storage.
///
/// `file_name` is already reduced to a bare file name by the caller.
pub trait AttachmentStore {
    /// Store bytes for a case, overwriting anything already at that path
    fn put(&mut self, case_id: &CaseId, file_name: &str, bytes: &[u8]) -> Result<AttachmentRef>;

    /// Re-read a stored attachment
    fn read(&self, reference: &AttachmentRef) -> Result<Vec<u8>>;

    /// Remove a stored attachment; missing files are not an error
    fn remove(&mut self, reference: &AttachmentRef) -> Result<()>;

    /// Directory attachments are written to
    fn root(&self) -> &Path;
}
