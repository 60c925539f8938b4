use super::{attachment_path, AttachmentRef, AttachmentStore};
use crate::error::{DeskError, Result};
use crate::id::CaseId;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// In-memory attachment storage for testing and development.
/// Does NOT persist data.
pub struct InMemoryAttachmentStore {
    root: PathBuf,
    files: HashMap<PathBuf, Vec<u8>>,
    writes_left: Option<usize>,
}

impl Default for InMemoryAttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAttachmentStore {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("uploads"),
            files: HashMap::new(),
            writes_left: None,
        }
    }

    /// Accept `n` writes, then fail every later one with an IO error.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.writes_left = Some(n);
        self
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

impl AttachmentStore for InMemoryAttachmentStore {
    fn put(&mut self, case_id: &CaseId, file_name: &str, bytes: &[u8]) -> Result<AttachmentRef> {
        if let Some(left) = self.writes_left.as_mut() {
            if *left == 0 {
                return Err(DeskError::Io(io::Error::other("simulated write failure")));
            }
            *left -= 1;
        }
        let path = attachment_path(&self.root, case_id, file_name);
        self.files.insert(path.clone(), bytes.to_vec());
        Ok(AttachmentRef {
            file_name: file_name.to_string(),
            path,
        })
    }

    fn read(&self, reference: &AttachmentRef) -> Result<Vec<u8>> {
        self.files
            .get(&reference.path)
            .cloned()
            .ok_or_else(|| DeskError::AttachmentNotFound(reference.path.display().to_string()))
    }

    fn remove(&mut self, reference: &AttachmentRef) -> Result<()> {
        self.files.remove(&reference.path);
        Ok(())
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::config::DeskConfig;
    use crate::model::{CaseDraft, CaseStatus, CrimeType, Priority};
    use crate::session::Session;
    use chrono::NaiveDate;

    pub struct SessionFixture {
        pub session: Session<InMemoryAttachmentStore>,
    }

    impl Default for SessionFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SessionFixture {
        pub fn new() -> Self {
            Self {
                session: Session::new(InMemoryAttachmentStore::new(), &DeskConfig::default()),
            }
        }

        pub fn draft(crime_type: CrimeType, officer: &str) -> CaseDraft {
            CaseDraft::new(
                crime_type,
                "Harbor Road",
                officer,
                format!("{} reported near the harbor", crime_type),
            )
        }

        /// Registers `count` valid cases, cycling through crime types.
        pub fn with_cases(mut self, count: usize) -> Self {
            let types = [CrimeType::Theft, CrimeType::Fraud, CrimeType::Assault];
            for i in 0..count {
                let draft = Self::draft(types[i % types.len()], "Officer Smith");
                self.session.register(draft).unwrap();
            }
            self
        }

        pub fn with_case(
            mut self,
            crime_type: CrimeType,
            officer: &str,
            status: CaseStatus,
            priority: Priority,
            incident_date: NaiveDate,
        ) -> Self {
            let draft = Self::draft(crime_type, officer)
                .with_status(status)
                .with_priority(priority)
                .with_incident_date(incident_date);
            self.session.register(draft).unwrap();
            self
        }
    }
}
