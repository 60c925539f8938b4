use super::AttachmentRef;
use crate::id::CaseId;
use crate::model::CaseRecord;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<CaseRecord>,
    attachments: HashMap<CaseId, Vec<AttachmentRef>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record; references are indexed only when there are any.
    pub fn append(&mut self, record: CaseRecord, references: Vec<AttachmentRef>) {
        if !references.is_empty() {
            self.attachments.insert(record.id.clone(), references);
        }
        self.records.push(record);
    }

    pub fn list(&self) -> &[CaseRecord] {
        &self.records
    }

    pub fn get(&self, id: &CaseId) -> Option<&CaseRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains_id(&self, id: &CaseId) -> bool {
        self.get(id).is_some()
    }

    pub fn attachments(&self, id: &CaseId) -> &[AttachmentRef] {
        self.attachments.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Drops every record and index entry, returning how many records went.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        self.attachments.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
