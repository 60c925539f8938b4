//! # Session
//!
//! A [`Session`] is the explicit context every operation runs against. It
//! owns the record store, the officer registry, the attachment index and the
//! attachment backend. Nothing is global: dropping the session drops the data.
//!
//! Each operation runs to completion before the next one starts, so there is
//! no locking. A failed registration leaves the session exactly as it was.

use crate::config::DeskConfig;
use crate::error::{DeskError, Result};
use crate::id::{generate_unique, random_suffix, CaseId};
use crate::model::{CaseDraft, CaseRecord};
use crate::officers::OfficerRegistry;
use crate::store::{AttachmentRef, AttachmentStore, RecordStore};
use crate::validation::{
    stored_file_name, validate_assignment, validate_attachments, validate_form,
};
use chrono::{DateTime, FixedOffset, Local};

pub struct Session<A: AttachmentStore> {
    records: RecordStore,
    officers: OfficerRegistry,
    attachments: A,
    attachment_extensions: Vec<String>,
}

impl<A: AttachmentStore> Session<A> {
    pub fn new(attachments: A, config: &DeskConfig) -> Self {
        Self {
            records: RecordStore::new(),
            officers: OfficerRegistry::seeded(&config.officers),
            attachments,
            attachment_extensions: config.attachment_extensions.clone(),
        }
    }

    /// Validates the draft and, if it passes, stores its attachments and
    /// appends a new record.
    pub fn register(&mut self, draft: CaseDraft) -> Result<CaseRecord> {
        self.register_at(draft, Local::now().fixed_offset())
    }

    /// Registration against an explicit local clock reading. The id date,
    /// the default incident date and `registered_at` all come from `now`.
    pub fn register_at(
        &mut self,
        draft: CaseDraft,
        now: DateTime<FixedOffset>,
    ) -> Result<CaseRecord> {
        let mut errors = validate_form(
            draft.crime_type,
            &draft.location,
            &draft.officer,
            &draft.description,
        );
        errors.extend(validate_assignment(&draft.officer, &self.officers));
        errors.extend(validate_attachments(
            &draft.attachments,
            &self.attachment_extensions,
        ));

        let crime_type = match draft.crime_type {
            Some(crime_type) if errors.is_empty() => crime_type,
            _ => {
                tracing::debug!(?errors, "registration rejected");
                return Err(DeskError::Validation(errors));
            }
        };

        let today = now.date_naive();
        let records = &self.records;
        let id = generate_unique(today, |c| records.contains_id(c), random_suffix)?;

        let references = self.store_attachments(&id, &draft)?;

        let record = CaseRecord {
            id,
            crime_type,
            location: draft.location,
            officer: draft.officer,
            status: draft.status.unwrap_or_default(),
            priority: draft.priority.unwrap_or_default(),
            description: draft.description,
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
            registered_at: now,
            incident_date: draft.incident_date.unwrap_or(today),
            attached_file_count: references.len(),
        };

        tracing::info!(
            case = %record.id,
            crime_type = %record.crime_type,
            officer = %record.officer,
            files = record.attached_file_count,
            "case registered"
        );
        self.records.append(record.clone(), references);
        Ok(record)
    }

    /// Writes every attachment or none: on the first failure, files already
    /// written for this case are removed again.
    fn store_attachments(&mut self, id: &CaseId, draft: &CaseDraft) -> Result<Vec<AttachmentRef>> {
        let mut stored = Vec::with_capacity(draft.attachments.len());

        for attachment in &draft.attachments {
            let outcome = stored_file_name(&attachment.file_name)
                .ok_or_else(|| {
                    DeskError::Validation(vec![format!(
                        "Attachment name {} is invalid",
                        attachment.file_name
                    )])
                })
                .and_then(|name| self.attachments.put(id, &name, &attachment.bytes));

            match outcome {
                Ok(reference) => stored.push(reference),
                Err(e) => {
                    tracing::warn!(case = %id, error = %e, "attachment write failed, rolling back");
                    for reference in &stored {
                        if let Err(cleanup) = self.attachments.remove(reference) {
                            tracing::warn!(
                                path = %reference.path.display(),
                                error = %cleanup,
                                "could not remove partial attachment"
                            );
                        }
                    }
                    return Err(e);
                }
            }
        }

        Ok(stored)
    }

    pub fn records(&self) -> &[CaseRecord] {
        self.records.list()
    }

    pub fn get(&self, id: &CaseId) -> Result<&CaseRecord> {
        self.records
            .get(id)
            .ok_or_else(|| DeskError::CaseNotFound(id.to_string()))
    }

    pub fn attachments(&self, id: &CaseId) -> Result<&[AttachmentRef]> {
        self.get(id)?;
        Ok(self.records.attachments(id))
    }

    pub fn read_attachment(&self, reference: &AttachmentRef) -> Result<Vec<u8>> {
        self.attachments.read(reference)
    }

    pub fn attachment_store(&self) -> &A {
        &self.attachments
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.records.clear();
        tracing::info!(removed, "all case records cleared");
        removed
    }

    pub fn officers(&self) -> &OfficerRegistry {
        &self.officers
    }

    pub fn add_officer(&mut self, name: &str) -> Result<()> {
        self.officers.add(name)?;
        tracing::info!(officer = name.trim(), "officer added");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
