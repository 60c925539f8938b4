use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeskError, Result};
use crate::id::CaseId;
use crate::session::Session;
use crate::store::AttachmentStore;
use std::fs;
use std::path::Path;

pub fn list<A: AttachmentStore>(session: &Session<A>, id: &CaseId) -> Result<CmdResult> {
    let attachments = session.attachments(id)?.to_vec();
    let mut result = CmdResult::default();
    if attachments.is_empty() {
        result.add_message(CmdMessage::info(format!("No files attached to {}", id)));
    }
    Ok(result.with_attachments(attachments))
}

/// Copies every stored attachment of a case into `dest`, under its
/// original upload name.
pub fn extract<A: AttachmentStore>(
    session: &Session<A>,
    id: &CaseId,
    dest: &Path,
) -> Result<CmdResult> {
    let attachments = session.attachments(id)?.to_vec();
    if attachments.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info(format!("No files attached to {}", id)));
        return Ok(res);
    }

    if !dest.exists() {
        fs::create_dir_all(dest).map_err(DeskError::Io)?;
    }

    let mut written = Vec::with_capacity(attachments.len());
    for reference in &attachments {
        let bytes = session.read_attachment(reference)?;
        let target = dest.join(&reference.file_name);
        fs::write(&target, bytes).map_err(DeskError::Io)?;
        written.push(target);
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Extracted {} file(s) to {}",
        written.len(),
        dest.display()
    )));
    Ok(result
        .with_attachments(attachments)
        .with_written_paths(written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attachment, CrimeType};
    use crate::store::memory::fixtures::SessionFixture;
    use tempfile::TempDir;

    #[test]
    fn lists_nothing_for_case_without_files() {
        let f = SessionFixture::new().with_cases(1);
        let id = f.session.records()[0].id.clone();
        let result = list(&f.session, &id).unwrap();
        assert!(result.attachments.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn extracts_original_names() {
        let mut f = SessionFixture::new();
        let record = f
            .session
            .register(
                SessionFixture::draft(CrimeType::Burglary, "Officer Smith")
                    .with_attachment(Attachment::new("door.jpg", b"jpeg-bytes".to_vec())),
            )
            .unwrap();

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let result = extract(&f.session, &record.id, &dest).unwrap();

        assert_eq!(result.written_paths, vec![dest.join("door.jpg")]);
        assert_eq!(fs::read(dest.join("door.jpg")).unwrap(), b"jpeg-bytes");
    }

    #[test]
    fn unknown_case_is_an_error() {
        let f = SessionFixture::new();
        let id = CaseId::parse("CASE-20240101-ABCDEF").unwrap();
        assert!(matches!(list(&f.session, &id), Err(DeskError::CaseNotFound(_))));
    }
}
