use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DeskError, Result};
use crate::session::Session;
use crate::store::AttachmentStore;

/// A duplicate is not a failure: it is reported as a warning and nothing changes.
pub fn add<A: AttachmentStore>(session: &mut Session<A>, name: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match session.add_officer(name) {
        Ok(()) => {
            result.add_message(CmdMessage::success(format!(
                "{} added to the registry",
                name.trim()
            )));
        }
        Err(DeskError::DuplicateOfficer(existing)) => {
            result.add_message(CmdMessage::warning(format!(
                "{} already exists!",
                existing
            )));
        }
        Err(e) => return Err(e),
    }
    Ok(result.with_officers(session.officers().list().to_vec()))
}

pub fn list<A: AttachmentStore>(session: &Session<A>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_officers(session.officers().list().to_vec()))
}
