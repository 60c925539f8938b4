use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::CaseDraft;
use crate::session::Session;
use crate::store::AttachmentStore;

pub fn run<A: AttachmentStore>(session: &mut Session<A>, draft: CaseDraft) -> Result<CmdResult> {
    let record = session.register(draft)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Case successfully registered with ID: {}",
        record.id
    )));
    if record.attached_file_count > 0 {
        result.add_message(CmdMessage::info(format!(
            "{} file(s) attached",
            record.attached_file_count
        )));
    }
    Ok(result.with_affected_records(vec![record]))
}
