use crate::commands::CmdResult;
use crate::error::Result;
use crate::id::CaseId;
use crate::session::Session;
use crate::store::AttachmentStore;

pub fn run<A: AttachmentStore>(session: &Session<A>, id: &CaseId) -> Result<CmdResult> {
    let record = session.get(id)?.clone();
    let attachments = session.attachments(id)?.to_vec();
    Ok(CmdResult::default()
        .with_listed_records(vec![record], session.len())
        .with_attachments(attachments))
}
