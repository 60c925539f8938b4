use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::CaseQuery;
use crate::session::Session;
use crate::store::AttachmentStore;

pub fn run<A: AttachmentStore>(session: &Session<A>, query: &CaseQuery) -> Result<CmdResult> {
    let records = session.records();
    let listed = query.apply(records).into_iter().cloned().collect();
    Ok(CmdResult::default().with_listed_records(listed, records.len()))
}
