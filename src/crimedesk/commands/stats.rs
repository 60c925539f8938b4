use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::query::CaseQuery;
use crate::session::Session;
use crate::stats::CaseStats;
use crate::store::AttachmentStore;

pub fn run<A: AttachmentStore>(session: &Session<A>, query: &CaseQuery) -> Result<CmdResult> {
    if session.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info(
            "No data available for analysis. Add some cases first.",
        ));
        return Ok(res);
    }

    let selected = query.apply(session.records());
    let stats = CaseStats::compute(selected);
    Ok(CmdResult::default().with_stats(stats))
}
