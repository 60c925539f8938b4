use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::session::Session;
use crate::store::AttachmentStore;

pub fn run<A: AttachmentStore>(session: &mut Session<A>) -> Result<CmdResult> {
    let removed = session.clear();
    let mut result = CmdResult::default();
    if removed == 0 {
        result.add_message(CmdMessage::info("Nothing to clear."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "All data cleared successfully! ({} cases removed)",
            removed
        )));
    }
    Ok(result)
}
