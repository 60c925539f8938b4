use crate::commands::{ArtifactKind, CmdMessage, CmdResult, ExportArtifact};
use crate::error::{DeskError, Result};
use crate::model::CaseRecord;
use crate::session::Session;
use crate::store::AttachmentStore;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

/// Point-in-time snapshot of the session. Written out, never read back.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot<'a> {
    pub records: &'a [CaseRecord],
    pub officers: &'a [String],
    pub export_date: DateTime<Utc>,
}

pub fn run<A: AttachmentStore>(session: &Session<A>) -> Result<CmdResult> {
    if session.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No cases to back up."));
        return Ok(res);
    }

    let snapshot = BackupSnapshot {
        records: session.records(),
        officers: session.officers().list(),
        export_date: Utc::now(),
    };
    let json = serde_json::to_string_pretty(&snapshot).map_err(DeskError::Serialization)?;

    let artifact = ExportArtifact {
        kind: ArtifactKind::Backup,
        file_name: format!(
            "crime_system_backup_{}.json",
            Local::now().format("%Y%m%d_%H%M%S")
        ),
        contents: json.into_bytes(),
        record_count: session.len(),
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Backing up {} cases and {} officers",
        session.len(),
        session.officers().len()
    )));
    Ok(result.with_artifact(artifact))
}
