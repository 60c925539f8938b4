use crate::commands::{ArtifactKind, CmdMessage, CmdResult, ExportArtifact};
use crate::error::Result;
use crate::model::CaseRecord;
use crate::query::CaseQuery;
use crate::session::Session;
use crate::store::AttachmentStore;
use chrono::Local;

/// Column names, in record field order. Attachment data is never exported.
pub const CSV_HEADER: [&str; 10] = [
    "id",
    "crimeType",
    "location",
    "officer",
    "status",
    "priority",
    "description",
    "notes",
    "registeredAt",
    "incidentDate",
];

pub fn run<A: AttachmentStore>(session: &Session<A>, query: &CaseQuery) -> Result<CmdResult> {
    let selected = query.apply(session.records());

    if selected.is_empty() {
        let mut res = CmdResult::default();
        res.add_message(CmdMessage::info("No cases to export."));
        return Ok(res);
    }

    let artifact = ExportArtifact {
        kind: ArtifactKind::Csv,
        file_name: format!(
            "crime_cases_{}.csv",
            Local::now().format("%Y%m%d_%H%M%S")
        ),
        contents: to_csv(selected.iter().copied()),
        record_count: selected.len(),
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Exporting {} of {} cases",
        selected.len(),
        session.len()
    )));
    Ok(result.with_artifact(artifact))
}

/// Header line plus one line per record, `\n` terminated, UTF-8.
pub fn to_csv<'a, I>(records: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut out = String::new();
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');

    for record in records {
        let fields = record.field_strings();
        let row: Vec<String> = fields[..CSV_HEADER.len()]
            .iter()
            .map(|f| csv_escape(f))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out.into_bytes()
}

fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
