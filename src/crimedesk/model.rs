use crate::error::{DeskError, Result};
use crate::id::CaseId;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed enumerations with a fixed, human-readable label per variant.
pub trait Labeled: Sized + Copy + 'static {
    const ALL: &'static [Self];
    const KIND: &'static str;

    fn label(&self) -> &'static str;

    /// Case-insensitive lookup that ignores spaces, hyphens and underscores,
    /// so `cold-case`, `ColdCase` and `Cold Case` all resolve.
    fn from_label(input: &str) -> Result<Self> {
        let wanted = normalize_label(input);
        Self::ALL
            .iter()
            .copied()
            .find(|v| normalize_label(v.label()) == wanted)
            .ok_or_else(|| {
                let choices: Vec<&str> = Self::ALL.iter().map(|v| v.label()).collect();
                DeskError::InvalidValue(format!(
                    "unknown {} '{}' (expected one of: {})",
                    Self::KIND,
                    input,
                    choices.join(", ")
                ))
            })
    }
}

fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CrimeType {
    Theft,
    Murder,
    Assault,
    Cybercrime,
    Fraud,
    Burglary,
    #[serde(rename = "Drug Offense")]
    DrugOffense,
    Vandalism,
    #[serde(rename = "Domestic Violence")]
    DomesticViolence,
    Other,
}

impl Labeled for CrimeType {
    const ALL: &'static [Self] = &[
        CrimeType::Theft,
        CrimeType::Murder,
        CrimeType::Assault,
        CrimeType::Cybercrime,
        CrimeType::Fraud,
        CrimeType::Burglary,
        CrimeType::DrugOffense,
        CrimeType::Vandalism,
        CrimeType::DomesticViolence,
        CrimeType::Other,
    ];
    const KIND: &'static str = "crime type";

    fn label(&self) -> &'static str {
        match self {
            CrimeType::Theft => "Theft",
            CrimeType::Murder => "Murder",
            CrimeType::Assault => "Assault",
            CrimeType::Cybercrime => "Cybercrime",
            CrimeType::Fraud => "Fraud",
            CrimeType::Burglary => "Burglary",
            CrimeType::DrugOffense => "Drug Offense",
            CrimeType::Vandalism => "Vandalism",
            CrimeType::DomesticViolence => "Domestic Violence",
            CrimeType::Other => "Other",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum CaseStatus {
    #[default]
    Open,
    #[serde(rename = "Under Investigation")]
    UnderInvestigation,
    Closed,
    #[serde(rename = "Cold Case")]
    ColdCase,
    #[serde(rename = "Pending Review")]
    PendingReview,
}

impl Labeled for CaseStatus {
    const ALL: &'static [Self] = &[
        CaseStatus::Open,
        CaseStatus::UnderInvestigation,
        CaseStatus::Closed,
        CaseStatus::ColdCase,
        CaseStatus::PendingReview,
    ];
    const KIND: &'static str = "status";

    fn label(&self) -> &'static str {
        match self {
            CaseStatus::Open => "Open",
            CaseStatus::UnderInvestigation => "Under Investigation",
            CaseStatus::Closed => "Closed",
            CaseStatus::ColdCase => "Cold Case",
            CaseStatus::PendingReview => "Pending Review",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Labeled for Priority {
    const ALL: &'static [Self] = &[
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];
    const KIND: &'static str = "priority";

    fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

macro_rules! label_display_and_parse {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = DeskError;

                fn from_str(s: &str) -> Result<Self> {
                    <$ty as Labeled>::from_label(s)
                }
            }
        )*
    };
}

label_display_and_parse!(CrimeType, CaseStatus, Priority);

/// Format used wherever `registered_at` is shown or exported as text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub id: CaseId,
    pub crime_type: CrimeType,
    pub location: String,
    pub officer: String,
    pub status: CaseStatus,
    pub priority: Priority,
    pub description: String,
    pub notes: Option<String>,
    /// Local wall-clock time of registration, offset included. The id date
    /// is taken from the same instant.
    pub registered_at: DateTime<FixedOffset>,
    pub incident_date: NaiveDate,
    pub attached_file_count: usize,
}

impl CaseRecord {
    /// Every field rendered as text, in field order. Free-text search and
    /// CSV rows both read from here so they agree on what a field "says".
    pub fn field_strings(&self) -> [String; 11] {
        [
            self.id.to_string(),
            self.crime_type.label().to_string(),
            self.location.clone(),
            self.officer.clone(),
            self.status.label().to_string(),
            self.priority.label().to_string(),
            self.description.clone(),
            self.notes.clone().unwrap_or_default(),
            self.registered_at.format(TIMESTAMP_FORMAT).to_string(),
            self.incident_date.format(DATE_FORMAT).to_string(),
            self.attached_file_count.to_string(),
        ]
    }
}

/// A file handed in at registration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Raw form input for a new case. Text fields are kept as typed; the
/// crime type is optional so a missing selection surfaces as a validation
/// message rather than a parse failure.
#[derive(Debug, Clone, Default)]
pub struct CaseDraft {
    pub crime_type: Option<CrimeType>,
    pub location: String,
    pub officer: String,
    pub status: Option<CaseStatus>,
    pub priority: Option<Priority>,
    pub description: String,
    pub notes: Option<String>,
    pub incident_date: Option<NaiveDate>,
    pub attachments: Vec<Attachment>,
}

impl CaseDraft {
    pub fn new(
        crime_type: CrimeType,
        location: impl Into<String>,
        officer: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            crime_type: Some(crime_type),
            location: location.into(),
            officer: officer.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: CaseStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_incident_date(mut self, date: NaiveDate) -> Self {
        self.incident_date = Some(date);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        DeskError::InvalidValue(format!("invalid date '{}' (expected YYYY-MM-DD)", input))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_loosely() {
        assert_eq!(
            "under-investigation".parse::<CaseStatus>().unwrap(),
            CaseStatus::UnderInvestigation
        );
        assert_eq!(
            "Drug Offense".parse::<CrimeType>().unwrap(),
            CrimeType::DrugOffense
        );
        assert_eq!("critical".parse::<Priority>().unwrap(), Priority::Critical);
    }

    #[test]
    fn unknown_label_lists_choices() {
        let err = "Urgent".parse::<Priority>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Urgent"));
        assert!(msg.contains("Low, Medium, High, Critical"));
    }

    #[test]
    fn closed_sets_have_expected_sizes() {
        assert_eq!(CrimeType::ALL.len(), 10);
        assert_eq!(CaseStatus::ALL.len(), 5);
        assert_eq!(Priority::ALL.len(), 4);
    }

    #[test]
    fn defaults_follow_form_preselection() {
        assert_eq!(CaseStatus::default(), CaseStatus::Open);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn record_serializes_with_camel_case_keys_and_labels() {
        let record = CaseRecord {
            id: CaseId::parse("CASE-20240105-A1B2C3").unwrap(),
            crime_type: CrimeType::DomesticViolence,
            location: "Main St".into(),
            officer: "Officer Smith".into(),
            status: CaseStatus::ColdCase,
            priority: Priority::High,
            description: "Long enough description".into(),
            notes: None,
            registered_at: DateTime::parse_from_rfc3339("2024-01-05T22:15:00+05:30").unwrap(),
            incident_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            attached_file_count: 2,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["crimeType"], "Domestic Violence");
        assert_eq!(json["status"], "Cold Case");
        assert_eq!(json["incidentDate"], "2024-01-05");
        assert_eq!(json["attachedFileCount"], 2);
        assert_eq!(json["id"], "CASE-20240105-A1B2C3");
        assert_eq!(json["registeredAt"], "2024-01-05T22:15:00+05:30");
        assert_eq!(record.field_strings()[8], "2024-01-05 22:15:00");
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("05/01/2024").is_err());
        assert_eq!(
            parse_date(" 2024-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
