use crate::model::{CaseRecord, CaseStatus, CrimeType, Priority};
use chrono::NaiveDate;

/// Inclusive range on the incident date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range whose start is after its end contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Filters over the record list. Every field left empty means "no
/// restriction"; supplied filters are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct CaseQuery {
    pub text: Option<String>,
    pub crime_types: Vec<CrimeType>,
    pub statuses: Vec<CaseStatus>,
    pub priorities: Vec<Priority>,
    pub officers: Vec<String>,
    pub date_range: Option<DateRange>,
}

impl CaseQuery {
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.crime_types.is_empty()
            && self.statuses.is_empty()
            && self.priorities.is_empty()
            && self.officers.is_empty()
            && self.date_range.is_none()
    }

    fn search_term(&self) -> Option<String> {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, record: &CaseRecord) -> bool {
        self.matches_with_term(record, self.search_term().as_deref())
    }

    fn matches_with_term(&self, record: &CaseRecord, term: Option<&str>) -> bool {
        if let Some(term) = term {
            let hit = record
                .field_strings()
                .iter()
                .any(|field| field.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }

        member_of(&self.crime_types, &record.crime_type)
            && member_of(&self.statuses, &record.status)
            && member_of(&self.priorities, &record.priority)
            && member_of(&self.officers, &record.officer)
            && self
                .date_range
                .map_or(true, |range| range.contains(record.incident_date))
    }

    /// The matching subsequence, in input order.
    pub fn apply<'a>(&self, records: &'a [CaseRecord]) -> Vec<&'a CaseRecord> {
        let term = self.search_term();
        records
            .iter()
            .filter(|r| self.matches_with_term(r, term.as_deref()))
            .collect()
    }
}

fn member_of<T: PartialEq>(selection: &[T], value: &T) -> bool {
    selection.is_empty() || selection.contains(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::SessionFixture;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> SessionFixture {
        SessionFixture::new()
            .with_case(
                CrimeType::Theft,
                "Officer Smith",
                CaseStatus::Open,
                Priority::High,
                date(2024, 1, 10),
            )
            .with_case(
                CrimeType::Fraud,
                "Officer Brown",
                CaseStatus::Closed,
                Priority::Low,
                date(2024, 2, 3),
            )
            .with_case(
                CrimeType::Theft,
                "Officer Brown",
                CaseStatus::Open,
                Priority::Critical,
                date(2024, 2, 20),
            )
            .with_case(
                CrimeType::Assault,
                "Officer Davis",
                CaseStatus::ColdCase,
                Priority::Medium,
                date(2024, 3, 1),
            )
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let f = fixture();
        let records = f.session.records();
        let result = CaseQuery::default().apply(records);
        assert_eq!(result.len(), 4);
        for (got, want) in result.iter().zip(records) {
            assert_eq!(got.id, want.id);
        }
        assert!(CaseQuery::default().is_empty());
    }

    #[test]
    fn status_filter_selects_exact_subsequence() {
        let f = fixture();
        let query = CaseQuery {
            statuses: vec![CaseStatus::Open],
            ..Default::default()
        };
        let result = query.apply(f.session.records());
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.status == CaseStatus::Open));
        assert_eq!(result[0].incident_date, date(2024, 1, 10));
        assert_eq!(result[1].incident_date, date(2024, 2, 20));
    }

    #[test]
    fn filters_combine_with_and() {
        let f = fixture();
        let query = CaseQuery {
            crime_types: vec![CrimeType::Theft],
            officers: vec!["Officer Brown".into()],
            ..Default::default()
        };
        let result = query.apply(f.session.records());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].priority, Priority::Critical);
    }

    #[test]
    fn text_search_is_case_insensitive_across_fields() {
        let f = fixture();
        let by_officer = CaseQuery {
            text: Some("davis".into()),
            ..Default::default()
        };
        assert_eq!(by_officer.apply(f.session.records()).len(), 1);

        let by_date = CaseQuery {
            text: Some("2024-02".into()),
            ..Default::default()
        };
        assert_eq!(by_date.apply(f.session.records()).len(), 2);

        let by_status_label = CaseQuery {
            text: Some("COLD CASE".into()),
            ..Default::default()
        };
        assert_eq!(by_status_label.apply(f.session.records()).len(), 1);

        let by_id_prefix = CaseQuery {
            text: Some("case-".into()),
            ..Default::default()
        };
        assert_eq!(by_id_prefix.apply(f.session.records()).len(), 4);
    }

    #[test]
    fn empty_text_is_no_restriction() {
        let f = fixture();
        let query = CaseQuery {
            text: Some(String::new()),
            ..Default::default()
        };
        assert!(query.is_empty());
        assert_eq!(query.apply(f.session.records()).len(), 4);
    }

    #[test]
    fn date_range_is_inclusive() {
        let f = fixture();
        let query = CaseQuery {
            date_range: Some(DateRange::new(date(2024, 2, 3), date(2024, 3, 1))),
            ..Default::default()
        };
        assert_eq!(query.apply(f.session.records()).len(), 3);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let f = fixture();
        let query = CaseQuery {
            date_range: Some(DateRange::new(date(2024, 3, 1), date(2024, 1, 1))),
            ..Default::default()
        };
        assert!(query.apply(f.session.records()).is_empty());
    }

    #[test]
    fn multi_value_selection_is_membership() {
        let f = fixture();
        let query = CaseQuery {
            priorities: vec![Priority::High, Priority::Critical],
            ..Default::default()
        };
        assert_eq!(query.apply(f.session.records()).len(), 2);
    }
}
