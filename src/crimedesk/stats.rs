//! Grouped counts for reporting. Everything here is a plain tally over the
//! record slice it is given; nothing is cached between calls.

use crate::model::{CaseRecord, CaseStatus, CrimeType, Labeled, Priority};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally<K> {
    pub key: K,
    pub count: usize,
}

/// Cases in one calendar month (`YYYY-MM`) for one crime type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub crime_type: CrimeType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub high_priority: usize,
    /// Percentage of open cases, 0 when there are no cases.
    pub open_share: f64,
    pub avg_cases_per_officer: f64,
    pub by_status: Vec<Tally<CaseStatus>>,
    pub by_priority: Vec<Tally<Priority>>,
    pub by_crime_type: Vec<Tally<CrimeType>>,
    pub by_officer: Vec<Tally<String>>,
    pub trend: Vec<TrendPoint>,
}

impl CaseStats {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CaseRecord>,
    {
        let records: Vec<&CaseRecord> = records.into_iter().collect();
        let total = records.len();
        let open = records
            .iter()
            .filter(|r| r.status == CaseStatus::Open)
            .count();

        Self {
            total,
            open,
            closed: records
                .iter()
                .filter(|r| r.status == CaseStatus::Closed)
                .count(),
            high_priority: records
                .iter()
                .filter(|r| r.priority == Priority::High)
                .count(),
            open_share: if total == 0 {
                0.0
            } else {
                open as f64 / total as f64 * 100.0
            },
            avg_cases_per_officer: avg_cases_per_officer(records.iter().copied()),
            by_status: count_by(records.iter().map(|r| r.status)),
            by_priority: count_by(records.iter().map(|r| r.priority)),
            by_crime_type: count_by(records.iter().map(|r| r.crime_type)),
            by_officer: count_by(records.iter().map(|r| r.officer.clone())),
            trend: monthly_trend(records.iter().copied()),
        }
    }
}

/// Groups equal keys, most frequent first. Ties keep first-appearance order.
pub fn count_by<K, I>(keys: I) -> Vec<Tally<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut tallies: Vec<Tally<K>> = Vec::new();
    let mut positions: HashMap<K, usize> = HashMap::new();

    for key in keys {
        match positions.get(&key).copied() {
            Some(i) => tallies[i].count += 1,
            None => {
                positions.insert(key.clone(), tallies.len());
                tallies.push(Tally { key, count: 1 });
            }
        }
    }

    // stable: equal counts stay in first-seen order
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

/// Total cases divided by the number of distinct officers they name.
pub fn avg_cases_per_officer<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut total = 0usize;
    let mut officers = HashSet::new();
    for record in records {
        total += 1;
        officers.insert(record.officer.as_str());
    }
    if officers.is_empty() {
        0.0
    } else {
        total as f64 / officers.len() as f64
    }
}

/// Counts per (month, crime type), ordered by month then crime type label.
pub fn monthly_trend<'a, I>(records: I) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a CaseRecord>,
{
    let mut buckets: BTreeMap<(String, &'static str), (CrimeType, usize)> = BTreeMap::new();
    for record in records {
        let month = record.incident_date.format("%Y-%m").to_string();
        buckets
            .entry((month, record.crime_type.label()))
            .or_insert((record.crime_type, 0))
            .1 += 1;
    }
    buckets
        .into_iter()
        .map(|((month, _), (crime_type, count))| TrendPoint {
            month,
            crime_type,
            count,
        })
        .collect()
}
