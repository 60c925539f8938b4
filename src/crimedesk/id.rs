//! # Case Identifiers
//!
//! Every case gets an id of the form `CASE-<YYYYMMDD>-<XXXXXX>`: the
//! registration date followed by six uppercase alphanumerics taken from a
//! random v4 UUID.
//!
//! Uniqueness is probabilistic, so [`generate_unique`] draws a bounded number
//! of candidates and takes the first one the caller does not already know.

use crate::error::{DeskError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const ID_PREFIX: &str = "CASE";
pub const SUFFIX_LEN: usize = 6;
/// Candidates drawn before registration gives up with `IdExhausted`.
pub const MAX_ID_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CaseId(String);

impl CaseId {
    pub fn new(date: NaiveDate, suffix: &str) -> Result<Self> {
        Self::parse(&format!("{}-{}-{}", ID_PREFIX, date.format("%Y%m%d"), suffix))
    }

    /// Accepts only well-formed ids: prefix, a real calendar date and a
    /// six-character uppercase alphanumeric suffix.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || DeskError::InvalidValue(format!("malformed case id '{}'", input));

        let mut parts = input.splitn(3, '-');
        let (prefix, date, suffix) = match (parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(d), Some(s)) => (p, d, s),
            _ => return Err(invalid()),
        };

        if prefix != ID_PREFIX {
            return Err(invalid());
        }
        if date.len() != 8 || NaiveDate::parse_from_str(date, "%Y%m%d").is_err() {
            return Err(invalid());
        }
        let suffix_ok = suffix.len() == SUFFIX_LEN
            && suffix
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase());
        if !suffix_ok {
            return Err(invalid());
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CaseId {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.trim())
    }
}

impl TryFrom<String> for CaseId {
    type Error = DeskError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<CaseId> for String {
    fn from(id: CaseId) -> Self {
        id.0
    }
}

/// Six uppercase characters from a fresh v4 UUID.
pub fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_uppercase()
}

/// Draws candidates from `next_suffix` until one is not `taken`.
pub fn generate_unique<T, N>(date: NaiveDate, taken: T, mut next_suffix: N) -> Result<CaseId>
where
    T: Fn(&CaseId) -> bool,
    N: FnMut() -> String,
{
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let candidate = CaseId::new(date, &next_suffix())?;
        if !taken(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(%candidate, attempt, "case id collision, drawing again");
    }
    Err(DeskError::IdExhausted(MAX_ID_ATTEMPTS))
}
