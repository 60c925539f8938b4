use crate::error::{DeskError, Result};

pub const DEFAULT_OFFICERS: [&str; 5] = [
    "Officer Smith",
    "Officer Johnson",
    "Officer Brown",
    "Officer Davis",
    "Officer Wilson",
];

/// Officers eligible for case assignment, in the order they were added.
///
/// The registry only grows. Records keep the name they were assigned with,
/// so a later addition never invalidates older records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficerRegistry {
    names: Vec<String>,
}

impl Default for OfficerRegistry {
    fn default() -> Self {
        Self::seeded(DEFAULT_OFFICERS)
    }
}

impl OfficerRegistry {
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Builds a registry from a seed list, silently dropping blanks and repeats.
    pub fn seeded<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::empty();
        for name in seed {
            let _ = registry.add(name.as_ref());
        }
        registry
    }

    /// Appends a name. Duplicate detection is an exact, case-sensitive match
    /// on the trimmed name.
    pub fn add(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeskError::InvalidValue(
                "officer name cannot be empty".to_string(),
            ));
        }
        if self.contains(name) {
            return Err(DeskError::DuplicateOfficer(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn list(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
