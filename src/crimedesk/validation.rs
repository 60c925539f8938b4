use crate::model::{Attachment, CrimeType};
use crate::officers::OfficerRegistry;
use std::collections::HashSet;
use std::path::Path;

pub const MIN_LOCATION_LEN: usize = 2;
pub const MIN_DESCRIPTION_LEN: usize = 10;

/// Checks the required form fields. Every rule is evaluated, so a form with
/// several problems reports all of them at once.
pub fn validate_form(
    crime_type: Option<CrimeType>,
    location: &str,
    officer: &str,
    description: &str,
) -> Vec<String> {
    let mut errors = Vec::new();

    if crime_type.is_none() {
        errors.push("Crime type is required".to_string());
    }
    if location.trim().chars().count() < MIN_LOCATION_LEN {
        errors.push(format!(
            "Location must be at least {} characters long",
            MIN_LOCATION_LEN
        ));
    }
    if officer.is_empty() {
        errors.push("Officer assignment is required".to_string());
    }
    if description.trim().chars().count() < MIN_DESCRIPTION_LEN {
        errors.push(format!(
            "Description must be at least {} characters long",
            MIN_DESCRIPTION_LEN
        ));
    }

    errors
}

/// Blank officers are already reported by [`validate_form`].
pub fn validate_assignment(officer: &str, registry: &OfficerRegistry) -> Vec<String> {
    if officer.is_empty() || registry.contains(officer) {
        Vec::new()
    } else {
        vec![format!("Officer {} is not registered", officer)]
    }
}

/// The last path component of an uploaded name; `None` when there isn't one.
pub fn stored_file_name(name: &str) -> Option<String> {
    Path::new(name.trim())
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

pub fn validate_attachments(attachments: &[Attachment], allowed_exts: &[String]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for attachment in attachments {
        let Some(name) = stored_file_name(&attachment.file_name) else {
            errors.push(format!(
                "Attachment name {} is invalid",
                attachment.file_name
            ));
            continue;
        };

        if !extension_allowed(&name, allowed_exts) {
            errors.push(format!("Attachment {} has unsupported type", name));
        }
        if !seen.insert(name.clone()) {
            errors.push(format!("Attachment {} is attached more than once", name));
        }
    }

    errors
}

fn extension_allowed(name: &str, allowed_exts: &[String]) -> bool {
    let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
        return false;
    };
    allowed_exts
        .iter()
        .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
