use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Officer already exists: {0}")]
    DuplicateOfficer(String),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(String),

    #[error("Could not allocate a unique case id after {0} attempts")]
    IdExhausted(usize),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DeskError {
    /// Messages carried by a validation failure, empty for every other kind.
    pub fn messages(&self) -> &[String] {
        match self {
            DeskError::Validation(messages) => messages,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;
