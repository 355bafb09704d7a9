use crate::constants::CRISIS_RESPONSE_MESSAGE;

/// Failures that can occur while building the engine.
///
/// Raw user text and raw model output never produce a `CoreError`; those degrade to defaults
/// or are reported as [`ValidationIssue`]s.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid value for {name}: {value:?}")]
    InvalidConfigValue { name: &'static str, value: String },
    #[error("invalid crisis pattern: {0}")]
    InvalidCrisisPattern(#[from] regex::Error),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// A single rule violation found while validating a submission.
///
/// `Display` is the user-facing message placed into a verdict's `errors` list.
#[derive(Clone, Debug, PartialEq, thiserror::Error, serde::Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    #[error("Symptoms description is required")]
    MissingInput,
    #[error("Symptoms description must be at least {min} characters long")]
    TooShort { min: usize, actual: usize },
    #[error("Symptoms description must be no more than {max} characters long")]
    TooLong { max: usize, actual: usize },
    #[error("{}", CRISIS_RESPONSE_MESSAGE)]
    CrisisContentDetected,
    #[error("Age must be a valid number")]
    InvalidAge,
    #[error("Age must be between {min} and {max}")]
    AgeOutOfRange { min: f64, max: f64 },
}

impl ValidationIssue {
    /// Stable machine-readable code, matching the serialised `kind` tag.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationIssue::MissingInput => "missingInput",
            ValidationIssue::TooShort { .. } => "tooShort",
            ValidationIssue::TooLong { .. } => "tooLong",
            ValidationIssue::CrisisContentDetected => "crisisContentDetected",
            ValidationIssue::InvalidAge => "invalidAge",
            ValidationIssue::AgeOutOfRange { .. } => "ageOutOfRange",
        }
    }
}
