//! Input validation utilities.
//!
//! This module checks raw symptom submissions before they are sent for analysis:
//! - symptom text presence and trimmed length window
//! - crisis-content interception (see [`crate::crisis`])
//! - optional age coercion and range check
//! - markup-neutralising sanitisation
//!
//! Validation never fails with an error. Every rule violation is recorded as a
//! [`ValidationIssue`] and accumulated into a [`ValidationVerdict`]; the caller decides whether
//! a non-empty verdict blocks the request.

use crate::config::ValidatorConfig;
use crate::crisis::CrisisScreen;
use crate::ValidationIssue;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

static BUILTIN_SCREEN: LazyLock<CrisisScreen> = LazyLock::new(CrisisScreen::builtin);

/// Outcome of validating symptom text or an age.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    /// Human-readable messages, one per issue, in the order the rules ran.
    pub errors: Vec<String>,
    /// The typed issues behind `errors`.
    pub issues: Vec<ValidationIssue>,
    /// Whitespace-delimited token count of the trimmed text. Absent when there was no text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
}

impl ValidationVerdict {
    pub fn from_issues(issues: Vec<ValidationIssue>, word_count: Option<usize>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
            issues,
            word_count,
        }
    }

    /// A verdict with no issues and no word count.
    pub fn valid() -> Self {
        Self::from_issues(Vec::new(), None)
    }

    pub fn has_issue(&self, predicate: impl Fn(&ValidationIssue) -> bool) -> bool {
        self.issues.iter().any(predicate)
    }
}

/// A raw symptom submission as it arrives from a form or API boundary.
///
/// Both fields are kept as JSON values so that missing, null and wrongly-typed inputs can be
/// told apart and reported rather than rejected by deserialisation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SymptomInput {
    #[serde(default)]
    pub symptoms: Value,
    #[serde(default)]
    pub age: Value,
}

/// Combined text and age verdict for a submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionVerdict {
    #[serde(flatten)]
    pub verdict: ValidationVerdict,
    /// Sanitised symptom text, present whenever the text itself was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitised: Option<String>,
}

/// Validates symptom submissions against configured bounds and a crisis screen.
#[derive(Debug, Default)]
pub struct InputValidator {
    config: ValidatorConfig,
    crisis: CrisisScreen,
}

impl InputValidator {
    pub fn new(config: ValidatorConfig, crisis: CrisisScreen) -> Self {
        Self { config, crisis }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate symptom text using the configured length window.
    pub fn validate(&self, text: Option<&str>) -> ValidationVerdict {
        validate_with_screen(
            text,
            self.config.min_length(),
            self.config.max_length(),
            &self.crisis,
        )
    }

    /// Validate symptom text from a raw JSON value.
    ///
    /// Anything other than a JSON string is treated as missing.
    pub fn validate_value(&self, text: &Value) -> ValidationVerdict {
        self.validate(text.as_str())
    }

    /// Validate an optional age using the configured range.
    pub fn validate_age(&self, age: &Value) -> ValidationVerdict {
        validate_age(age, self.config.min_age(), self.config.max_age())
    }

    /// Validate text and age together.
    ///
    /// Text issues come first, then age issues. The word count and sanitised text are taken
    /// from the symptom text.
    pub fn validate_submission(&self, input: &SymptomInput) -> SubmissionVerdict {
        let text = self.validate_value(&input.symptoms);
        let age = self.validate_age(&input.age);

        let mut issues = text.issues;
        issues.extend(age.issues);

        SubmissionVerdict {
            verdict: ValidationVerdict::from_issues(issues, text.word_count),
            sanitised: present_text(input.symptoms.as_str()).map(sanitise),
        }
    }
}

/// Validate symptom text against `[min_length, max_length]` with the built-in crisis screen.
///
/// - Absent, non-string or empty text yields a single "required" issue and no word count.
/// - Otherwise the trimmed character length is checked against both bounds and the text is
///   screened for self-harm phrases. All violated rules are reported.
pub fn validate(text: Option<&str>, min_length: usize, max_length: usize) -> ValidationVerdict {
    validate_with_screen(text, min_length, max_length, &BUILTIN_SCREEN)
}

fn validate_with_screen(
    text: Option<&str>,
    min_length: usize,
    max_length: usize,
    screen: &CrisisScreen,
) -> ValidationVerdict {
    let Some(text) = present_text(text) else {
        return ValidationVerdict::from_issues(vec![ValidationIssue::MissingInput], None);
    };

    let trimmed = text.trim();
    let trimmed_length = trimmed.chars().count();
    let mut issues = Vec::new();

    if trimmed_length < min_length {
        issues.push(ValidationIssue::TooShort {
            min: min_length,
            actual: trimmed_length,
        });
    }

    if trimmed_length > max_length {
        issues.push(ValidationIssue::TooLong {
            max: max_length,
            actual: trimmed_length,
        });
    }

    if screen.is_crisis(trimmed) {
        tracing::warn!("crisis content detected in symptom submission");
        issues.push(ValidationIssue::CrisisContentDetected);
    }

    let word_count = trimmed.split_whitespace().count();
    ValidationVerdict::from_issues(issues, Some(word_count))
}

/// Validate an optional age against `[min_age, max_age]`.
///
/// Null, missing and blank-string ages are valid. Numbers and finite numeric strings are range
/// checked; anything else, `"inf"` included, is reported as not a valid number.
pub fn validate_age(age: &Value, min_age: f64, max_age: f64) -> ValidationVerdict {
    let issue = match coerce_age(age) {
        Ok(None) => None,
        Ok(Some(years)) if (min_age..=max_age).contains(&years) => None,
        Ok(Some(_)) => Some(ValidationIssue::AgeOutOfRange {
            min: min_age,
            max: max_age,
        }),
        Err(issue) => Some(issue),
    };

    ValidationVerdict::from_issues(issue.into_iter().collect(), None)
}

/// Coerce a raw age into years. `Ok(None)` means the age was not supplied.
fn coerce_age(age: &Value) -> Result<Option<f64>, ValidationIssue> {
    match age {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|years| years.is_finite())
            .map(Some)
            .ok_or(ValidationIssue::InvalidAge),
        Value::Number(n) => n.as_f64().map(Some).ok_or(ValidationIssue::InvalidAge),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => Err(ValidationIssue::InvalidAge),
    }
}

/// Neutralise trivial markup and normalise whitespace.
///
/// Removes every `<` and `>`, trims, and collapses interior whitespace runs to a single space.
/// This is not an HTML sanitiser; it only guarantees that no raw angle brackets survive.
pub fn sanitise(text: &str) -> String {
    let without_brackets: String = text.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    without_brackets
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn present_text(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
