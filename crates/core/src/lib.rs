//! # Symptom Core
//!
//! Validation and normalisation logic for the symptom checker.
//!
//! This crate contains pure, synchronous transforms only:
//! - Symptom text and age validation with crisis-content interception
//! - Normalisation of raw model output (confidence, severity, urgency, entities)
//! - Triage helpers and the red-flag emergency screen
//!
//! **No API concerns**: HTTP servers and CLI parsing belong in `api-rest` and `symptom-cli`.
//! **No I/O**: nothing here reads the environment, touches files or talks to a model.

pub mod config;
pub mod constants;
pub mod crisis;
pub mod emergency;
mod error;
pub mod normalise;
pub mod triage;
pub mod validation;

pub use config::{EngineConfig, EnvValues, NormaliserConfig, ValidatorConfig};
pub use crisis::{CrisisMatcher, CrisisScreen, PatternMatcher, PhraseMatcher};
pub use emergency::{assess_emergency, AssessmentLevel, EmergencyAssessment};
pub use error::{CoreError, CoreResult, ValidationIssue};
pub use normalise::{
    format_entities, normalise_confidence, normalise_severity, urgency_tier,
    NormalisedAnalysisResult, RawAnalysisResult, ResultNormaliser,
};
pub use triage::{
    guidance_for, predict_progression, score_trend, severity_trend, Outlook,
    ProgressionPrediction, SeverityTrend, TriageGuidance,
};
pub use validation::{
    sanitise, validate, validate_age, InputValidator, SubmissionVerdict, SymptomInput,
    ValidationVerdict,
};

pub use symptom_types::{ConfidencePercent, Severity, SeverityLevel, UrgencyTier};

/// Validator and normaliser built from one [`EngineConfig`].
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Default)]
pub struct SymptomEngine {
    validator: InputValidator,
    normaliser: ResultNormaliser,
}

impl SymptomEngine {
    /// Creates a new engine from resolved configuration.
    ///
    /// The crisis screen is the built-in self-harm phrase list plus any extra phrases from the
    /// configuration.
    pub fn new(cfg: EngineConfig) -> Self {
        let crisis = cfg
            .extra_crisis_phrases
            .iter()
            .fold(CrisisScreen::builtin(), |screen, phrase| {
                screen.with_phrase(phrase)
            });

        tracing::debug!(
            crisis_rules = crisis.len(),
            min_length = cfg.validator.min_length(),
            max_length = cfg.validator.max_length(),
            max_entities = cfg.normaliser.max_entities(),
            "symptom engine configured"
        );

        Self {
            validator: InputValidator::new(cfg.validator, crisis),
            normaliser: ResultNormaliser::new(cfg.normaliser),
        }
    }

    pub fn validator(&self) -> &InputValidator {
        &self.validator
    }

    pub fn normaliser(&self) -> &ResultNormaliser {
        &self.normaliser
    }

    /// Validate a raw submission. See [`InputValidator::validate_submission`].
    pub fn check_submission(&self, input: &SymptomInput) -> SubmissionVerdict {
        self.validator.validate_submission(input)
    }

    /// Normalise raw model output. See [`ResultNormaliser::normalise`].
    pub fn normalise(&self, raw: &RawAnalysisResult) -> NormalisedAnalysisResult {
        self.normaliser.normalise(raw)
    }
}
