//! Request and response bodies for the REST API.
//!
//! These mirror the core types with `utoipa` schemas attached. Raw inputs stay as untyped JSON
//! so that missing and malformed values reach the core and are reported, not rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use symptom_core::{
    EmergencyAssessment, NormalisedAnalysisResult, RawAnalysisResult, SubmissionVerdict,
    SymptomInput, TriageGuidance,
};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Raw symptom submission.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ValidateReq {
    /// Free-text symptom description. Anything other than a string is reported as missing.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub symptoms: Value,
    /// Optional age in years, as a number or numeric string.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub age: Value,
}

impl From<ValidateReq> for SymptomInput {
    fn from(req: ValidateReq) -> Self {
        SymptomInput {
            symptoms: req.symptoms,
            age: req.age,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRes {
    pub is_valid: bool,
    pub errors: Vec<String>,
    /// Machine-readable issue codes, one per entry in `errors`.
    pub issues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitised: Option<String>,
}

impl From<SubmissionVerdict> for ValidateRes {
    fn from(result: SubmissionVerdict) -> Self {
        ValidateRes {
            is_valid: result.verdict.is_valid,
            issues: result
                .verdict
                .issues
                .iter()
                .map(|issue| issue.code().to_owned())
                .collect(),
            errors: result.verdict.errors,
            word_count: result.verdict.word_count,
            sanitised: result.sanitised,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SanitiseReq {
    /// Text to sanitise. Anything other than a string is treated as empty text.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub text: Value,
}

impl SanitiseReq {
    pub fn text(&self) -> &str {
        self.text.as_str().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SanitiseRes {
    pub sanitised: String,
}

/// Raw analysis output from a model.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormaliseReq {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub confidence: Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub severity: Value,
    #[serde(default, alias = "urgency_score")]
    #[schema(value_type = Object)]
    pub urgency_score: Value,
    #[serde(default, alias = "entities_extracted")]
    #[schema(value_type = Object)]
    pub entities: Value,
}

impl From<NormaliseReq> for RawAnalysisResult {
    fn from(req: NormaliseReq) -> Self {
        RawAnalysisResult {
            confidence: req.confidence,
            severity: req.severity,
            urgency_score: req.urgency_score,
            entities: req.entities,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NormaliseRes {
    /// Integer percentage with a trailing `%`.
    pub confidence_percent: String,
    /// Low, Medium, High, Critical, or an unrecognised label passed through unchanged.
    pub severity_level: String,
    /// green, yellow, orange or red.
    pub urgency_color_class: String,
    pub entities: Vec<String>,
}

impl From<NormalisedAnalysisResult> for NormaliseRes {
    fn from(result: NormalisedAnalysisResult) -> Self {
        NormaliseRes {
            confidence_percent: result.confidence_percent.to_string(),
            severity_level: result.severity_level.to_string(),
            urgency_color_class: result.urgency_color_class.to_string(),
            entities: result.entities,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct GuidanceReq {
    /// Severity label or 1-10 score.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub severity: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceRes {
    pub severity: String,
    pub when_to_seek_help: String,
    pub recommendations: Vec<String>,
}

impl From<TriageGuidance> for GuidanceRes {
    fn from(guidance: TriageGuidance) -> Self {
        GuidanceRes {
            severity: guidance.severity.to_string(),
            when_to_seek_help: guidance.when_to_seek_help,
            recommendations: guidance.recommendations,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct EmergencyReq {
    /// Symptom text to screen. Anything other than a string is treated as empty text.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub symptoms: Value,
}

impl EmergencyReq {
    pub fn symptoms(&self) -> &str {
        self.symptoms.as_str().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyNumbers {
    pub emergency: String,
    pub poison_control: String,
    pub crisis_text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRes {
    /// EMERGENCY, URGENT or NON_EMERGENCY.
    pub assessment_level: String,
    pub emergency_score: f64,
    pub triggered_keywords: Vec<String>,
    pub recommended_action: String,
    pub color_code: String,
    pub emergency_numbers: EmergencyNumbers,
    pub immediate_steps: Vec<String>,
}

impl From<EmergencyAssessment> for EmergencyRes {
    fn from(assessment: EmergencyAssessment) -> Self {
        let level = match assessment.assessment_level {
            symptom_core::AssessmentLevel::Emergency => "EMERGENCY",
            symptom_core::AssessmentLevel::Urgent => "URGENT",
            symptom_core::AssessmentLevel::NonEmergency => "NON_EMERGENCY",
        };

        EmergencyRes {
            assessment_level: level.to_owned(),
            emergency_score: assessment.emergency_score,
            triggered_keywords: assessment
                .triggered_keywords
                .into_iter()
                .map(str::to_owned)
                .collect(),
            recommended_action: assessment.recommended_action.to_owned(),
            color_code: assessment.color_code.to_string(),
            emergency_numbers: EmergencyNumbers {
                emergency: assessment.emergency_numbers.emergency.to_owned(),
                poison_control: assessment.emergency_numbers.poison_control.to_owned(),
                crisis_text: assessment.emergency_numbers.crisis_text.to_owned(),
            },
            immediate_steps: assessment
                .immediate_steps
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}
