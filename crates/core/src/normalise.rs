//! Normalisation of raw analysis output for display.
//!
//! Model output arrives in several shapes: confidence as a fraction, a percentage or a value
//! scaled by 100; severity as free text; urgency as a number or missing; entities as a list of
//! anything. The functions here map each field onto a bounded, canonical form.
//!
//! Every function is total: unrecognised input degrades to a documented default instead of
//! returning an error.

use crate::config::NormaliserConfig;
use crate::constants::{
    CONFIDENCE_SCALE_DIVISOR, DEFAULT_CONFIDENCE_PERCENT, DEFAULT_URGENCY_SCORE,
    MAX_SCALED_CONFIDENCE_PERCENT,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use symptom_types::{ConfidencePercent, Severity, SeverityLevel, UrgencyTier};

/// Raw analysis output from the model collaborator.
///
/// Every field is optional and untyped. snake_case names used by older backends are accepted.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysisResult {
    #[serde(default)]
    pub confidence: Value,
    #[serde(default)]
    pub severity: Value,
    #[serde(default, alias = "urgency_score")]
    pub urgency_score: Value,
    #[serde(default, alias = "entities_extracted")]
    pub entities: Value,
}

/// Analysis output in canonical display form.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalisedAnalysisResult {
    pub confidence_percent: ConfidencePercent,
    /// One of Low, Medium, High, Critical, or an unrecognised label passed through verbatim.
    pub severity_level: Severity,
    pub urgency_color_class: UrgencyTier,
    pub entities: Vec<String>,
}

/// Applies all field normalisers with a configured entity cap.
#[derive(Clone, Debug, Default)]
pub struct ResultNormaliser {
    config: NormaliserConfig,
}

impl ResultNormaliser {
    pub fn new(config: NormaliserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormaliserConfig {
        &self.config
    }

    pub fn normalise(&self, raw: &RawAnalysisResult) -> NormalisedAnalysisResult {
        NormalisedAnalysisResult {
            confidence_percent: normalise_confidence_value(&raw.confidence),
            severity_level: normalise_severity_value(&raw.severity),
            urgency_color_class: urgency_tier_value(&raw.urgency_score),
            entities: format_entities(&raw.entities, self.config.max_entities()),
        }
    }
}

// ============================================================================
// Confidence
// ============================================================================

/// Normalise a model confidence into an integer percentage.
///
/// - `None` or NaN gives the default of 75%.
/// - Values above 100 are assumed to be scaled by 100 (8500 means 85.00%): they are divided by
///   100, rounded, and capped at 95 so an overflowing value never displays as certain.
/// - Everything else is clamped to `[0, 100]` and rounded.
pub fn normalise_confidence(raw: Option<f64>) -> ConfidencePercent {
    let Some(raw) = raw.filter(|r| !r.is_nan()) else {
        return ConfidencePercent::saturating(DEFAULT_CONFIDENCE_PERCENT);
    };

    let percent = if raw > 100.0 {
        (raw / CONFIDENCE_SCALE_DIVISOR)
            .round()
            .min(f64::from(MAX_SCALED_CONFIDENCE_PERCENT))
    } else {
        raw.clamp(0.0, 100.0).round()
    };

    // In [0, 100] on both branches.
    ConfidencePercent::saturating(percent as u8)
}

/// Normalise a confidence from a raw JSON value.
///
/// Numbers and numeric strings (optionally ending in `%`) are accepted; anything else gives
/// the default.
pub fn normalise_confidence_value(raw: &Value) -> ConfidencePercent {
    let number = coerce_number(raw);
    if number.is_none() && !raw.is_null() {
        tracing::debug!("non-numeric confidence from model; using default");
    }
    normalise_confidence(number)
}

// ============================================================================
// Severity
// ============================================================================

/// Normalise a model severity label.
///
/// Missing or empty labels give Medium. Known words are mapped through the synonym table
/// case-insensitively, without trimming. Unknown words, padded ones included, are returned
/// unchanged as [`Severity::Unrecognised`], so callers must handle labels outside the
/// canonical four.
pub fn normalise_severity(raw: Option<&str>) -> Severity {
    match raw {
        Some(label) if !label.is_empty() => Severity::from_label(label),
        _ => Severity::Level(SeverityLevel::Medium),
    }
}

/// Normalise a severity from a raw JSON value.
///
/// Strings go through [`normalise_severity`]. Integers are read as a 1-10 severity score.
/// Everything else gives Medium.
pub fn normalise_severity_value(raw: &Value) -> Severity {
    match raw {
        Value::String(label) => normalise_severity(Some(label.as_str())),
        Value::Number(n) => {
            let level = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(SeverityLevel::from_score)
                .unwrap_or(SeverityLevel::Medium);
            Severity::Level(level)
        }
        _ => Severity::Level(SeverityLevel::Medium),
    }
}

// ============================================================================
// Urgency
// ============================================================================

/// Map an urgency score onto a colour tier. Missing or NaN scores use the default score of 5.
pub fn urgency_tier(score: Option<f64>) -> UrgencyTier {
    let score = score
        .filter(|s| !s.is_nan())
        .unwrap_or(DEFAULT_URGENCY_SCORE);
    UrgencyTier::from_score(score)
}

pub fn urgency_tier_value(score: &Value) -> UrgencyTier {
    urgency_tier(coerce_number(score))
}

// ============================================================================
// Entities
// ============================================================================

/// Clean up an entity list for display.
///
/// Non-list input gives an empty list. String entries are kept in input order and the first
/// `max_count` of them are taken; each is then trimmed and empty results are dropped. The cap
/// is applied before trimming, so blank strings still use up a slot.
pub fn format_entities(entities: &Value, max_count: usize) -> Vec<String> {
    let Some(items) = entities.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_str)
        .take(max_count)
        .map(str::trim)
        .filter(|entity| !entity.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Read a number out of a JSON number or numeric string.
fn coerce_number(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            let s = s.strip_suffix('%').unwrap_or(s).trim_end();
            s.parse::<f64>().ok().filter(|f| !f.is_nan())
        }
        _ => None,
    }
}
