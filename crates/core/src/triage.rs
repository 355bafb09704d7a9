//! Severity triage helpers.
//!
//! Small pure mappings used around the normaliser: scoring free text for severity words,
//! converting triage levels to severities, producing the advice shown for each severity,
//! summarising how past severity and urgency scores are moving, and turning two such trends
//! into a progression outlook.

use crate::constants::{DEFAULT_SEVERITY_SCORE, SEVERITY_KEYWORD_SCORES};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use symptom_types::{Severity, SeverityLevel};

/// Whole-word, case-insensitive pattern per severity keyword, in priority order.
///
/// Keywords are escaped before compiling, so every entry compiles.
static SEVERITY_KEYWORD_PATTERNS: LazyLock<Vec<(Regex, u8)>> = LazyLock::new(|| {
    SEVERITY_KEYWORD_SCORES
        .iter()
        .filter_map(|(word, score)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
            Regex::new(&pattern).ok().map(|regex| (regex, *score))
        })
        .collect()
});

/// Trend changes smaller than this are reported as stable.
const TREND_THRESHOLD: f64 = 0.3;

/// Number of most recent entries averaged as "recent".
const TREND_RECENT_WINDOW: usize = 3;

/// Score free text for severity on a 1-10 scale.
///
/// Severity words are checked in priority order (low, mild, moderate, medium, significant,
/// high, severe, critical, life-threatening) as whole words, case-insensitively. The first
/// word found decides the score. Text with none of them scores 5.
pub fn severity_score_from_text(text: &str) -> u8 {
    SEVERITY_KEYWORD_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_SEVERITY_SCORE)
}

/// Canonical severity implied by the severity words in free text.
pub fn severity_from_text(text: &str) -> SeverityLevel {
    SeverityLevel::from_score(i64::from(severity_score_from_text(text)))
}

/// Map a triage level label onto a severity. Unknown labels give Medium.
pub fn severity_from_triage_level(level: &str) -> SeverityLevel {
    match level.trim().to_lowercase().as_str() {
        "emergency" => SeverityLevel::Critical,
        "urgent" => SeverityLevel::High,
        "semi_urgent" => SeverityLevel::Medium,
        "routine" | "self_care" => SeverityLevel::Low,
        _ => SeverityLevel::Medium,
    }
}

/// Advice attached to a normalised severity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriageGuidance {
    pub severity: Severity,
    pub when_to_seek_help: String,
    pub recommendations: Vec<String>,
}

/// Build the guidance shown alongside a severity.
///
/// Unrecognised severities get the same guidance as Medium.
pub fn guidance_for(severity: &Severity) -> TriageGuidance {
    let level = severity.level().unwrap_or(SeverityLevel::Medium);

    let when_to_seek_help = match level {
        SeverityLevel::Critical => "Seek immediate medical attention or emergency care.",
        SeverityLevel::High => "Seek prompt medical attention within 24-48 hours.",
        SeverityLevel::Low | SeverityLevel::Medium => {
            "Seek medical attention if your symptoms worsen or do not improve within a few days."
        }
    };

    let mut recommendations = vec![
        "Monitor your symptoms closely",
        "Keep a record of your symptoms including timing and triggers",
        "Maintain proper hydration and rest",
    ];
    recommendations.push(match level {
        SeverityLevel::High | SeverityLevel::Critical => "Seek prompt medical attention",
        SeverityLevel::Low | SeverityLevel::Medium => {
            "Consult with a healthcare professional if symptoms persist or worsen"
        }
    });

    TriageGuidance {
        severity: severity.clone(),
        when_to_seek_help: when_to_seek_help.to_owned(),
        recommendations: recommendations.into_iter().map(str::to_owned).collect(),
    }
}

/// Direction of travel across a sequence of severities.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "trend", rename_all = "snake_case")]
pub enum SeverityTrend {
    InsufficientData,
    Worsening { change: f64 },
    Improving { change: f64 },
    Stable { change: f64 },
}

/// Summarise a chronological sequence of severities, oldest first.
///
/// Severities are compared by rank (Low = 1 through Critical = 4). See [`score_trend`].
pub fn severity_trend(levels: &[SeverityLevel]) -> SeverityTrend {
    let ranks: Vec<f64> = levels.iter().map(|l| f64::from(l.rank())).collect();
    score_trend(&ranks)
}

/// Summarise a chronological sequence of numeric scores, oldest first.
///
/// The mean of the last three entries is compared with the mean of everything before them
/// (or with the first entry when there are three or fewer). A difference beyond 0.3 either
/// way is reported as worsening or improving. Used for urgency scores as well as severity
/// ranks.
pub fn score_trend(scores: &[f64]) -> SeverityTrend {
    if scores.len() < 2 {
        return SeverityTrend::InsufficientData;
    }

    let split = scores.len().saturating_sub(TREND_RECENT_WINDOW);
    let recent = mean(&scores[split..]);
    let older = if scores.len() > TREND_RECENT_WINDOW {
        mean(&scores[..split])
    } else {
        scores[0]
    };

    if recent > older + TREND_THRESHOLD {
        SeverityTrend::Worsening {
            change: recent - older,
        }
    } else if recent < older - TREND_THRESHOLD {
        SeverityTrend::Improving {
            change: older - recent,
        }
    } else {
        SeverityTrend::Stable {
            change: (recent - older).abs(),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

impl SeverityTrend {
    fn is_worsening(&self) -> bool {
        matches!(self, SeverityTrend::Worsening { .. })
    }

    fn is_improving(&self) -> bool {
        matches!(self, SeverityTrend::Improving { .. })
    }
}

/// Expected direction of a symptom course.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlook {
    Deteriorating,
    Improving,
    Stable,
}

/// Short-term outlook derived from severity and urgency trends.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionPrediction {
    pub prediction: Outlook,
    pub message: &'static str,
    pub confidence: f64,
    pub recommended_action: &'static str,
}

/// Predict how symptoms will progress from the severity and urgency trends.
///
/// Both worsening gives deteriorating, both improving gives improving; any other
/// combination, insufficient data included, is stable.
pub fn predict_progression(
    severity: &SeverityTrend,
    urgency: &SeverityTrend,
) -> ProgressionPrediction {
    if severity.is_worsening() && urgency.is_worsening() {
        ProgressionPrediction {
            prediction: Outlook::Deteriorating,
            message: "Symptoms may continue to worsen. Recommend medical consultation.",
            confidence: 0.75,
            recommended_action: "Schedule medical appointment within 1-2 days",
        }
    } else if severity.is_improving() && urgency.is_improving() {
        ProgressionPrediction {
            prediction: Outlook::Improving,
            message: "Symptoms appear to be improving. Continue current care.",
            confidence: 0.70,
            recommended_action: "Continue monitoring and current care plan",
        }
    } else {
        ProgressionPrediction {
            prediction: Outlook::Stable,
            message: "Symptoms appear stable. Monitor for changes.",
            confidence: 0.60,
            recommended_action: "Continue monitoring symptoms",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symptom_types::SeverityLevel::{Critical, High, Low, Medium};

    #[test]
    fn text_score_uses_first_keyword_in_priority_order() {
        assert_eq!(severity_score_from_text("a mild but severe cough"), 3);
        assert_eq!(severity_score_from_text("SEVERE chest pain"), 9);
        assert_eq!(severity_score_from_text("possibly life-threatening bleeding"), 10);
        assert_eq!(severity_score_from_text("a runny nose"), 5);
    }

    #[test]
    fn every_keyword_has_a_pattern() {
        assert_eq!(SEVERITY_KEYWORD_PATTERNS.len(), SEVERITY_KEYWORD_SCORES.len());
    }

    #[test]
    fn text_score_matches_whole_words_only() {
        // "below" and "highlight" contain keywords but are not severity words.
        assert_eq!(severity_score_from_text("pain below the ribs"), 5);
        assert_eq!(severity_score_from_text("the highlight of my week"), 5);
    }

    #[test]
    fn text_severity_follows_score_bands() {
        assert_eq!(severity_from_text("mild rash"), Low);
        assert_eq!(severity_from_text("moderate fever"), Medium);
        assert_eq!(severity_from_text("significant swelling"), High);
        assert_eq!(severity_from_text("critical condition"), Critical);
    }

    #[test]
    fn triage_levels_map_to_severity() {
        assert_eq!(severity_from_triage_level("emergency"), Critical);
        assert_eq!(severity_from_triage_level("urgent"), High);
        assert_eq!(severity_from_triage_level("semi_urgent"), Medium);
        assert_eq!(severity_from_triage_level("routine"), Low);
        assert_eq!(severity_from_triage_level("SELF_CARE"), Low);
        assert_eq!(severity_from_triage_level("unknown"), Medium);
    }

    #[test]
    fn guidance_escalates_with_severity() {
        let critical = guidance_for(&Severity::Level(Critical));
        assert_eq!(
            critical.when_to_seek_help,
            "Seek immediate medical attention or emergency care."
        );
        assert_eq!(
            critical.recommendations.last().map(String::as_str),
            Some("Seek prompt medical attention")
        );

        let high = guidance_for(&Severity::Level(High));
        assert!(high.when_to_seek_help.contains("24-48 hours"));

        let low = guidance_for(&Severity::Level(Low));
        assert!(low.when_to_seek_help.contains("within a few days"));
        assert_eq!(low.recommendations.len(), 4);
    }

    #[test]
    fn unrecognised_severity_gets_medium_guidance() {
        let odd = guidance_for(&Severity::Unrecognised("spicy".into()));
        let medium = guidance_for(&Severity::Level(Medium));
        assert_eq!(odd.severity.to_string(), "spicy");
        assert_eq!(odd.when_to_seek_help, medium.when_to_seek_help);
        assert_eq!(odd.recommendations, medium.recommendations);
    }

    #[test]
    fn trend_needs_two_entries() {
        assert_eq!(severity_trend(&[]), SeverityTrend::InsufficientData);
        assert_eq!(severity_trend(&[High]), SeverityTrend::InsufficientData);
    }

    #[test]
    fn short_history_compares_with_first_entry() {
        // recent = mean(Low, High, High) = 7/3, older = 1
        match severity_trend(&[Low, High, High]) {
            SeverityTrend::Worsening { change } => assert!((change - 4.0 / 3.0).abs() < 1e-9),
            other => panic!("expected worsening, got {other:?}"),
        }
    }

    #[test]
    fn long_history_compares_recent_with_older_mean() {
        let levels = [Critical, Critical, High, Low, Low, Medium];
        // older = mean(4, 4, 3) = 11/3, recent = mean(1, 1, 2) = 4/3
        match severity_trend(&levels) {
            SeverityTrend::Improving { change } => assert!((change - 7.0 / 3.0).abs() < 1e-9),
            other => panic!("expected improving, got {other:?}"),
        }
    }

    #[test]
    fn small_changes_are_stable() {
        assert_eq!(
            severity_trend(&[Medium, Medium, Medium, Medium]),
            SeverityTrend::Stable { change: 0.0 }
        );
    }

    #[test]
    fn urgency_scores_use_the_same_trend_rule() {
        // recent = mean(6, 8, 9) = 23/3, older = mean(2, 3) = 2.5
        match score_trend(&[2.0, 3.0, 6.0, 8.0, 9.0]) {
            SeverityTrend::Worsening { change } => {
                assert!((change - (23.0 / 3.0 - 2.5)).abs() < 1e-9)
            }
            other => panic!("expected worsening, got {other:?}"),
        }
        assert_eq!(score_trend(&[4.0]), SeverityTrend::InsufficientData);
    }

    #[test]
    fn both_trends_worsening_is_deteriorating() {
        let prediction = predict_progression(
            &severity_trend(&[Low, High, Critical]),
            &score_trend(&[2.0, 5.0, 9.0]),
        );
        assert_eq!(prediction.prediction, Outlook::Deteriorating);
        assert_eq!(prediction.confidence, 0.75);
        assert_eq!(
            prediction.recommended_action,
            "Schedule medical appointment within 1-2 days"
        );
    }

    #[test]
    fn both_trends_improving_is_improving() {
        let prediction = predict_progression(
            &SeverityTrend::Improving { change: 1.0 },
            &SeverityTrend::Improving { change: 0.5 },
        );
        assert_eq!(prediction.prediction, Outlook::Improving);
        assert_eq!(prediction.confidence, 0.70);
        assert_eq!(
            prediction.message,
            "Symptoms appear to be improving. Continue current care."
        );
    }

    #[test]
    fn mixed_or_missing_trends_are_stable() {
        let cases = [
            (
                SeverityTrend::Worsening { change: 1.0 },
                SeverityTrend::Improving { change: 1.0 },
            ),
            (
                SeverityTrend::Improving { change: 1.0 },
                SeverityTrend::Stable { change: 0.0 },
            ),
            (SeverityTrend::InsufficientData, SeverityTrend::InsufficientData),
        ];
        for (severity, urgency) in cases {
            let prediction = predict_progression(&severity, &urgency);
            assert_eq!(prediction.prediction, Outlook::Stable, "{severity:?} {urgency:?}");
            assert_eq!(prediction.confidence, 0.60);
            assert_eq!(prediction.recommended_action, "Continue monitoring symptoms");
        }
    }

    #[test]
    fn prediction_serialises_in_camel_case() {
        let json = serde_json::to_value(predict_progression(
            &SeverityTrend::InsufficientData,
            &SeverityTrend::InsufficientData,
        ))
        .expect("serialise");
        assert_eq!(json["prediction"], serde_json::json!("stable"));
        assert_eq!(
            json["recommendedAction"],
            serde_json::json!("Continue monitoring symptoms")
        );
    }

    #[test]
    fn trend_serialises_with_tag() {
        let json = serde_json::to_value(SeverityTrend::Stable { change: 0.0 }).expect("serialise");
        assert_eq!(json, serde_json::json!({"trend": "stable", "change": 0.0}));
    }
}
