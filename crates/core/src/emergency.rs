//! Red-flag emergency screen.
//!
//! A fast keyword pass over symptom text that runs independently of model analysis. Each
//! red-flag phrase found scores a full point; each intensity word scores half a point. One
//! point is enough for an emergency.

use crate::constants::{
    CRISIS_TEXT_LINE, EMERGENCY_NUMBER, INTENSITY_WORDS, POISON_CONTROL_NUMBER, RED_FLAG_PHRASES,
};
use serde::Serialize;
use symptom_types::UrgencyTier;

const EMERGENCY_THRESHOLD: f64 = 1.0;
const URGENT_THRESHOLD: f64 = 0.5;
const RED_FLAG_WEIGHT: f64 = 1.0;
const INTENSITY_WEIGHT: f64 = 0.5;

/// Outcome tier of the emergency screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentLevel {
    Emergency,
    Urgent,
    NonEmergency,
}

impl AssessmentLevel {
    fn from_score(score: f64) -> Self {
        if score >= EMERGENCY_THRESHOLD {
            AssessmentLevel::Emergency
        } else if score >= URGENT_THRESHOLD {
            AssessmentLevel::Urgent
        } else {
            AssessmentLevel::NonEmergency
        }
    }

    pub fn recommended_action(self) -> &'static str {
        match self {
            AssessmentLevel::Emergency => "CALL 911 IMMEDIATELY",
            AssessmentLevel::Urgent => "Seek immediate medical attention",
            AssessmentLevel::NonEmergency => "Continue with regular symptom checker",
        }
    }

    pub fn color(self) -> UrgencyTier {
        match self {
            AssessmentLevel::Emergency => UrgencyTier::Red,
            AssessmentLevel::Urgent => UrgencyTier::Orange,
            AssessmentLevel::NonEmergency => UrgencyTier::Green,
        }
    }

    pub fn immediate_steps(self) -> &'static [&'static str] {
        match self {
            AssessmentLevel::Emergency => &[
                "Call 911 immediately",
                "Stay calm and follow dispatcher instructions",
                "Do not drive yourself to hospital",
                "Have someone stay with you until help arrives",
                "Prepare list of current medications",
            ],
            AssessmentLevel::Urgent => &[
                "Seek immediate medical attention",
                "Go to emergency room or urgent care",
                "Have someone drive you if possible",
                "Bring list of medications and medical history",
                "Call ahead to medical facility if possible",
            ],
            AssessmentLevel::NonEmergency => &[
                "Continue with detailed symptom analysis",
                "Monitor symptoms closely",
                "Seek medical advice if symptoms worsen",
                "Keep record of symptom progression",
            ],
        }
    }
}

/// Numbers shown with every assessment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContacts {
    pub emergency: &'static str,
    pub poison_control: &'static str,
    pub crisis_text: &'static str,
}

impl Default for EmergencyContacts {
    fn default() -> Self {
        Self {
            emergency: EMERGENCY_NUMBER,
            poison_control: POISON_CONTROL_NUMBER,
            crisis_text: CRISIS_TEXT_LINE,
        }
    }
}

/// Result of screening symptom text for red flags.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAssessment {
    pub assessment_level: AssessmentLevel,
    pub emergency_score: f64,
    /// Red-flag phrases found, in list order.
    pub triggered_keywords: Vec<&'static str>,
    pub recommended_action: &'static str,
    pub color_code: UrgencyTier,
    pub emergency_numbers: EmergencyContacts,
    pub immediate_steps: Vec<&'static str>,
}

/// Screen symptom text for red-flag phrases and intensity words.
pub fn assess_emergency(text: &str) -> EmergencyAssessment {
    let lowered = text.to_lowercase();

    let triggered_keywords: Vec<&'static str> = RED_FLAG_PHRASES
        .iter()
        .copied()
        .filter(|phrase| lowered.contains(phrase))
        .collect();
    let intensity_hits = INTENSITY_WORDS
        .iter()
        .filter(|word| lowered.contains(*word))
        .count();

    let emergency_score = triggered_keywords.len() as f64 * RED_FLAG_WEIGHT
        + intensity_hits as f64 * INTENSITY_WEIGHT;
    let level = AssessmentLevel::from_score(emergency_score);

    if level != AssessmentLevel::NonEmergency {
        tracing::info!(
            level = ?level,
            red_flags = triggered_keywords.len(),
            "emergency screen raised"
        );
    }

    EmergencyAssessment {
        assessment_level: level,
        emergency_score,
        triggered_keywords,
        recommended_action: level.recommended_action(),
        color_code: level.color(),
        emergency_numbers: EmergencyContacts::default(),
        immediate_steps: level.immediate_steps().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn red_flag_phrase_is_an_emergency() {
        let assessment = assess_emergency("Crushing CHEST PAIN since this morning");
        assert_eq!(assessment.assessment_level, AssessmentLevel::Emergency);
        assert_eq!(assessment.triggered_keywords, vec!["chest pain"]);
        assert_eq!(assessment.recommended_action, "CALL 911 IMMEDIATELY");
        assert_eq!(assessment.color_code, UrgencyTier::Red);
        assert_eq!(assessment.immediate_steps[0], "Call 911 immediately");
    }

    #[test]
    fn intensity_word_alone_is_urgent() {
        let assessment = assess_emergency("sudden dizziness when standing");
        assert_eq!(assessment.assessment_level, AssessmentLevel::Urgent);
        assert_eq!(assessment.emergency_score, 0.5);
        assert!(assessment.triggered_keywords.is_empty());
        assert_eq!(assessment.color_code, UrgencyTier::Orange);
    }

    #[test]
    fn two_intensity_words_reach_emergency() {
        let assessment = assess_emergency("intense and unbearable back pain");
        assert_eq!(assessment.emergency_score, 1.0);
        assert_eq!(assessment.assessment_level, AssessmentLevel::Emergency);
    }

    #[test]
    fn scores_accumulate_across_phrases_and_words() {
        // "severe headache" is a red flag and "severe" is an intensity word.
        let assessment = assess_emergency("severe headache and difficulty breathing");
        assert_eq!(
            assessment.triggered_keywords,
            vec!["difficulty breathing", "severe headache"]
        );
        assert_eq!(assessment.emergency_score, 2.5);
    }

    #[test]
    fn ordinary_symptoms_are_not_an_emergency() {
        let assessment = assess_emergency("runny nose and a mild cough");
        assert_eq!(assessment.assessment_level, AssessmentLevel::NonEmergency);
        assert_eq!(assessment.emergency_score, 0.0);
        assert_eq!(assessment.color_code, UrgencyTier::Green);
        assert_eq!(assessment.emergency_numbers, EmergencyContacts::default());
        assert_eq!(
            assessment.immediate_steps,
            vec![
                "Continue with detailed symptom analysis",
                "Monitor symptoms closely",
                "Seek medical advice if symptoms worsen",
                "Keep record of symptom progression",
            ]
        );
    }

    #[test]
    fn level_serialises_in_screaming_case() {
        let json = serde_json::to_value(AssessmentLevel::NonEmergency).expect("serialise");
        assert_eq!(json, serde_json::json!("NON_EMERGENCY"));
    }
}
