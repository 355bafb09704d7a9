//! Constants used throughout the symptom core crate.
//!
//! Default bounds, fallback values and the fixed phrase lists live here so the validator,
//! normaliser and screens agree on them.

/// Default minimum trimmed length of a symptom description, in characters.
pub const DEFAULT_MIN_SYMPTOM_LENGTH: usize = 10;

/// Default maximum trimmed length of a symptom description, in characters.
pub const DEFAULT_MAX_SYMPTOM_LENGTH: usize = 1000;

/// Default youngest accepted age, in years.
pub const DEFAULT_MIN_AGE: f64 = 1.0;

/// Default oldest accepted age, in years.
pub const DEFAULT_MAX_AGE: f64 = 120.0;

/// Confidence shown when the model reported none.
pub const DEFAULT_CONFIDENCE_PERCENT: u8 = 75;

/// Ceiling applied to confidence values that arrive scaled by 100.
pub const MAX_SCALED_CONFIDENCE_PERCENT: u8 = 95;

/// Divisor applied to confidence values above 100.
pub const CONFIDENCE_SCALE_DIVISOR: f64 = 100.0;

/// Urgency score assumed when the model reported none.
pub const DEFAULT_URGENCY_SCORE: f64 = 5.0;

/// Severity score assumed when no severity word is found in free text.
pub const DEFAULT_SEVERITY_SCORE: u8 = 5;

/// Default cap on the number of entities shown.
pub const DEFAULT_MAX_ENTITIES: usize = 10;

/// Self-harm phrases matched case-insensitively as substrings.
pub const SELF_HARM_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "self harm",
    "self-harm",
    "hurt myself",
];

/// Message appended to a verdict when self-harm content is detected.
pub const CRISIS_RESPONSE_MESSAGE: &str = "If you are having thoughts of self-harm, please contact \
    emergency services (911) or the 988 Suicide & Crisis Lifeline immediately.";

/// Severity words and their 1-10 score, in priority order. First match wins.
pub const SEVERITY_KEYWORD_SCORES: &[(&str, u8)] = &[
    ("low", 2),
    ("mild", 3),
    ("moderate", 5),
    ("medium", 5),
    ("significant", 7),
    ("high", 8),
    ("severe", 9),
    ("critical", 10),
    ("life-threatening", 10),
];

/// Symptom phrases that indicate a possible medical emergency.
pub const RED_FLAG_PHRASES: &[&str] = &[
    "chest pain",
    "difficulty breathing",
    "can't breathe",
    "severe headache",
    "loss of consciousness",
    "unconscious",
    "severe bleeding",
    "poisoning",
    "overdose",
    "severe allergic reaction",
    "anaphylaxis",
    "stroke symptoms",
    "heart attack",
    "severe abdominal pain",
];

/// Intensity words that raise the emergency score by half a point each.
pub const INTENSITY_WORDS: &[&str] = &["severe", "intense", "excruciating", "unbearable", "sudden"];

/// Emergency services number.
pub const EMERGENCY_NUMBER: &str = "911";

/// Poison control hotline.
pub const POISON_CONTROL_NUMBER: &str = "1-800-222-1222";

/// Crisis text line instruction.
pub const CRISIS_TEXT_LINE: &str = "Text HOME to 741741";
