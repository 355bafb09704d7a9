//! Canonical display types shared by the symptom engine crates.
//!
//! These are closed enumerations (plus one passthrough wrapper) that the normaliser maps raw
//! model output into. They carry no behaviour beyond lookup tables and formatting.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing canonical labels strictly.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LevelParseError {
    /// The input was not one of Low, Medium, High, Critical.
    #[error("unknown severity level: {0}")]
    UnknownSeverity(String),
    /// The input was not one of green, yellow, orange, red.
    #[error("unknown urgency tier: {0}")]
    UnknownUrgencyTier(String),
    /// The input was not an integer percentage in 0..=100.
    #[error("invalid confidence percentage: {0}")]
    InvalidConfidence(String),
}

// ============================================================================
// Severity
// ============================================================================

/// Canonical clinical severity tier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    /// Every level, lowest first.
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::Low,
        SeverityLevel::Medium,
        SeverityLevel::High,
        SeverityLevel::Critical,
    ];

    /// Returns the display label.
    pub const fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::Low => "Low",
            SeverityLevel::Medium => "Medium",
            SeverityLevel::High => "High",
            SeverityLevel::Critical => "Critical",
        }
    }

    /// Looks up a model-emitted severity word in the synonym table.
    ///
    /// The lookup is case-insensitive but otherwise exact: surrounding whitespace is not
    /// stripped. Returns `None` for words outside the table; the caller decides whether that
    /// means passthrough or a default.
    pub fn from_synonym(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "low" | "mild" | "light" => Some(SeverityLevel::Low),
            "medium" | "moderate" => Some(SeverityLevel::Medium),
            "high" | "severe" => Some(SeverityLevel::High),
            "critical" | "emergency" => Some(SeverityLevel::Critical),
            _ => None,
        }
    }

    /// Maps a 1-10 severity score onto a level.
    ///
    /// 1-3 Low, 4-6 Medium, 7-8 High, 9-10 Critical. Scores outside 1-10 are Medium.
    pub const fn from_score(score: i64) -> Self {
        match score {
            1..=3 => SeverityLevel::Low,
            4..=6 => SeverityLevel::Medium,
            7..=8 => SeverityLevel::High,
            9..=10 => SeverityLevel::Critical,
            _ => SeverityLevel::Medium,
        }
    }

    /// Ordinal rank used for averaging, Low = 1 through Critical = 4.
    pub const fn rank(self) -> u8 {
        match self {
            SeverityLevel::Low => 1,
            SeverityLevel::Medium => 2,
            SeverityLevel::High => 3,
            SeverityLevel::Critical => 4,
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = LevelParseError;

    /// Strict parse of a canonical label (case-insensitive). Synonyms are not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeverityLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LevelParseError::UnknownSeverity(s.to_owned()))
    }
}

/// A normalised severity as shown to the user.
///
/// Recognised words collapse onto a [`SeverityLevel`]. Unrecognised words are carried through
/// verbatim: the normaliser does not force unknown model vocabulary into the closed set, so
/// consumers must be prepared for [`Severity::Unrecognised`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Level(SeverityLevel),
    Unrecognised(String),
}

impl Severity {
    /// Builds a severity from a label, passing unknown labels through unchanged.
    pub fn from_label(label: &str) -> Self {
        match SeverityLevel::from_synonym(label) {
            Some(level) => Severity::Level(level),
            None => Severity::Unrecognised(label.to_owned()),
        }
    }

    /// The canonical level, if the label was recognised.
    pub fn level(&self) -> Option<SeverityLevel> {
        match self {
            Severity::Level(level) => Some(*level),
            Severity::Unrecognised(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Level(level) => level.as_str(),
            Severity::Unrecognised(raw) => raw,
        }
    }
}

impl From<SeverityLevel> for Severity {
    fn from(level: SeverityLevel) -> Self {
        Severity::Level(level)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Severity::from_label(&s))
    }
}

// ============================================================================
// Urgency
// ============================================================================

/// Colour tier used to emphasise urgency in the UI.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Green,
    Yellow,
    Orange,
    Red,
}

impl UrgencyTier {
    /// Maps an urgency score onto a tier.
    ///
    /// Boundaries are inclusive on the lower tier: 3 is green, 6 is yellow, 8 is orange.
    /// NaN compares false against every boundary and lands in red.
    pub fn from_score(score: f64) -> Self {
        if score <= 3.0 {
            UrgencyTier::Green
        } else if score <= 6.0 {
            UrgencyTier::Yellow
        } else if score <= 8.0 {
            UrgencyTier::Orange
        } else {
            UrgencyTier::Red
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            UrgencyTier::Green => "green",
            UrgencyTier::Yellow => "yellow",
            UrgencyTier::Orange => "orange",
            UrgencyTier::Red => "red",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UrgencyTier {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(UrgencyTier::Green),
            "yellow" => Ok(UrgencyTier::Yellow),
            "orange" => Ok(UrgencyTier::Orange),
            "red" => Ok(UrgencyTier::Red),
            _ => Err(LevelParseError::UnknownUrgencyTier(s.to_owned())),
        }
    }
}

// ============================================================================
// Confidence
// ============================================================================

/// An integer confidence percentage in `0..=100`, displayed with a trailing `%`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfidencePercent(u8);

impl ConfidencePercent {
    /// Creates a percentage, saturating at 100.
    pub const fn saturating(value: u8) -> Self {
        if value > 100 {
            Self(100)
        } else {
            Self(value)
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ConfidencePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl FromStr for ConfidencePercent {
    type Err = LevelParseError;

    /// Parses `"85%"` or `"85"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_suffix('%').unwrap_or(digits);
        match digits.parse::<u8>() {
            Ok(value) if value <= 100 => Ok(Self(value)),
            _ => Err(LevelParseError::InvalidConfidence(s.to_owned())),
        }
    }
}

impl serde::Serialize for ConfidencePercent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ConfidencePercent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synonym_table_covers_every_word() {
        let cases = [
            ("low", SeverityLevel::Low),
            ("Mild", SeverityLevel::Low),
            ("LIGHT", SeverityLevel::Low),
            ("medium", SeverityLevel::Medium),
            ("moderate", SeverityLevel::Medium),
            ("high", SeverityLevel::High),
            ("SEVERE", SeverityLevel::High),
            ("critical", SeverityLevel::Critical),
            ("Emergency", SeverityLevel::Critical),
        ];
        for (word, expected) in cases {
            assert_eq!(SeverityLevel::from_synonym(word), Some(expected), "{word}");
        }
        assert_eq!(SeverityLevel::from_synonym("weird-value"), None);
    }

    #[test]
    fn padded_label_is_not_a_synonym() {
        assert_eq!(SeverityLevel::from_synonym(" Severe "), None);
        assert_eq!(
            Severity::from_label(" Severe "),
            Severity::Unrecognised(" Severe ".into())
        );
    }

    #[test]
    fn unrecognised_label_is_passed_through_verbatim() {
        let severity = Severity::from_label("Weird-Value");
        assert_eq!(severity, Severity::Unrecognised("Weird-Value".into()));
        assert_eq!(severity.to_string(), "Weird-Value");
        assert_eq!(severity.level(), None);
    }

    #[test]
    fn score_bands_match_original_table() {
        assert_eq!(SeverityLevel::from_score(1), SeverityLevel::Low);
        assert_eq!(SeverityLevel::from_score(3), SeverityLevel::Low);
        assert_eq!(SeverityLevel::from_score(4), SeverityLevel::Medium);
        assert_eq!(SeverityLevel::from_score(6), SeverityLevel::Medium);
        assert_eq!(SeverityLevel::from_score(7), SeverityLevel::High);
        assert_eq!(SeverityLevel::from_score(8), SeverityLevel::High);
        assert_eq!(SeverityLevel::from_score(9), SeverityLevel::Critical);
        assert_eq!(SeverityLevel::from_score(10), SeverityLevel::Critical);
        assert_eq!(SeverityLevel::from_score(0), SeverityLevel::Medium);
        assert_eq!(SeverityLevel::from_score(11), SeverityLevel::Medium);
    }

    #[test]
    fn strict_parse_rejects_synonyms() {
        assert_eq!("high".parse::<SeverityLevel>(), Ok(SeverityLevel::High));
        assert!(matches!(
            "severe".parse::<SeverityLevel>(),
            Err(LevelParseError::UnknownSeverity(_))
        ));
    }

    #[test]
    fn urgency_boundaries_are_inclusive_on_lower_tier() {
        assert_eq!(UrgencyTier::from_score(3.0), UrgencyTier::Green);
        assert_eq!(UrgencyTier::from_score(3.01), UrgencyTier::Yellow);
        assert_eq!(UrgencyTier::from_score(6.0), UrgencyTier::Yellow);
        assert_eq!(UrgencyTier::from_score(8.0), UrgencyTier::Orange);
        assert_eq!(UrgencyTier::from_score(9.0), UrgencyTier::Red);
        assert_eq!(UrgencyTier::from_score(-4.0), UrgencyTier::Green);
    }

    #[test]
    fn confidence_serialises_with_percent_sign() {
        let json = serde_json::to_string(&ConfidencePercent::saturating(85)).expect("serialise");
        assert_eq!(json, "\"85%\"");

        let parsed: ConfidencePercent = serde_json::from_str("\"42%\"").expect("deserialise");
        assert_eq!(parsed.value(), 42);

        assert_eq!(ConfidencePercent::saturating(250).value(), 100);
        assert!("101%".parse::<ConfidencePercent>().is_err());
    }

    #[test]
    fn severity_serialises_as_plain_string() {
        let json = serde_json::to_string(&Severity::Level(SeverityLevel::Critical))
            .expect("serialise");
        assert_eq!(json, "\"Critical\"");

        let parsed: Severity = serde_json::from_str("\"moderate\"").expect("deserialise");
        assert_eq!(parsed, Severity::Level(SeverityLevel::Medium));
    }
}
