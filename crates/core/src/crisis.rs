//! Crisis-content interception.
//!
//! Symptom text is screened for self-harm language before it is forwarded for analysis. A
//! match does not block the request silently: the validator appends a crisis-response message
//! pointing the user at emergency services.
//!
//! This is advisory moderation. It is a substring/pattern scan over a static list and will miss
//! rephrased language; it must never be the only safety mechanism in a deployment.

use crate::constants::SELF_HARM_PHRASES;
use crate::CoreResult;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// A single rule in the crisis screen.
pub trait CrisisMatcher: fmt::Debug + Send + Sync {
    /// Returns true if the rule fires.
    ///
    /// `text` is the trimmed input; `lowered` is the same text lower-cased once by the screen.
    fn matches(&self, text: &str, lowered: &str) -> bool;
}

/// Case-insensitive substring match on a fixed phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhraseMatcher {
    phrase: String,
}

impl PhraseMatcher {
    pub fn new(phrase: impl AsRef<str>) -> Self {
        Self {
            phrase: phrase.as_ref().to_lowercase(),
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

impl CrisisMatcher for PhraseMatcher {
    fn matches(&self, _text: &str, lowered: &str) -> bool {
        !self.phrase.is_empty() && lowered.contains(&self.phrase)
    }
}

/// Case-insensitive regular expression match.
#[derive(Clone, Debug)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile a pattern. Matching is always case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::InvalidCrisisPattern`] if the pattern does not compile.
    pub fn new(pattern: &str) -> CoreResult<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { regex })
    }
}

impl CrisisMatcher for PatternMatcher {
    fn matches(&self, text: &str, _lowered: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// An ordered list of crisis matchers.
#[derive(Debug)]
pub struct CrisisScreen {
    matchers: Vec<Box<dyn CrisisMatcher>>,
}

impl CrisisScreen {
    /// A screen with no rules. Never fires.
    pub fn empty() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// The built-in self-harm phrase list.
    pub fn builtin() -> Self {
        SELF_HARM_PHRASES
            .iter()
            .fold(Self::empty(), |screen, phrase| screen.with_phrase(phrase))
    }

    /// Add an exact-phrase rule.
    pub fn with_phrase(self, phrase: impl AsRef<str>) -> Self {
        self.with_matcher(PhraseMatcher::new(phrase))
    }

    /// Add a regular-expression rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not compile.
    pub fn with_pattern(self, pattern: &str) -> CoreResult<Self> {
        Ok(self.with_matcher(PatternMatcher::new(pattern)?))
    }

    pub fn with_matcher(mut self, matcher: impl CrisisMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Returns true if any rule fires on `text`.
    pub fn is_crisis(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.matchers
            .iter()
            .any(|matcher| matcher.matches(text, &lowered))
    }
}

impl Default for CrisisScreen {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_screen_matches_each_phrase_case_insensitively() {
        let screen = CrisisScreen::builtin();
        assert_eq!(screen.len(), SELF_HARM_PHRASES.len());
        assert!(screen.is_crisis("sometimes I think about SUICIDE"));
        assert!(screen.is_crisis("I want to Kill Myself"));
        assert!(screen.is_crisis("i just want to end my life"));
    }

    #[test]
    fn builtin_screen_ignores_ordinary_symptoms() {
        let screen = CrisisScreen::builtin();
        assert!(!screen.is_crisis("persistent headache and mild nausea"));
        assert!(!screen.is_crisis(""));
    }

    #[test]
    fn pattern_matcher_is_case_insensitive() {
        let screen = CrisisScreen::empty()
            .with_pattern(r"\bno\s+reason\s+to\s+live\b")
            .expect("valid pattern");
        assert!(screen.is_crisis("I feel like there is NO reason   to live"));
        assert!(!screen.is_crisis("no reasonable cause"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = CrisisScreen::empty()
            .with_pattern("(unclosed")
            .expect_err("should reject");
        assert!(matches!(err, crate::CoreError::InvalidCrisisPattern(_)));
    }

    #[test]
    fn empty_phrase_never_fires() {
        let screen = CrisisScreen::empty().with_phrase("");
        assert!(!screen.is_crisis("anything at all"));
    }
}
