//! Engine configuration.
//!
//! Configuration is resolved once at process startup and then passed into the validator and
//! normaliser. Nothing in this crate reads environment variables; binaries read them and hand
//! the raw optional strings to [`EngineConfig::from_env_values`].

use crate::constants::{
    DEFAULT_MAX_AGE, DEFAULT_MAX_ENTITIES, DEFAULT_MAX_SYMPTOM_LENGTH, DEFAULT_MIN_AGE,
    DEFAULT_MIN_SYMPTOM_LENGTH,
};
use crate::{CoreError, CoreResult};

/// Raw configuration values as read from the environment.
///
/// Every field is optional; `None`, empty and whitespace-only values fall back to defaults.
#[derive(Clone, Debug, Default)]
pub struct EnvValues {
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub max_entities: Option<String>,
    pub crisis_phrases: Option<String>,
}

/// Bounds applied by the input validator.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatorConfig {
    min_length: usize,
    max_length: usize,
    min_age: f64,
    max_age: f64,
}

impl ValidatorConfig {
    /// Create a new `ValidatorConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if a minimum exceeds its maximum or an age bound is
    /// not finite.
    pub fn new(
        min_length: usize,
        max_length: usize,
        min_age: f64,
        max_age: f64,
    ) -> CoreResult<Self> {
        if min_length > max_length {
            return Err(CoreError::InvalidConfig(format!(
                "min_length ({min_length}) cannot exceed max_length ({max_length})"
            )));
        }
        if !min_age.is_finite() || !max_age.is_finite() {
            return Err(CoreError::InvalidConfig("age bounds must be finite".into()));
        }
        if min_age > max_age {
            return Err(CoreError::InvalidConfig(format!(
                "min_age ({min_age}) cannot exceed max_age ({max_age})"
            )));
        }

        Ok(Self {
            min_length,
            max_length,
            min_age,
            max_age,
        })
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn min_age(&self) -> f64 {
        self.min_age
    }

    pub fn max_age(&self) -> f64 {
        self.max_age
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_SYMPTOM_LENGTH,
            max_length: DEFAULT_MAX_SYMPTOM_LENGTH,
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// Settings applied by the result normaliser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormaliserConfig {
    max_entities: usize,
}

impl NormaliserConfig {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if `max_entities` is zero.
    pub fn new(max_entities: usize) -> CoreResult<Self> {
        if max_entities == 0 {
            return Err(CoreError::InvalidConfig(
                "max_entities must be at least 1".into(),
            ));
        }
        Ok(Self { max_entities })
    }

    pub fn max_entities(&self) -> usize {
        self.max_entities
    }
}

impl Default for NormaliserConfig {
    fn default() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
        }
    }
}

/// Full engine configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    pub validator: ValidatorConfig,
    pub normaliser: NormaliserConfig,
    /// Extra crisis phrases added on top of the built-in list.
    pub extra_crisis_phrases: Vec<String>,
}

impl EngineConfig {
    /// Build configuration from optional raw environment strings.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfigValue`] for values that do not parse, and
    /// [`CoreError::InvalidConfig`] for inconsistent bounds.
    pub fn from_env_values(values: EnvValues) -> CoreResult<Self> {
        let min_length = parse_or(
            "SYMPTOM_MIN_LENGTH",
            values.min_length,
            DEFAULT_MIN_SYMPTOM_LENGTH,
        )?;
        let max_length = parse_or(
            "SYMPTOM_MAX_LENGTH",
            values.max_length,
            DEFAULT_MAX_SYMPTOM_LENGTH,
        )?;
        let min_age = parse_or("SYMPTOM_MIN_AGE", values.min_age, DEFAULT_MIN_AGE)?;
        let max_age = parse_or("SYMPTOM_MAX_AGE", values.max_age, DEFAULT_MAX_AGE)?;
        let max_entities = parse_or(
            "SYMPTOM_MAX_ENTITIES",
            values.max_entities,
            DEFAULT_MAX_ENTITIES,
        )?;

        let extra_crisis_phrases = values
            .crisis_phrases
            .map(|raw| {
                raw.split(',')
                    .map(|phrase| phrase.trim().to_lowercase())
                    .filter(|phrase| !phrase.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            validator: ValidatorConfig::new(min_length, max_length, min_age, max_age)?,
            normaliser: NormaliserConfig::new(max_entities)?,
            extra_crisis_phrases,
        })
    }
}

/// Parse an optional value, falling back to `default` when it is absent or blank.
fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> CoreResult<T> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(default),
        Some(v) => v
            .parse::<T>()
            .map_err(|_| CoreError::InvalidConfigValue { name, value: v }),
    }
}
