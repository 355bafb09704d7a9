use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use symptom_core::{
    assess_emergency,
    constants::{
        DEFAULT_MAX_AGE, DEFAULT_MAX_ENTITIES, DEFAULT_MAX_SYMPTOM_LENGTH, DEFAULT_MIN_AGE,
        DEFAULT_MIN_SYMPTOM_LENGTH,
    },
    guidance_for,
    normalise::normalise_severity_value,
    sanitise, CrisisScreen, InputValidator, NormaliserConfig, RawAnalysisResult,
    ResultNormaliser, SymptomInput, ValidatorConfig,
};

#[derive(Parser)]
#[command(name = "symptom")]
#[command(about = "Symptom checker validation and normalisation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a symptom description
    Validate {
        /// Free-text symptom description
        text: String,
        /// Age in years (optional)
        #[arg(long)]
        age: Option<String>,
        /// Minimum trimmed length
        #[arg(long, default_value_t = DEFAULT_MIN_SYMPTOM_LENGTH)]
        min_length: usize,
        /// Maximum trimmed length
        #[arg(long, default_value_t = DEFAULT_MAX_SYMPTOM_LENGTH)]
        max_length: usize,
    },
    /// Strip markup characters and collapse whitespace
    Sanitise {
        text: String,
    },
    /// Normalise a raw analysis result
    Normalise {
        /// Inline JSON, or @path to a JSON file
        json: String,
        /// Maximum number of entities to keep
        #[arg(long, default_value_t = DEFAULT_MAX_ENTITIES)]
        max_entities: usize,
    },
    /// Screen symptom text for red-flag phrases
    Assess {
        text: String,
    },
    /// Show triage guidance for a severity label or 1-10 score
    Guidance {
        severity: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            text,
            age,
            min_length,
            max_length,
        } => {
            let config =
                ValidatorConfig::new(min_length, max_length, DEFAULT_MIN_AGE, DEFAULT_MAX_AGE)?;
            let validator = InputValidator::new(config, CrisisScreen::builtin());
            let input = SymptomInput {
                symptoms: Value::String(text),
                age: age.map(Value::String).unwrap_or(Value::Null),
            };
            print_json(&validator.validate_submission(&input))?;
        }
        Commands::Sanitise { text } => {
            println!("{}", sanitise(&text));
        }
        Commands::Normalise { json, max_entities } => {
            let raw = read_raw_result(&json)?;
            let normaliser = ResultNormaliser::new(NormaliserConfig::new(max_entities)?);
            print_json(&normaliser.normalise(&raw))?;
        }
        Commands::Assess { text } => {
            print_json(&assess_emergency(&text))?;
        }
        Commands::Guidance { severity } => {
            let severity = normalise_severity_value(&severity_arg(&severity));
            print_json(&guidance_for(&severity))?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse a raw result from inline JSON or from `@path`.
fn read_raw_result(arg: &str) -> Result<RawAnalysisResult, Box<dyn std::error::Error>> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => arg.to_owned(),
    };
    Ok(serde_json::from_str(&text)?)
}

/// Integers are passed on as scores, anything else as a label.
fn severity_arg(arg: &str) -> Value {
    match arg.trim().parse::<i64>() {
        Ok(score) => Value::from(score),
        Err(_) => Value::String(arg.to_owned()),
    }
}
