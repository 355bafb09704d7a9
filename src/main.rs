use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use symptom_core::{EngineConfig, EnvValues, SymptomEngine};

/// Main entry point for the symptom checker service
///
/// Resolves configuration from the environment once, builds the engine and serves the REST
/// API (with Swagger UI) until the process is stopped.
///
/// # Environment Variables
/// - `SYMPTOM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `SYMPTOM_MIN_LENGTH` / `SYMPTOM_MAX_LENGTH`: symptom text length bounds
/// - `SYMPTOM_MIN_AGE` / `SYMPTOM_MAX_AGE`: accepted age range in years
/// - `SYMPTOM_MAX_ENTITIES`: cap on extracted entities returned by `/normalise`
/// - `SYMPTOM_CRISIS_PHRASES`: comma-separated phrases added to the built-in crisis screen
///
/// # Errors
/// Returns an error if:
/// - the logging configuration cannot be initialised,
/// - any `SYMPTOM_*` value is malformed or the bounds are inconsistent,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptom_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SYMPTOM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = EngineConfig::from_env_values(env_values())?;
    let engine = Arc::new(SymptomEngine::new(cfg));

    tracing::info!("++ Starting symptom REST on {}", rest_addr);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, api_rest::router(engine)).await?;

    Ok(())
}

fn env_values() -> EnvValues {
    let var = |name: &str| std::env::var(name).ok();
    EnvValues {
        min_length: var("SYMPTOM_MIN_LENGTH"),
        max_length: var("SYMPTOM_MAX_LENGTH"),
        min_age: var("SYMPTOM_MIN_AGE"),
        max_age: var("SYMPTOM_MAX_AGE"),
        max_entities: var("SYMPTOM_MAX_ENTITIES"),
        crisis_phrases: var("SYMPTOM_CRISIS_PHRASES"),
    }
}
