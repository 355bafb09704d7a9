//! REST API for the symptom engine.
//!
//! ## Purpose
//! Exposes validation, sanitising, normalisation, triage guidance and the emergency screen over
//! HTTP, with an OpenAPI document and Swagger UI.
//!
//! ## Intended use
//! The `symptom-run` binary resolves configuration, builds a [`SymptomEngine`] and serves
//! [`router`]. Handlers call the engine synchronously and never fail on odd field values; only
//! malformed JSON is rejected, by axum's extractor.

pub mod models;

use axum::{extract::State, response::Json, routing::get, routing::post, Router};
use std::sync::Arc;
use symptom_core::{
    assess_emergency, guidance_for, normalise::normalise_severity_value, sanitise,
    RawAnalysisResult, SymptomEngine, SymptomInput,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use models::{
    EmergencyNumbers, EmergencyReq, EmergencyRes, GuidanceReq, GuidanceRes, HealthRes,
    NormaliseReq, NormaliseRes, SanitiseReq, SanitiseRes, ValidateReq, ValidateRes,
};

/// Shared state for request handlers.
#[derive(Clone)]
struct AppState {
    engine: Arc<SymptomEngine>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        validate_submission,
        sanitise_text,
        normalise_result,
        triage_guidance,
        emergency_assessment,
    ),
    components(schemas(
        HealthRes,
        ValidateReq,
        ValidateRes,
        SanitiseReq,
        SanitiseRes,
        NormaliseReq,
        NormaliseRes,
        GuidanceReq,
        GuidanceRes,
        EmergencyReq,
        EmergencyRes,
        EmergencyNumbers,
    ))
)]
pub struct ApiDoc;

/// Build the application router around a shared engine.
///
/// Includes Swagger UI at `/swagger-ui` and the OpenAPI document at `/api-docs/openapi.json`.
pub fn router(engine: Arc<SymptomEngine>) -> Router {
    let state = AppState { engine };

    Router::new()
        .route("/health", get(health))
        .route("/validate", post(validate_submission))
        .route("/sanitise", post(sanitise_text))
        .route("/normalise", post(normalise_result))
        .route("/triage/guidance", post(triage_guidance))
        .route("/emergency-assessment", post(emergency_assessment))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Symptom REST API is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/validate",
    request_body = ValidateReq,
    responses(
        (status = 200, description = "Submission verdict, valid or not", body = ValidateRes),
        (status = 400, description = "Malformed JSON body")
    )
)]
/// Validate a symptom submission.
///
/// Always answers `200`; rule violations are reported in the body. When the symptom text is
/// present, the response also carries its sanitised form.
#[axum::debug_handler]
async fn validate_submission(
    State(state): State<AppState>,
    Json(req): Json<ValidateReq>,
) -> Json<ValidateRes> {
    let input = SymptomInput::from(req);
    let result = state.engine.check_submission(&input);

    if !result.verdict.is_valid {
        tracing::debug!(
            issues = result.verdict.issues.len(),
            "submission rejected"
        );
    }

    Json(ValidateRes::from(result))
}

#[utoipa::path(
    post,
    path = "/sanitise",
    request_body = SanitiseReq,
    responses(
        (status = 200, description = "Sanitised text", body = SanitiseRes)
    )
)]
#[axum::debug_handler]
async fn sanitise_text(
    State(_state): State<AppState>,
    Json(req): Json<SanitiseReq>,
) -> Json<SanitiseRes> {
    Json(SanitiseRes {
        sanitised: sanitise(req.text()),
    })
}

#[utoipa::path(
    post,
    path = "/normalise",
    request_body = NormaliseReq,
    responses(
        (status = 200, description = "Normalised analysis result", body = NormaliseRes)
    )
)]
/// Normalise raw model output into display-ready fields.
///
/// Missing or malformed fields fall back to defaults: 75% confidence, Medium severity, a
/// yellow urgency tier and no entities.
#[axum::debug_handler]
async fn normalise_result(
    State(state): State<AppState>,
    Json(req): Json<NormaliseReq>,
) -> Json<NormaliseRes> {
    let raw = RawAnalysisResult::from(req);
    Json(NormaliseRes::from(state.engine.normalise(&raw)))
}

#[utoipa::path(
    post,
    path = "/triage/guidance",
    request_body = GuidanceReq,
    responses(
        (status = 200, description = "Triage guidance for the severity", body = GuidanceRes)
    )
)]
#[axum::debug_handler]
async fn triage_guidance(
    State(_state): State<AppState>,
    Json(req): Json<GuidanceReq>,
) -> Json<GuidanceRes> {
    let severity = normalise_severity_value(&req.severity);
    Json(GuidanceRes::from(guidance_for(&severity)))
}

#[utoipa::path(
    post,
    path = "/emergency-assessment",
    request_body = EmergencyReq,
    responses(
        (status = 200, description = "Red-flag screen result", body = EmergencyRes)
    )
)]
/// Screen symptom text for red-flag phrases.
///
/// Runs without any model analysis, so it can be called before a full symptom check.
#[axum::debug_handler]
async fn emergency_assessment(
    State(_state): State<AppState>,
    Json(req): Json<EmergencyReq>,
) -> Json<EmergencyRes> {
    Json(EmergencyRes::from(assess_emergency(req.symptoms())))
}
