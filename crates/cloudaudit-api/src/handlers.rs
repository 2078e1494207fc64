use crate::{render, ApiError, ApiResult, AppState};
use axum::{
    body::Bytes,
    extract::{Multipart, State},
    response::Html,
    Json,
};
use cloudaudit_ai::parse_analysis;
use cloudaudit_core::AnalysisReport;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub model: String,
    pub model_service: String,
}

/// Health check. Pings the configured model service so orchestration can see
/// an unreachable provider before user uploads start failing.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let provider = state.analyzer.provider();
    let available = provider.is_available().await;

    Json(HealthResponse {
        status: if available { "healthy" } else { "degraded" }.to_string(),
        version: option_env!("CARGO_PKG_VERSION")
            .unwrap_or("0.1.0")
            .to_string(),
        provider: provider.provider_name().to_string(),
        model: provider.model_name().to_string(),
        model_service: if available { "available" } else { "unreachable" }.to_string(),
    })
}

pub async fn index() -> Html<String> {
    Html(render::upload_page())
}

/// Browser upload flow: validate the multipart form, parse the JSON payload,
/// run the analysis and render the report as HTML.
pub async fn upload_config(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Html<String>> {
    let upload = read_config_file(multipart).await?;
    let config: Value = serde_json::from_slice(&upload.bytes)
        .map_err(|_| ApiError::BadRequest("Invalid JSON file".to_string()))?;

    info!(
        file_name = %upload.file_name,
        size_bytes = upload.bytes.len(),
        "Analyzing uploaded configuration"
    );

    let report = run_analysis(&state, &config).await?;
    Ok(Html(render::report_page(&upload.file_name, &report)))
}

/// JSON flow for non-browser clients: the request body is the configuration
/// document itself. The body is parsed here rather than through the `Json`
/// extractor so a malformed document gets the same 400 reply as the upload
/// route.
pub async fn analyze(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<AnalysisReport>> {
    let config: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON file".to_string()))?;
    let report = run_analysis(&state, &config).await?;
    Ok(Json(report))
}

async fn run_analysis(state: &AppState, config: &Value) -> ApiResult<AnalysisReport> {
    let raw = state.analyzer.analyze(config).await.map_err(|err| {
        error!("Analysis failed: {err}");
        ApiError::CloudAudit(err)
    })?;
    Ok(parse_analysis(&raw))
}

struct ConfigUpload {
    file_name: String,
    bytes: Bytes,
}

/// Pulls the `config_file` part out of the form. A missing part replies
/// 400 "No file uploaded"; an empty browser filename replies 400
/// "No selected file".
async fn read_config_file(mut multipart: Multipart) -> ApiResult<ConfigUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("config_file") {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            // A plain text part, not a file input.
            continue;
        };
        if file_name.is_empty() {
            return Err(ApiError::BadRequest("No selected file".to_string()));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(err.to_string()))?;
        return Ok(ConfigUpload { file_name, bytes });
    }
    Err(ApiError::BadRequest("No file uploaded".to_string()))
}
