//! HTTP request handlers
//!
//! Implementation of the calculator REST endpoints.

use crate::{
    error::{format_error, format_error_for_api},
    savings,
    server::app::AppState,
    types::{
        CalculatorConfig, CalculatorInputs, ErrorResponse, EstimateResponse, PingResponse,
        RemoteUrlSetting,
        calculator::{ENDPOINT_RATE, ENDPOINTS, TECHNICIANS},
    },
    utils::{coerce::to_number, version},
};
use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::collections::HashMap;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(error: &crate::Error, context: &str) -> ApiError {
    // an upstream success or redirect is still a failed resolution here
    let status = match StatusCode::from_u16(error.status_code()) {
        Ok(status) if status.as_u16() < 400 => StatusCode::BAD_GATEWAY,
        Ok(status) => status,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse::with_context_and_details(
            format_error(error),
            context,
            format_error_for_api(error),
        )),
    )
}

/// Parse a JSON object body; an empty body counts as `{}`
fn parse_object_body(body: &Bytes) -> Result<Map<String, Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::with_context(
                "Request body must be a JSON object",
                "json_deserialization",
            )),
        )),
        Err(e) => {
            tracing::error!("Failed to deserialize JSON request: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_context(
                    format!("Invalid JSON: {}", e),
                    "json_deserialization",
                )),
            ))
        }
    }
}

/// Inputs from loosely-typed values; absent keys take the slider defaults
///
/// A key that is present but not numeric counts as 0.
pub fn inputs_from_values(
    values: &Map<String, Value>,
    config: &CalculatorConfig,
) -> CalculatorInputs {
    let read = |key: &str| values.get(key).map(|value| to_number(value).unwrap_or(0.0));
    CalculatorInputs::or_defaults(
        read(TECHNICIANS),
        read(ENDPOINTS),
        read(ENDPOINT_RATE),
        config.default_inputs(),
    )
}

async fn estimate_for(state: &AppState, values: &Map<String, Value>) -> EstimateResponse {
    let config = state.resolver.config_or_fallback().await;
    let inputs = inputs_from_values(values, &config);
    tracing::debug!("Estimating savings for {:?}", inputs);
    savings::estimate(inputs, state.settings.calculator.seat_rate, &config)
}

/// Resolved calculator configuration
///
/// GET /atera/v1/calculator-config
pub async fn calculator_config(
    State(state): State<AppState>,
) -> Result<Json<CalculatorConfig>, ApiError> {
    match state.resolver.load_config().await {
        Ok(config) => Ok(Json(config)),
        Err(e) => {
            tracing::error!("Failed to resolve calculator config: {}", e);
            Err(error_response(&e, "config_resolution"))
        }
    }
}

/// Hard-coded configuration used when nothing resolves
///
/// GET /atera/v1/calculator-config/fallback
pub async fn fallback_config() -> Json<CalculatorConfig> {
    Json(CalculatorConfig::fallback())
}

/// Savings estimate from query parameters
///
/// GET /atera/v1/estimate?technicians=..&endpoints=..&endpointRate=..
pub async fn estimate_query(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<EstimateResponse> {
    let values: Map<String, Value> = params
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Json(estimate_for(&state, &values).await)
}

/// Savings estimate from a JSON body
///
/// POST /atera/v1/estimate
pub async fn estimate_body(State(state): State<AppState>, body: Bytes) -> Response {
    match parse_object_body(&body) {
        Ok(values) => Json(estimate_for(&state, &values).await).into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

/// Current remote URL setting
///
/// GET /atera/v1/settings
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<RemoteUrlSetting>, ApiError> {
    match state.resolver.remote_url_setting().await {
        Ok(url) => Ok(Json(RemoteUrlSetting::new(url))),
        Err(e) => {
            tracing::error!("Failed to read remote URL setting: {}", e);
            Err(error_response(&e, "settings_read"))
        }
    }
}

/// Update the remote URL setting and drop the cached configuration
///
/// PUT /atera/v1/settings
pub async fn update_settings(State(state): State<AppState>, body: Bytes) -> Response {
    let values = match parse_object_body(&body) {
        Ok(values) => values,
        Err(rejection) => return rejection.into_response(),
    };

    let requested = match values.get("remote_url") {
        Some(Value::String(url)) => url.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_context(
                    format!("remote_url must be a string, found {}", other),
                    "json_deserialization",
                )),
            )
                .into_response();
        }
    };

    match state.resolver.update_remote_url(&requested).await {
        Ok(stored) => {
            tracing::info!("Remote URL setting updated to '{}'", stored);
            Json(RemoteUrlSetting::new(stored)).into_response()
        }
        Err(e) => {
            tracing::warn!("Rejected remote URL update: {}", e);
            error_response(&e, "settings_update").into_response()
        }
    }
}

/// Invalidate cache endpoint
///
/// POST /atera/v1/invalidate_cache
pub async fn invalidate_cache(State(state): State<AppState>) -> StatusCode {
    state.resolver.invalidate_cache().await;
    StatusCode::NO_CONTENT
}

/// Ping endpoint for health checks
///
/// GET /ping
///
/// Returns server status and uptime information.
pub async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    let response = PingResponse::new(uptime, version::get_version());

    tracing::debug!(
        "Ping response: uptime={}s, version={}",
        uptime,
        version::get_version()
    );
    Json(response)
}
