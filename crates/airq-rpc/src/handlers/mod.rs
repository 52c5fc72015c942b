//! JSON-RPC request handlers, split by domain.

mod analysis;
mod session;
mod shared;
mod status;

pub(crate) use shared::{
    opt_str_param, opt_usize_param, parse_selection, require_pollutant, require_series,
    require_session_id,
};

use crate::server::AppState;
use crate::wrapper::wrap_response;
use airq_core::config::AppConfig;
use airq_core::AirqError;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

// ============================================================================
// JSON-RPC types
// ============================================================================

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

// ============================================================================
// HTTP endpoints
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// CSV download of a session's current data.
pub async fn handle_export(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Response {
    match state.api.export_csv(&session_id).await {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, AppConfig::EXPORT_MIME.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", AppConfig::EXPORT_FILE_NAME),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(AirqError::SessionNotFound(id)) => {
            warn!("Export requested for unknown session {}", id);
            (StatusCode::NOT_FOUND, format!("Session not found: {}", id)).into_response()
        }
        Err(e) => {
            error!("Export failed for session {}: {}", session_id, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    let method = &request.method;
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id.clone();

    debug!("RPC call: {}({:?})", method, params);

    // Handle built-in methods
    if method == "health_check" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
        );
    }

    if method == "shutdown" {
        state.request_shutdown();
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(
                id,
                json!({"status": "shutting_down"}),
            )),
        );
    }

    // Dispatch to API methods
    let result = dispatch_method(&state, method, &params).await;

    match result {
        Ok(value) => {
            let wrapped = wrap_response(method, value);
            (StatusCode::OK, Json(JsonRpcResponse::success(id, wrapped)))
        }
        Err(e) => {
            error!("RPC error for {}: {}", method, e);
            let code = e.to_rpc_error_code();
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error(id, code, e.to_string())),
            )
        }
    }
}

// ============================================================================
// Method dispatcher
// ============================================================================

/// Dispatch a method call to the appropriate domain handler.
async fn dispatch_method(state: &AppState, method: &str, params: &Value) -> airq_core::Result<Value> {
    match method {
        // Status & options
        "get_status" => status::get_status(state, params).await,
        "get_filter_options" => status::get_filter_options(state, params).await,
        "get_thresholds" => status::get_thresholds(state, params).await,

        // Sessions
        "create_session" => session::create_session(state, params).await,
        "close_session" => session::close_session(state, params).await,
        "analyze" => session::analyze(state, params).await,
        "get_report" => session::get_report(state, params).await,
        "export_csv" => session::export_csv(state, params).await,

        // Report sections
        "get_trend" => analysis::get_trend(state, params).await,
        "get_comparison" => analysis::get_comparison(state, params).await,
        "get_correlation" => analysis::get_correlation(state, params).await,
        "get_summary" => analysis::get_summary(state, params).await,
        "get_alerts" => analysis::get_alerts(state, params).await,
        "smooth_series" => analysis::smooth_series(state, params).await,

        // Unknown method
        _ => {
            warn!("Method not found: {}", method);
            Err(AirqError::MethodNotFound(method.to_string()))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
