//! Session lifecycle handlers.

use super::{parse_selection, require_session_id};
use crate::server::AppState;
use serde_json::{json, Value};

pub async fn create_session(state: &AppState, _params: &Value) -> airq_core::Result<Value> {
    let response = state.api.create_session();
    Ok(serde_json::to_value(response)?)
}

pub async fn close_session(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let closed = state.api.close_session(&session_id)?;
    Ok(json!(closed))
}

pub async fn analyze(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let selection = parse_selection(params)?;
    let row_count = state.api.analyze(&session_id, selection).await?;
    Ok(json!({
        "success": true,
        "row_count": row_count
    }))
}

pub async fn get_report(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let view = state.api.get_report(&session_id).await?;
    Ok(serde_json::to_value(view)?)
}

pub async fn export_csv(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let csv = state.api.export_csv(&session_id).await?;
    Ok(json!(csv))
}
