//! Status and dashboard option handlers.

use crate::server::AppState;
use serde_json::Value;

pub async fn get_status(state: &AppState, _params: &Value) -> airq_core::Result<Value> {
    let response = state.api.get_status();
    Ok(serde_json::to_value(response)?)
}

pub async fn get_filter_options(state: &AppState, _params: &Value) -> airq_core::Result<Value> {
    let response = state.api.get_filter_options();
    Ok(serde_json::to_value(response)?)
}

pub async fn get_thresholds(state: &AppState, _params: &Value) -> airq_core::Result<Value> {
    let response = state.api.get_thresholds();
    Ok(serde_json::to_value(response)?)
}
