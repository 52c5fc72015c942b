//! Report section and smoothing handlers.

use super::{opt_str_param, opt_usize_param, require_pollutant, require_series, require_session_id};
use crate::server::AppState;
use airq_core::config::SmoothingConfig;
use airq_core::{Aggregate, SmoothingMethod};
use serde_json::{json, Value};

pub async fn get_trend(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let pollutant = require_pollutant(params)?;
    let chart = state.api.get_trend(&session_id, pollutant).await?;
    Ok(serde_json::to_value(chart)?)
}

pub async fn get_comparison(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let aggregate = match opt_str_param(params, "aggregate", "aggregate")? {
        Some(s) => s.parse()?,
        None => Aggregate::default(),
    };
    let chart = state.api.get_comparison(&session_id, aggregate).await?;
    Ok(serde_json::to_value(chart)?)
}

pub async fn get_correlation(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let matrix = state.api.get_correlation(&session_id).await?;
    Ok(serde_json::to_value(matrix)?)
}

pub async fn get_summary(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let summary = state.api.get_summary(&session_id).await?;
    Ok(serde_json::to_value(summary)?)
}

pub async fn get_alerts(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let session_id = require_session_id(params)?;
    let alerts = state.api.get_alerts(&session_id).await?;
    Ok(serde_json::to_value(alerts)?)
}

pub async fn smooth_series(state: &AppState, params: &Value) -> airq_core::Result<Value> {
    let values = require_series(params)?;
    let method = match opt_str_param(params, "method", "method")? {
        Some(s) => s.parse()?,
        None => SmoothingMethod::default(),
    };
    let window = opt_usize_param(params, "window", "window")?
        .unwrap_or(SmoothingConfig::DEFAULT_WINDOW);

    let smoothed = state.api.smooth_series(&values, method, window)?;
    Ok(json!(smoothed))
}
