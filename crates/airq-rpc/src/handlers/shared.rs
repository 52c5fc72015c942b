//! Shared handler utilities used across RPC domains.

use airq_core::{AirqError, Pollutant, Selection};
use serde_json::Value;

/// Extract an optional string parameter, supporting both snake_case and camelCase.
pub(crate) fn get_str_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a str> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .and_then(|v| v.as_str())
}

/// Extract a required string parameter or return an error.
pub(crate) fn require_str_param(
    params: &Value,
    snake: &str,
    camel: &str,
) -> airq_core::Result<String> {
    get_str_param(params, snake, camel)
        .map(String::from)
        .ok_or_else(|| AirqError::InvalidParams {
            message: format!("Missing required parameter: {}", snake),
        })
}

/// Extract an optional string parameter that must be a string when present.
pub(crate) fn opt_str_param<'a>(
    params: &'a Value,
    snake: &str,
    camel: &str,
) -> airq_core::Result<Option<&'a str>> {
    match params.get(snake).or_else(|| params.get(camel)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(AirqError::InvalidParams {
            message: format!("{} must be a string, got {}", snake, other),
        }),
    }
}

/// Extract an optional count parameter that must be a non-negative integer when present.
pub(crate) fn opt_usize_param(
    params: &Value,
    snake: &str,
    camel: &str,
) -> airq_core::Result<Option<usize>> {
    match params.get(snake).or_else(|| params.get(camel)) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| AirqError::InvalidParams {
                message: format!("{} must be a non-negative integer, got {}", snake, v),
            }),
    }
}

/// Session id every session-scoped method takes.
pub(crate) fn require_session_id(params: &Value) -> airq_core::Result<String> {
    require_str_param(params, "session_id", "sessionId")
}

/// Parse the `pollutant` parameter.
pub(crate) fn require_pollutant(params: &Value) -> airq_core::Result<Pollutant> {
    require_str_param(params, "pollutant", "pollutant")?.parse()
}

/// Parse a selection from `params.selection`, or from the params object itself.
pub(crate) fn parse_selection(params: &Value) -> airq_core::Result<Selection> {
    let raw = params.get("selection").unwrap_or(params).clone();
    serde_json::from_value(raw).map_err(|e| AirqError::InvalidParams {
        message: format!("Invalid selection: {}", e),
    })
}

/// Parse a numeric series where `null` marks a missing reading.
pub(crate) fn require_series(params: &Value) -> airq_core::Result<Vec<Option<f64>>> {
    let values = params
        .get("values")
        .and_then(|v| v.as_array())
        .ok_or_else(|| AirqError::InvalidParams {
            message: "Missing required parameter: values".into(),
        })?;

    values
        .iter()
        .map(|v| match v {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(n.as_f64()),
            other => Err(AirqError::InvalidParams {
                message: format!("values must be numbers or null, got {}", other),
            }),
        })
        .collect()
}
