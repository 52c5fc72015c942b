//! Response wrapping for frontend compatibility.
//!
//! The dashboard front end expects list results as `{success: bool, <key>: [...]}`.
//! Object results already carry their own shape and pass through.

use serde_json::{json, Value};

/// Wrap API responses to match the frontend's expected format.
pub fn wrap_response(method: &str, result: Value) -> Value {
    match method {
        // List wrappers
        "get_thresholds" => wrap_list("thresholds", result),
        "get_summary" => wrap_list("summary", result),
        "get_alerts" => wrap_list("alerts", result),
        "smooth_series" => wrap_list("values", result),

        // Scalar wrappers
        "close_session" => {
            json!({
                "success": true,
                "closed": result.as_bool().unwrap_or(false)
            })
        }

        "export_csv" => {
            json!({
                "success": true,
                "csv": result.as_str().unwrap_or_default()
            })
        }

        // Default: return as-is (for methods not explicitly handled)
        _ => result,
    }
}

fn wrap_list(key: &str, result: Value) -> Value {
    let items = if result.is_null() { json!([]) } else { result };
    let mut wrapped = serde_json::Map::new();
    wrapped.insert("success".into(), json!(true));
    wrapped.insert(key.into(), items);
    Value::Object(wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_alerts() {
        let alerts = json!([{"pollutant": "PM25", "status": "no_data"}]);
        let wrapped = wrap_response("get_alerts", alerts.clone());

        assert!(wrapped.get("success").unwrap().as_bool().unwrap());
        assert_eq!(wrapped.get("alerts").unwrap(), &alerts);
    }

    #[test]
    fn test_wrap_null_summary() {
        let wrapped = wrap_response("get_summary", Value::Null);

        assert!(wrapped.get("success").unwrap().as_bool().unwrap());
        assert_eq!(wrapped.get("summary").unwrap(), &json!([]));
    }

    #[test]
    fn test_wrap_close_session() {
        let wrapped = wrap_response("close_session", json!(false));
        assert!(wrapped.get("success").unwrap().as_bool().unwrap());
        assert!(!wrapped.get("closed").unwrap().as_bool().unwrap());
    }

    #[test]
    fn test_wrap_export() {
        let wrapped = wrap_response("export_csv", json!("datetime,station\n"));
        assert_eq!(wrapped.get("csv").unwrap(), &json!("datetime,station\n"));
    }

    #[test]
    fn test_passthrough_method() {
        let data = json!({"success": true, "version": "0.3.0"});
        let wrapped = wrap_response("get_status", data.clone());
        assert_eq!(wrapped, data);
    }
}
