use crate::error::CoreError;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Maps the core error taxonomy onto wire error codes.
pub fn core_err(id: &str, e: &CoreError) -> serde_json::Value {
    let (code, details) = match e {
        CoreError::Capacity { students, seats } => (
            "capacity_exceeded",
            Some(json!({ "students": students, "seats": seats })),
        ),
        CoreError::NotFound(_) => ("not_found", None),
        CoreError::Validation(_) => ("validation_failed", None),
        CoreError::InvalidCode(_) => ("invalid_seat_code", None),
        CoreError::Store(_) => ("db_query_failed", None),
    };
    err(id, code, e.to_string(), details)
}
