use crate::rules::ValidationError;
use crate::store::StoreError;
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

pub fn validation_err(id: &str, e: &ValidationError) -> serde_json::Value {
    err(
        id,
        "bad_params",
        e.to_string(),
        Some(json!({ "reason": e.reason() })),
    )
}

pub fn store_err(id: &str, e: &StoreError) -> serde_json::Value {
    let details = match e {
        StoreError::NotFound(student_id) => Some(json!({ "studentId": student_id })),
        StoreError::Insert(_) => Some(json!({ "table": "students" })),
        _ => None,
    };
    err(id, e.code(), e.to_string(), details)
}
