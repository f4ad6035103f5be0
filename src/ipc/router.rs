use super::handlers;
use super::types::{AppState, Request};
use crate::ipc::error::err;

pub fn handle_request(state: &mut AppState, req: Request) -> serde_json::Value {
    tracing::debug!(id = %req.id, method = %req.method, "request");

    let resp = if let Some(resp) = handlers::core::try_handle(state, &req) {
        resp
    } else if let Some(resp) = handlers::students::try_handle(state, &req) {
        resp
    } else if let Some(resp) = handlers::analytics::try_handle(state, &req) {
        resp
    } else {
        err(
            &req.id,
            "not_implemented",
            format!("unknown method: {}", req.method),
            None,
        )
    };

    if resp.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = resp
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        tracing::debug!(id = %req.id, method = %req.method, code, "request failed");
    }
    resp
}
