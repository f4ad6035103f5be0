use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use crate::store::Store;

pub fn store<'a>(state: &'a AppState, req: &Request) -> Result<&'a Store, serde_json::Value> {
    state
        .store
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

pub fn required_student_id(req: &Request) -> Result<i64, serde_json::Value> {
    req.params
        .get("studentId")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| err(&req.id, "bad_params", "missing studentId", None))
}
