use crate::analytics::{self, EmptyInputError};
use crate::ipc::error::{ok, store_err};
use crate::ipc::helpers::store;
use crate::ipc::types::{AppState, Request};
use crate::model::StudentRecord;
use serde_json::json;

fn load_records(state: &AppState, req: &Request) -> Result<Vec<StudentRecord>, serde_json::Value> {
    let store = store(state, req)?;
    store.list_all().map_err(|e| store_err(&req.id, &e))
}

// An empty data set is reported as an informational result, not an error.
fn no_data(req: &Request, e: EmptyInputError) -> serde_json::Value {
    ok(&req.id, json!({ "empty": true, "message": e.to_string() }))
}

fn handle_analytics_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    let records = match load_records(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let summary = match analytics::summarize(&records) {
        Ok(s) => s,
        Err(e) => return no_data(req, e),
    };

    let top = &summary.top_scorer;
    let top_scorer_label = format!("{} ({} marks in {})", top.name, top.marks, top.subject);
    let mut result = json!(summary);
    if let Some(obj) = result.as_object_mut() {
        obj.insert("empty".into(), json!(false));
        obj.insert(
            "overallAverageDisplay".into(),
            json!(format!("{:.2}", summary.overall_average)),
        );
        obj.insert(
            "passPercentageDisplay".into(),
            json!(format!("{:.2}%", summary.pass_percentage)),
        );
        obj.insert("topScorerLabel".into(), json!(top_scorer_label));
    }
    ok(&req.id, result)
}

fn handle_analytics_charts(state: &mut AppState, req: &Request) -> serde_json::Value {
    let records = match load_records(state, req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match analytics::chart_data(&records) {
        Ok(charts) => {
            let mut result = json!(charts);
            if let Some(obj) = result.as_object_mut() {
                obj.insert("empty".into(), json!(false));
            }
            ok(&req.id, result)
        }
        Err(e) => no_data(req, e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "analytics.summary" => Some(handle_analytics_summary(state, req)),
        "analytics.charts" => Some(handle_analytics_charts(state, req)),
        _ => None,
    }
}
