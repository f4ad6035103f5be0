mod test_support;

use serde_json::json;
use std::io::Write;
use test_support::{
    error_code, read_response, request, request_err, request_ok, spawn_sidecar, temp_dir,
};

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let workspace = temp_dir("studentsd-router-smoke");
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert!(health.get("version").and_then(|v| v.as_str()).is_some());
    assert!(health.get("workspacePath").is_some_and(|v| v.is_null()));

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    assert!(workspace.join("students.sqlite3").is_file());

    for (i, method) in [
        "students.formOptions",
        "students.list",
        "analytics.summary",
        "analytics.charts",
    ]
    .iter()
    .enumerate()
    {
        let id = format!("r{}", i);
        let _ = request_ok(&mut stdin, &mut reader, &id, method, json!({}));
    }

    let unknown = request_err(&mut stdin, &mut reader, "9", "grades.explode", json!({}));
    assert_eq!(error_code(&unknown), "not_implemented");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn store_methods_require_a_workspace() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    for (i, method) in [
        "students.add",
        "students.list",
        "students.updateMarks",
        "students.delete",
        "analytics.summary",
        "analytics.charts",
    ]
    .iter()
    .enumerate()
    {
        let id = format!("n{}", i);
        let e = request_err(&mut stdin, &mut reader, &id, method, json!({}));
        assert_eq!(error_code(&e), "no_workspace", "method {}", method);
    }

    // Form options need no database.
    let opts = request_ok(&mut stdin, &mut reader, "f", "students.formOptions", json!({}));
    let subjects: Vec<&str> = opts["subjects"]
        .as_array()
        .expect("subjects")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(
        subjects,
        vec!["Telugu", "Hindi", "English", "Maths", "Science", "Social"]
    );
    assert_eq!(opts["age"]["default"].as_i64(), Some(18));
    assert_eq!(opts["passThreshold"].as_f64(), Some(40.0));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn bad_json_and_blank_lines_keep_the_loop_alive() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    writeln!(stdin).expect("write blank");
    writeln!(stdin, "{{not json").expect("write garbage");
    stdin.flush().expect("flush");
    let bad = read_response(&mut reader);
    assert_eq!(bad.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(bad["error"]["code"].as_str(), Some("bad_json"));

    let after = request(&mut stdin, &mut reader, "2", "health", json!({}));
    assert_eq!(after.get("ok").and_then(|v| v.as_bool()), Some(true));

    let missing_path = request_err(&mut stdin, &mut reader, "3", "workspace.select", json!({}));
    assert_eq!(error_code(&missing_path), "bad_params");

    drop(stdin);
    let _ = child.wait();
}
