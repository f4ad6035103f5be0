use crate::ipc::error::{err, ok, store_err, validation_err};
use crate::ipc::helpers::{required_student_id, store};
use crate::ipc::types::{AppState, Request};
use crate::model::{NewStudent, Subject};
use crate::rules::{self, AGE_DEFAULT, AGE_MAX, AGE_MIN, MARKS_MAX, MARKS_MIN, PASS_THRESHOLD};
use serde_json::json;

fn handle_form_options(req: &Request) -> serde_json::Value {
    let subjects: Vec<&str> = Subject::ALL.iter().map(|s| s.as_str()).collect();
    ok(
        &req.id,
        json!({
            "subjects": subjects,
            "age": { "min": AGE_MIN, "max": AGE_MAX, "default": AGE_DEFAULT },
            "marks": { "min": MARKS_MIN, "max": MARKS_MAX },
            "passThreshold": PASS_THRESHOLD,
        }),
    )
}

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let name = req
        .params
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    let age = match req.params.get("age") {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => match v.as_i64() {
            Some(a) => Some(a),
            None => {
                return err(
                    &req.id,
                    "bad_params",
                    "age must be an integer",
                    Some(json!({ "age": v })),
                )
            }
        },
    };
    let subject = req.params.get("subject").and_then(|v| v.as_str());
    let marks = rules::marks_from_json(req.params.get("marks"));

    let student = match NewStudent::from_params(name, age, subject, marks) {
        Ok(s) => s,
        Err(e) => return validation_err(&req.id, &e),
    };

    match store.create(&student) {
        Ok(student_id) => ok(
            &req.id,
            json!({
                "studentId": student_id,
                "status": rules::derive_status(student.marks),
            }),
        ),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.list_all() {
        Ok(students) => ok(&req.id, json!({ "students": students })),
        Err(e) => store_err(&req.id, &e),
    }
}

fn handle_students_update_marks(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let student_id = match required_student_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let marks = match rules::validate_marks_update(rules::marks_from_json(req.params.get("marks")))
    {
        Ok(m) => m,
        Err(e) => return validation_err(&req.id, &e),
    };

    if let Err(e) = store.update_marks(student_id, marks) {
        return store_err(&req.id, &e);
    }
    // Read back so the caller sees the row as stored.
    let student = match store.get(student_id) {
        Ok(v) => v,
        Err(e) => return store_err(&req.id, &e),
    };
    ok(
        &req.id,
        json!({
            "studentId": student_id,
            "marks": marks,
            "status": rules::derive_status(marks),
            "student": student,
        }),
    )
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let student_id = match required_student_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match store.delete(student_id) {
        Ok(()) => ok(&req.id, json!({ "studentId": student_id })),
        Err(e) => store_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.formOptions" => Some(handle_form_options(req)),
        "students.add" => Some(handle_students_add(state, req)),
        "students.list" => Some(handle_students_list(state, req)),
        "students.updateMarks" => Some(handle_students_update_marks(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
