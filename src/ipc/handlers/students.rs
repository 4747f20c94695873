use crate::error::TrackerError;
use crate::ipc::helpers::{get_optional_str, get_required_str, respond, session_tracker, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn students_list(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let tracker = session_tracker(state)?;
    let class_id = get_optional_str(params, "classId")
        .or_else(|| tracker.selected_class().map(|s| s.to_string()))
        .ok_or(TrackerError::NoClassSelected)?;
    let class = tracker
        .class(&class_id)
        .ok_or_else(|| TrackerError::ClassNotFound(class_id.clone()))?;
    Ok(json!({
        "classId": class.id,
        "students": class.students,
    }))
}

fn students_create(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_optional_str(params, "classId");
    let name = get_required_str(params, "name")?;
    let roll_number = get_required_str(params, "rollNumber")?;
    let tracker = session_tracker(state)?;
    let student_id = tracker.add_student(class_id.as_deref(), &name, &roll_number)?;
    Ok(json!({
        "created": student_id.is_some(),
        "studentId": student_id,
    }))
}

fn students_delete(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_optional_str(params, "classId");
    let student_id = get_required_str(params, "studentId")?;
    let tracker = session_tracker(state)?;
    let deleted = tracker.delete_student(class_id.as_deref(), &student_id)?;
    Ok(json!({ "deleted": deleted }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "students.list" => students_list(state, &req.params),
        "students.create" => students_create(state, &req.params),
        "students.delete" => students_delete(state, &req.params),
        _ => return None,
    };
    Some(respond(req, result))
}
