use crate::ipc::helpers::{get_optional_str, get_required_str, respond, session_tracker, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn classes_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let tracker = session_tracker(state)?;
    let classes: Vec<serde_json::Value> = tracker
        .classes()
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "subject": c.subject,
                "studentCount": c.students.len(),
            })
        })
        .collect();
    Ok(json!({
        "classes": classes,
        "selectedClassId": tracker.selected_class(),
    }))
}

fn classes_create(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let name = get_required_str(params, "name")?;
    let subject = get_required_str(params, "subject")?;
    let tracker = session_tracker(state)?;
    // Blank fields are a silent no-op: created=false, classId=null.
    let class_id = tracker.create_class(&name, &subject)?;
    Ok(json!({
        "created": class_id.is_some(),
        "classId": class_id,
    }))
}

fn classes_delete(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let tracker = session_tracker(state)?;
    let deleted = tracker.delete_class(&class_id)?;
    Ok(json!({
        "deleted": deleted,
        "selectedClassId": tracker.selected_class(),
    }))
}

fn classes_select(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_optional_str(params, "classId");
    let tracker = session_tracker(state)?;
    tracker.select_class(class_id.as_deref())?;
    Ok(json!({ "selectedClassId": tracker.selected_class() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "classes.list" => classes_list(state),
        "classes.create" => classes_create(state, &req.params),
        "classes.delete" => classes_delete(state, &req.params),
        "classes.select" => classes_select(state, &req.params),
        _ => return None,
    };
    Some(respond(req, result))
}
