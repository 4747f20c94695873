use crate::ipc::helpers::{get_required_str, respond, session_tracker, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn stats_class(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let tracker = session_tracker(state)?;
    let stats = tracker.stats(&class_id);
    Ok(json!({
        "classId": class_id,
        "stats": stats,
    }))
}

fn stats_all(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let tracker = session_tracker(state)?;
    let classes: Vec<serde_json::Value> = tracker
        .classes()
        .iter()
        .map(|c| {
            json!({
                "classId": c.id,
                "name": c.name,
                "studentCount": c.students.len(),
                "stats": tracker.stats(&c.id),
            })
        })
        .collect();
    Ok(json!({ "classes": classes }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "stats.class" => stats_class(state, &req.params),
        "stats.all" => stats_all(state),
        _ => return None,
    };
    Some(respond(req, result))
}
