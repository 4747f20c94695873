use crate::error::TrackerError;
use crate::ipc::helpers::{
    get_date, get_optional_str, get_required_str, get_status, respond, session_tracker, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::tracker::Tracker;
use serde_json::json;

fn class_or_selected(
    tracker: &Tracker,
    params: &serde_json::Value,
) -> Result<String, HandlerErr> {
    get_optional_str(params, "classId")
        .or_else(|| tracker.selected_class().map(|s| s.to_string()))
        .ok_or_else(|| TrackerError::NoClassSelected.into())
}

fn parse_student_ids(params: &serde_json::Value) -> Result<Option<Vec<String>>, HandlerErr> {
    let Some(v) = params.get("studentIds") else {
        return Ok(None);
    };
    if v.is_null() {
        return Ok(None);
    }
    let Some(arr) = v.as_array() else {
        return Err(HandlerErr::new("bad_params", "studentIds must be an array"));
    };
    Ok(Some(
        arr.iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect(),
    ))
}

fn attendance_mark(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let status = get_status(params)?;
    let date = get_date(params);
    let class_id = get_optional_str(params, "classId");
    let tracker = session_tracker(state)?;
    tracker.mark_attendance(&student_id, &date, status, class_id.as_deref())?;
    Ok(json!({
        "studentId": student_id,
        "date": date,
        "status": status,
    }))
}

fn attendance_mark_all(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let status = get_status(params)?;
    let date = get_date(params);
    let class_id = get_optional_str(params, "classId");
    let student_ids = parse_student_ids(params)?;
    let tracker = session_tracker(state)?;
    let marked = tracker.mark_all(class_id.as_deref(), &date, status, student_ids.as_deref())?;
    Ok(json!({
        "date": date,
        "status": status,
        "marked": marked,
    }))
}

fn attendance_status(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let date = get_date(params);
    let tracker = session_tracker(state)?;
    let class_id = class_or_selected(tracker, params)?;
    Ok(json!({
        "studentId": student_id,
        "date": date,
        "classId": class_id,
        "status": tracker.status(&student_id, &date, &class_id),
    }))
}

/// Roster of one class for one date with each student's mark.
fn attendance_day(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let date = get_date(params);
    let tracker = session_tracker(state)?;
    let class_id = class_or_selected(tracker, params)?;
    let summary = tracker.day_summary(&class_id, &date)?;
    let Some(class) = tracker.class(&class_id) else {
        return Err(TrackerError::ClassNotFound(class_id).into());
    };
    let rows: Vec<serde_json::Value> = class
        .students
        .iter()
        .map(|s| {
            json!({
                "studentId": s.id,
                "name": s.name,
                "rollNumber": s.roll_number,
                "status": tracker.status(&s.id, &date, &class.id),
            })
        })
        .collect();
    Ok(json!({
        "classId": class.id,
        "date": date,
        "rows": rows,
        "summary": summary,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "attendance.mark" => attendance_mark(state, &req.params),
        "attendance.markAll" => attendance_mark_all(state, &req.params),
        "attendance.status" => attendance_status(state, &req.params),
        "attendance.day" => attendance_day(state, &req.params),
        _ => return None,
    };
    Some(respond(req, result))
}
