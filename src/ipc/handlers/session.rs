use crate::ipc::helpers::{get_required_str, respond, workspace_tracker, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn session_get(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let tracker = workspace_tracker(state)?;
    let teacher_name = tracker.session().map(|s| s.teacher_name.clone());
    Ok(json!({
        "loggedIn": teacher_name.is_some(),
        "teacherName": teacher_name,
    }))
}

fn session_login(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let username = get_required_str(params, "username")?;
    let password = get_required_str(params, "password")?;
    let tracker = workspace_tracker(state)?;
    let session = tracker.login(&username, &password)?;
    Ok(json!({ "teacherName": session.teacher_name }))
}

fn session_logout(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let tracker = workspace_tracker(state)?;
    tracker.logout()?;
    Ok(json!({ "loggedIn": false }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "session.get" => session_get(state),
        "session.login" => session_login(state, &req.params),
        "session.logout" => session_logout(state),
        _ => return None,
    };
    Some(respond(req, result))
}
