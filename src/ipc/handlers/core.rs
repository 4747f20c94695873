use crate::ipc::helpers::{respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::session::StaticCredentials;
use crate::store::SqliteStore;
use crate::tracker::Tracker;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
    }))
}

fn handle_workspace_select(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let path = params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .ok_or_else(|| HandlerErr::new("bad_params", "missing params.path"))?;

    let store = SqliteStore::open(&path)
        .map_err(|e| HandlerErr::new("db_open_failed", format!("{e:?}")))?;
    let tracker = Tracker::open(Box::new(store), Box::new(StaticCredentials::builtin()))
        .map_err(|e| {
            HandlerErr::from(e).with_details(json!({ "path": path.to_string_lossy() }))
        })?;

    let teacher_name = tracker.session().map(|s| s.teacher_name.clone());
    tracing::info!(path = %path.display(), "workspace opened");
    state.workspace = Some(path.clone());
    state.tracker = Some(tracker);
    Ok(json!({
        "workspacePath": path.to_string_lossy(),
        "loggedIn": teacher_name.is_some(),
        "teacherName": teacher_name,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "health" => handle_health(state),
        "workspace.select" => handle_workspace_select(state, &req.params),
        _ => return None,
    };
    Some(respond(req, result))
}
