use crate::ipc::error::ok;
pub use crate::ipc::error::HandlerErr;
use crate::ipc::types::{AppState, Request};
use crate::model::Status;
use crate::tracker::{self, Tracker};
use serde_json::json;

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing {}", key)))
}

/// Absent, null and blank strings all read as `None`.
pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn get_status(params: &serde_json::Value) -> Result<Status, HandlerErr> {
    let raw = get_required_str(params, "status")?;
    Status::parse(&raw).ok_or_else(|| {
        HandlerErr::new("bad_params", "status must be present or absent")
            .with_details(json!({ "status": raw }))
    })
}

/// `params.date`, defaulting to today's local date.
pub fn get_date(params: &serde_json::Value) -> String {
    get_optional_str(params, "date").unwrap_or_else(tracker::today)
}

pub fn workspace_tracker(state: &mut AppState) -> Result<&mut Tracker, HandlerErr> {
    state
        .tracker
        .as_mut()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))
}

/// Tracker of the open workspace, only while a teacher is logged in.
pub fn session_tracker(state: &mut AppState) -> Result<&mut Tracker, HandlerErr> {
    let tracker = workspace_tracker(state)?;
    if tracker.session().is_none() {
        return Err(HandlerErr::new("not_logged_in", "log in first"));
    }
    Ok(tracker)
}

pub fn respond(req: &Request, result: Result<serde_json::Value, HandlerErr>) -> serde_json::Value {
    match result {
        Ok(value) => ok(&req.id, value),
        Err(error) => error.response(&req.id),
    }
}
