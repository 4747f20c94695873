use crate::export::CsvExport;
use crate::ipc::helpers::{get_optional_str, get_required_str, respond, session_tracker, HandlerErr};
use crate::ipc::types::{AppState, Request};
use anyhow::Context;
use serde_json::json;
use std::path::Path;

fn write_text_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Writes the export to `params.outPath` when given; always returns the text.
fn finish_export(
    export: CsvExport,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let out_path = get_optional_str(params, "outPath");
    if let Some(out) = out_path.as_deref() {
        write_text_file(Path::new(out), &export.csv).map_err(|e| {
            HandlerErr::new("export_failed", format!("{e:#}")).with_details(json!({ "path": out }))
        })?;
        tracing::info!(path = out, rows = export.row_count, "export written");
    }
    Ok(json!({
        "fileName": export.file_name,
        "csv": export.csv,
        "rowCount": export.row_count,
        "outPath": out_path,
    }))
}

fn export_all(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let tracker = session_tracker(state)?;
    let export = tracker.export_all()?;
    finish_export(export, params)
}

fn export_class(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let tracker = session_tracker(state)?;
    let export = tracker.export_class(&class_id)?;
    finish_export(export, params)
}

fn export_matrix(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let class_id = get_required_str(params, "classId")?;
    let tracker = session_tracker(state)?;
    let export = tracker.export_matrix(&class_id)?;
    finish_export(export, params)
}

fn export_range(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let start = get_optional_str(params, "startDate").unwrap_or_default();
    let end = get_optional_str(params, "endDate").unwrap_or_default();
    let tracker = session_tracker(state)?;
    let export = tracker.export_range(&start, &end)?;
    finish_export(export, params)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "export.all" => export_all(state, &req.params),
        "export.class" => export_class(state, &req.params),
        "export.matrix" => export_matrix(state, &req.params),
        "export.range" => export_range(state, &req.params),
        _ => return None,
    };
    Some(respond(req, result))
}
