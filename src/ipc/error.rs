//! Response envelopes. Success is `{id, ok: true, result}`; failure is
//! `{id, ok: false, error: {code, message, details?}}`.

use crate::error::{StoreError, TrackerError};
use serde::Serialize;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

/// The `error` object of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Envelope without an id, for input that never parsed into a request.
    pub fn unaddressed(&self) -> serde_json::Value {
        json!({ "ok": false, "error": self })
    }

    pub fn response(&self, id: &str) -> serde_json::Value {
        json!({ "id": id, "ok": false, "error": self })
    }
}

impl From<TrackerError> for HandlerErr {
    fn from(e: TrackerError) -> Self {
        let err = Self::new(e.code(), e.to_string());
        match &e {
            TrackerError::ClassNotFound(class_id) => {
                err.with_details(json!({ "classId": class_id }))
            }
            TrackerError::StudentNotFound {
                class_id,
                student_id,
            } => err.with_details(json!({ "classId": class_id, "studentId": student_id })),
            _ => err,
        }
    }
}

impl From<StoreError> for HandlerErr {
    fn from(e: StoreError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}
