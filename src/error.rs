use thiserror::Error;

/// Failures of the persistent key-value layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(#[from] rusqlite::Error),

    #[error("stored blob `{key}` is malformed: {source}")]
    Corrupt {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Corrupt { .. } => "store_corrupt",
            StoreError::Backend(_) | StoreError::Serialize { .. } => "store_failed",
        }
    }
}

/// Reportable outcomes of tracker operations. None of these are fatal to the
/// running session.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Please select a class first!")]
    NoClassSelected,

    #[error("class not found: {0}")]
    ClassNotFound(String),

    #[error("student {student_id} is not enrolled in class {class_id}")]
    StudentNotFound {
        class_id: String,
        student_id: String,
    },

    #[error("Please select both start and end dates!")]
    MissingDateRange,

    #[error("No classes to export!")]
    NothingToExport,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TrackerError {
    pub fn code(&self) -> &'static str {
        match self {
            TrackerError::InvalidCredentials => "invalid_credentials",
            TrackerError::NoClassSelected => "no_class_selected",
            TrackerError::ClassNotFound(_) => "class_not_found",
            TrackerError::StudentNotFound { .. } => "student_not_found",
            TrackerError::MissingDateRange => "missing_date_range",
            TrackerError::NothingToExport => "nothing_to_export",
            TrackerError::Store(e) => e.code(),
        }
    }
}
