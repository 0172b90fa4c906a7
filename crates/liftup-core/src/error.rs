use thiserror::Error;

use crate::file::SelectionSource;

/// Which backend call a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Process,
    Analyze,
    Cleanup,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Process => write!(f, "process"),
            Action::Analyze => write!(f, "analyze"),
            Action::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Every failure the controller can surface to the user.
///
/// Validation variants are raised before any network call. `Server` carries
/// the backend's own message, `Transport` carries a diagnostic that is only
/// logged; the user sees a generic localized text for it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    #[error("not a PDF file (type {mime:?}, via {origin:?})")]
    NotPdf {
        mime: String,
        origin: SelectionSource,
    },

    #[error("file is {size} bytes, limit is {limit}")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("no file selected")]
    NoFileSelected,

    #[error("no extraction session to download from")]
    NoDownloadSession,

    #[error("no extraction session to analyze")]
    NoAnalysisSession,

    #[error("{action} rejected by server: {message:?}")]
    Server { action: Action, message: Option<String> },

    #[error("{action} request failed: {detail}")]
    Transport { action: Action, detail: String },
}

impl ControllerError {
    /// True for failures detected before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ControllerError::NotPdf { .. }
                | ControllerError::FileTooLarge { .. }
                | ControllerError::NoFileSelected
                | ControllerError::NoDownloadSession
                | ControllerError::NoAnalysisSession
        )
    }
}

/// Failure reported by an [`ExtractionBackend`](crate::controller::ExtractionBackend)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Decode(e.to_string())
    }
}
