//! LIFT UP extraction form controller
//!
//! Platform-independent logic behind the upload page of the LIFT UP dataset
//! extraction tool: file validation, the five-panel view state, backend wire
//! types, analysis rendering and localized messages. The browser binding in
//! `liftup-wasm` plugs `fetch` and the DOM into [`FormController`].

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod file;
pub mod format;
pub mod messages;
pub mod progress;
pub mod report;
pub mod view;

pub use api::{AnalysisReport, AnalyzeResponse, Endpoints, ExtractionSession, ProcessResponse};
pub use config::{ConfigError, ControllerConfig};
pub use controller::{ExtractionBackend, FormController, Ui};
pub use error::{Action, ControllerError, TransportError};
pub use file::{FileCandidate, SelectedFile, SelectionSource, MAX_FILE_SIZE, PDF_MIME};
pub use format::{format_file_size, truncate_text};
pub use messages::{Locale, Messages};
pub use progress::ProgressTicker;
pub use report::{AnalysisView, Completeness};
pub use view::{Notice, NoticeLevel, Panel, ViewState};
