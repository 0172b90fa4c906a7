//! Upload form controller
//!
//! Owns the selected file, the extraction session and the page view state,
//! and drives the panel transitions for every user action. Network calls go
//! through [`ExtractionBackend`], rendering through [`Ui`], so the browser
//! binding supplies `fetch` and the DOM while tests supply fakes.
//!
//! State sits in a `RefCell` and no borrow is held across an `.await`:
//! the page runs on a single-threaded event loop and a second action may
//! start while the first one's request is in flight. Overlapping submits are
//! not prevented.

use std::cell::RefCell;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::api::{AnalyzeResponse, Endpoints, ExtractionSession, ProcessResponse};
use crate::config::{ConfigError, ControllerConfig};
use crate::error::{Action, ControllerError, TransportError};
use crate::file::{validate_candidate, FileCandidate, SelectedFile, SelectionSource};
use crate::format::format_file_size;
use crate::messages::Messages;
use crate::report::AnalysisView;
use crate::view::{FileSummary, Notice, NoticeLevel, Panel, ResultSummary, ViewState};

/// The extraction server's REST calls. Download is absent: it is a native
/// browser navigation, see [`Ui::trigger_download`].
#[allow(async_fn_in_trait)]
pub trait ExtractionBackend {
    /// Platform file handle posted as the multipart body
    type File: Clone;

    async fn process(
        &self,
        file: &Self::File,
        year: &str,
    ) -> Result<ProcessResponse, TransportError>;

    async fn analyze(&self, session: &ExtractionSession)
        -> Result<AnalyzeResponse, TransportError>;

    async fn cleanup(&self, temp_id: &str) -> Result<(), TransportError>;
}

/// Rendering surface of the page
pub trait Ui {
    fn render(&self, view: &ViewState);

    fn notify(&self, notice: &Notice);

    /// Start cycling `messages` in the progress panel every `interval`
    fn start_progress(&self, messages: &'static [&'static str], interval: Duration);

    /// Stop the progress cycle; no progress text changes afterwards
    fn stop_progress(&self);

    fn trigger_download(&self, url: &str, filename: &str);
}

struct State<F> {
    selected: Option<SelectedFile<F>>,
    session: Option<ExtractionSession>,
    view: ViewState,
}

pub struct FormController<B: ExtractionBackend, U: Ui> {
    backend: B,
    ui: U,
    config: ControllerConfig,
    endpoints: Endpoints,
    messages: &'static Messages,
    state: RefCell<State<B::File>>,
}

impl<B: ExtractionBackend, U: Ui> FormController<B, U> {
    pub fn new(backend: B, ui: U, config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = State {
            selected: None,
            session: None,
            view: ViewState::new(&config.default_year),
        };
        Ok(Self {
            backend,
            ui,
            endpoints: Endpoints::new(&config.base_url),
            messages: Messages::for_locale(config.locale),
            config,
            state: RefCell::new(state),
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn view(&self) -> ViewState {
        self.state.borrow().view.clone()
    }

    pub fn session(&self) -> Option<ExtractionSession> {
        self.state.borrow().session.clone()
    }

    pub fn has_selection(&self) -> bool {
        self.state.borrow().selected.is_some()
    }

    /// Draw the current view, e.g. right after mounting
    pub fn refresh(&self) {
        let view = self.view();
        self.ui.render(&view);
    }

    /// Validate and store a file picked by the user.
    ///
    /// A rejected file leaves selection, session and panel untouched; the
    /// reason is shown as an error toast.
    pub fn select_file(
        &self,
        candidate: FileCandidate<B::File>,
        source: SelectionSource,
    ) -> Result<(), ControllerError> {
        let selected = match validate_candidate(candidate, source, self.config.max_file_size) {
            Ok(selected) => selected,
            Err(err) => {
                debug!("file rejected: {}", err);
                self.ui
                    .notify(&Notice::new(NoticeLevel::Error, self.messages.describe(&err)));
                return Err(err);
            }
        };

        debug!(name = selected.name(), size = selected.size(), "file selected");
        let summary = FileSummary {
            name: selected.name().to_string(),
            size_label: format_file_size(selected.size()),
        };
        self.state.borrow_mut().selected = Some(selected);
        self.update(|view| view.file = Some(summary));
        Ok(())
    }

    /// Drop the selected file and go back to the bare upload form
    pub fn reset_selection(&self) {
        self.state.borrow_mut().selected = None;
        self.update(|view| {
            view.file = None;
            view.panel = Panel::Idle;
            view.submit_visible = true;
            view.error = None;
        });
    }

    /// Record the year the user picked so later renders keep it
    pub fn set_year(&self, year: &str) {
        if self.state.borrow().view.year == year {
            return;
        }
        let year = year.to_string();
        self.update(|view| view.year = year);
    }

    /// Forget everything: selection, session and year choice
    pub fn start_over(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.selected = None;
            state.session = None;
        }
        let default_year = self.config.default_year.clone();
        self.update(|view| *view = ViewState::new(&default_year));
        debug!("controller reset");
    }

    /// Post the selected file for extraction.
    pub async fn submit(&self, year: &str) -> Result<(), ControllerError> {
        let file = self
            .state
            .borrow()
            .selected
            .as_ref()
            .map(|selected| selected.handle().clone());
        let Some(file) = file else {
            return Err(self.fail(ControllerError::NoFileSelected));
        };

        let year = year.to_string();
        self.update(|view| {
            view.panel = Panel::Progress;
            view.submit_visible = false;
            view.error = None;
            view.year = year.clone();
        });
        self.ui
            .start_progress(&self.messages.progress, self.config.progress_interval());

        let outcome = self.backend.process(&file, &year).await;
        self.ui.stop_progress();

        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                error!("process request failed: {}", err);
                return Err(self.fail(ControllerError::Transport {
                    action: Action::Process,
                    detail: err.to_string(),
                }));
            }
        };

        let Some(session) = response.session() else {
            if response.success {
                return Err(self.fail(ControllerError::Transport {
                    action: Action::Process,
                    detail: "success response without temp_id or csv_filename".to_string(),
                }));
            }
            return Err(self.fail(ControllerError::Server {
                action: Action::Process,
                message: response.error,
            }));
        };

        let count = response.article_count.unwrap_or(0);
        info!(temp_id = %session.temp_id, articles = count, "extraction finished");
        let summary = ResultSummary {
            headline: self.messages.articles_processed(count),
            filename: session.csv_filename.clone(),
        };
        self.state.borrow_mut().session = Some(session);
        self.update(|view| {
            view.panel = Panel::Result;
            view.result = Some(summary);
            view.analysis = None;
        });
        Ok(())
    }

    /// Start a native download of the generated CSV.
    ///
    /// Returns the delay after which the caller should run [`cleanup`](Self::cleanup).
    pub fn download(&self) -> Result<Duration, ControllerError> {
        let Some(session) = self.session() else {
            return Err(self.fail(ControllerError::NoDownloadSession));
        };

        let url = self.endpoints.download(&session);
        debug!(%url, "starting download");
        self.ui.trigger_download(&url, &session.csv_filename);
        self.ui
            .notify(&Notice::new(NoticeLevel::Success, self.messages.downloading));
        Ok(self.config.cleanup_delay())
    }

    /// Ask the server to delete the temporary files. Best effort: failures
    /// are logged and otherwise ignored.
    pub async fn cleanup(&self) {
        let Some(session) = self.session() else {
            return;
        };

        match self.backend.cleanup(&session.temp_id).await {
            Ok(()) => debug!(temp_id = %session.temp_id, "temporary files removed"),
            Err(err) => warn!(temp_id = %session.temp_id, "cleanup failed: {}", err),
        }
    }

    /// Fetch and show the analysis of the generated CSV
    pub async fn analyze(&self) -> Result<(), ControllerError> {
        let Some(session) = self.session() else {
            return Err(self.fail(ControllerError::NoAnalysisSession));
        };

        self.ui
            .notify(&Notice::new(NoticeLevel::Info, self.messages.analyzing));

        let response = match self.backend.analyze(&session).await {
            Ok(response) => response,
            Err(err) => {
                error!("analyze request failed: {}", err);
                return Err(self.fail(ControllerError::Transport {
                    action: Action::Analyze,
                    detail: err.to_string(),
                }));
            }
        };

        let report = match response {
            AnalyzeResponse {
                success: true,
                analysis: Some(report),
                ..
            } => report,
            AnalyzeResponse { error, .. } => {
                return Err(self.fail(ControllerError::Server {
                    action: Action::Analyze,
                    message: error,
                }));
            }
        };

        let analysis = AnalysisView::build(
            &report,
            self.messages,
            self.config.preview_rows,
            self.config.truncate_len,
        );
        info!(
            articles = report.basic_stats.total_articles,
            "analysis received"
        );
        self.update(|view| {
            view.analysis = Some(analysis);
            view.panel = Panel::Analysis;
        });
        Ok(())
    }

    /// Analysis panel back to the result panel; the session stays
    pub fn close_analysis(&self) {
        if self.state.borrow().view.panel != Panel::Analysis {
            return;
        }
        self.update(|view| view.panel = Panel::Result);
    }

    /// Leave the error panel, keeping the selected file
    pub fn retry(&self) {
        if self.state.borrow().view.panel != Panel::Error {
            return;
        }
        self.update(|view| {
            view.panel = Panel::Idle;
            view.error = None;
            view.submit_visible = true;
        });
    }

    /// Show the error panel for `err` and hand it back to the caller
    fn fail(&self, err: ControllerError) -> ControllerError {
        let message = self.messages.describe(&err);
        debug!("showing error: {}", err);
        self.update(|view| {
            view.panel = Panel::Error;
            view.error = Some(message);
            view.submit_visible = true;
        });
        err
    }

    fn update(&self, apply: impl FnOnce(&mut ViewState)) {
        let view = {
            let mut state = self.state.borrow_mut();
            apply(&mut state.view);
            state.view.clone()
        };
        self.ui.render(&view);
    }
}
