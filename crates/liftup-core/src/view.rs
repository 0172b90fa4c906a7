//! Page view state
//!
//! A single [`ViewState`] describes everything the page shows. Panels are an
//! enum, so two of them can never be visible at once.

use serde::Serialize;

use crate::report::AnalysisView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    /// Upload form only
    #[default]
    Idle,
    Progress,
    Result,
    Error,
    Analysis,
}

impl Panel {
    pub const ALL: [Panel; 5] = [
        Panel::Idle,
        Panel::Progress,
        Panel::Result,
        Panel::Error,
        Panel::Analysis,
    ];
}

/// Name and formatted size of the chosen file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub size_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub headline: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub panel: Panel,
    /// `None` shows the drop prompt, `Some` the file info block
    pub file: Option<FileSummary>,
    pub submit_visible: bool,
    pub year: String,
    pub result: Option<ResultSummary>,
    pub error: Option<String>,
    pub analysis: Option<AnalysisView>,
}

impl ViewState {
    pub fn new(default_year: &str) -> Self {
        Self {
            panel: Panel::Idle,
            file: None,
            submit_visible: true,
            year: default_year.to_string(),
            result: None,
            error: None,
            analysis: None,
        }
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.panel == panel
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

impl NoticeLevel {
    /// Bootstrap alert flavour used by the page
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Success => "alert-success",
            NoticeLevel::Info => "alert-info",
            NoticeLevel::Error => "alert-danger",
        }
    }
}

/// Transient toast message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}
