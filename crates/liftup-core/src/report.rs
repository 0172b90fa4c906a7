//! Analysis report view model
//!
//! Turns the backend's analysis payload into display strings. The DOM layer
//! only copies these into elements; no formatting decisions happen there.

use serde::Serialize;
use serde_json::Value;

use crate::api::{AnalysisReport, LanguageStats, Record};
use crate::format::{format_file_size, truncate_text};
use crate::messages::Messages;

/// Columns that must all be filled for a record to count as complete
pub const REQUIRED_FIELDS: [&str; 4] = ["Title_TR", "Title_EN", "Abstract_TR", "Abstract_EN"];

/// Shown in place of an empty cell
pub const EMPTY_CELL: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    Complete,
    Incomplete,
}

impl Completeness {
    pub fn of(record: &Record) -> Self {
        if REQUIRED_FIELDS
            .iter()
            .all(|field| !field_text(record, field).is_empty())
        {
            Completeness::Complete
        } else {
            Completeness::Incomplete
        }
    }

    pub fn label(self, messages: &Messages) -> &'static str {
        match self {
            Completeness::Complete => messages.complete,
            Completeness::Incomplete => messages.incomplete,
        }
    }
}

/// A table cell whose display text may be shortened; `full` goes into the
/// hover title
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub display: String,
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub page: String,
    pub year: String,
    pub title_tr: Cell,
    pub title_en: Cell,
    pub status: Completeness,
    pub status_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingRow {
    pub column: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageView {
    pub tr_label: String,
    pub en_label: String,
    /// Progress bar widths in percent, clamped to 0..=100
    pub tr_width: f64,
    pub en_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLengthRow {
    pub column: String,
    pub text: String,
}

/// Everything the analysis panel displays
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    pub total_articles: String,
    pub total_columns: String,
    /// Comma separated column names, shown as the column count's hover text
    pub column_names: String,
    pub file_size: String,
    pub total_missing: String,
    /// Empty when the report has no missing values; the section stays hidden
    pub missing_details: Vec<MissingRow>,
    pub language: Option<LanguageView>,
    pub preview: Vec<PreviewRow>,
    pub year_distribution: Vec<(String, u64)>,
    pub text_lengths: Vec<TextLengthRow>,
}

impl AnalysisView {
    pub fn build(
        report: &AnalysisReport,
        messages: &Messages,
        preview_rows: usize,
        truncate_len: usize,
    ) -> Self {
        let missing = &report.missing_values;
        let missing_details = if missing.has_missing {
            missing
                .details
                .iter()
                .map(|detail| MissingRow {
                    column: detail.column.clone(),
                    text: format!(
                        "{} {} ({}%)",
                        detail.count, messages.missing_values_suffix, detail.percentage
                    ),
                })
                .collect()
        } else {
            Vec::new()
        };

        let preview = report
            .first_rows
            .iter()
            .take(preview_rows)
            .map(|record| preview_row(record, messages, truncate_len))
            .collect();

        let year_distribution: Vec<(String, u64)> = report
            .year_distribution
            .as_ref()
            .map(|years| years.iter().map(|(y, n)| (y.clone(), *n)).collect())
            .unwrap_or_default();

        let text_lengths = report
            .text_length_stats
            .iter()
            .flatten()
            .map(|(column, stats)| TextLengthRow {
                column: column.clone(),
                text: messages.text_length(stats),
            })
            .collect();

        Self {
            total_articles: report.basic_stats.total_articles.to_string(),
            total_columns: report.basic_stats.total_columns.to_string(),
            column_names: report.basic_stats.columns.join(", "),
            file_size: format_file_size(report.basic_stats.file_size),
            total_missing: missing.total_missing.to_string(),
            missing_details,
            language: report.language_stats.as_ref().map(language_view),
            preview,
            year_distribution,
            text_lengths,
        }
    }

    pub fn has_missing_details(&self) -> bool {
        !self.missing_details.is_empty()
    }
}

fn language_view(stats: &LanguageStats) -> LanguageView {
    LanguageView {
        tr_label: format!("{}%", stats.tr_completeness),
        en_label: format!("{}%", stats.en_completeness),
        tr_width: stats.tr_completeness.clamp(0.0, 100.0),
        en_width: stats.en_completeness.clamp(0.0, 100.0),
    }
}

fn preview_row(record: &Record, messages: &Messages, truncate_len: usize) -> PreviewRow {
    let status = Completeness::of(record);
    PreviewRow {
        page: or_placeholder(field_text(record, "PageNumber")),
        year: or_placeholder(field_text(record, "Year")),
        title_tr: cell(record, "Title_TR", truncate_len),
        title_en: cell(record, "Title_EN", truncate_len),
        status,
        status_label: status.label(messages).to_string(),
    }
}

fn cell(record: &Record, field: &str, truncate_len: usize) -> Cell {
    let full = or_placeholder(field_text(record, field));
    Cell {
        display: truncate_text(&full, truncate_len),
        full,
    }
}

fn or_placeholder(text: String) -> String {
    if text.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        text
    }
}

/// Text of a field, verbatim. Missing, `null`, `""`, `false` and `0` give
/// an empty string; whitespace is kept and counts as content.
fn field_text(record: &Record, field: &str) -> String {
    match record.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => true.to_string(),
        Some(value @ (Value::Array(_) | Value::Object(_))) => value.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BasicStats, MissingDetail, MissingValues, TextLengthStats};
    use crate::messages::Locale;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("record fixture must be an object"),
        }
    }

    fn full_record(page: u32) -> Record {
        record(json!({
            "PageNumber": page,
            "Year": "2021-2022",
            "Title_TR": "Türkçe başlık",
            "Title_EN": "English title",
            "Abstract_TR": "Özet",
            "Abstract_EN": "Abstract",
        }))
    }

    fn messages() -> &'static Messages {
        Messages::for_locale(Locale::Tr)
    }

    #[test]
    fn test_complete_record() {
        assert_eq!(Completeness::of(&full_record(1)), Completeness::Complete);
    }

    #[test]
    fn test_record_missing_any_required_field_is_incomplete() {
        for field in REQUIRED_FIELDS {
            let mut missing = full_record(1);
            missing.remove(field);
            assert_eq!(Completeness::of(&missing), Completeness::Incomplete, "{field}");

            let mut empty = full_record(1);
            empty.insert(field.to_string(), json!(""));
            assert_eq!(Completeness::of(&empty), Completeness::Incomplete, "{field}");

            let mut null = full_record(1);
            null.insert(field.to_string(), Value::Null);
            assert_eq!(Completeness::of(&null), Completeness::Incomplete, "{field}");
        }
    }

    #[test]
    fn test_whitespace_counts_as_content() {
        let mut row = full_record(1);
        row.insert("Abstract_EN".to_string(), json!(" "));
        assert_eq!(Completeness::of(&row), Completeness::Complete);
    }

    #[test]
    fn test_hover_text_is_untrimmed() {
        let mut row = full_record(2);
        row.insert("Title_TR".to_string(), json!("  padded title  "));
        let report = AnalysisReport {
            first_rows: vec![row],
            ..AnalysisReport::default()
        };
        let view = AnalysisView::build(&report, messages(), 5, 50);
        assert_eq!(view.preview[0].title_tr.full, "  padded title  ");
        assert_eq!(view.preview[0].title_tr.display, "  padded title  ");
    }

    #[test]
    fn test_zero_page_number_renders_placeholder() {
        let report = AnalysisReport {
            first_rows: vec![record(json!({"PageNumber": 0, "Year": 2022}))],
            ..AnalysisReport::default()
        };
        let row = &AnalysisView::build(&report, messages(), 5, 50).preview[0];
        assert_eq!(row.page, EMPTY_CELL);
        assert_eq!(row.year, "2022");
    }

    #[test]
    fn test_columns_and_text_lengths_rendered() {
        let mut lengths = std::collections::BTreeMap::new();
        lengths.insert(
            "Title_TR".to_string(),
            TextLengthStats {
                avg_length: 62.5,
                min_length: 20,
                max_length: 105,
            },
        );
        lengths.insert(
            "Abstract_EN".to_string(),
            TextLengthStats {
                avg_length: 900.0,
                min_length: 310,
                max_length: 1800,
            },
        );
        let report = AnalysisReport {
            basic_stats: BasicStats {
                columns: vec!["PageNumber".to_string(), "Year".to_string()],
                ..BasicStats::default()
            },
            text_length_stats: Some(lengths),
            ..AnalysisReport::default()
        };

        let view = AnalysisView::build(&report, messages(), 5, 50);
        assert_eq!(view.column_names, "PageNumber, Year");
        assert_eq!(
            view.text_lengths,
            vec![
                TextLengthRow {
                    column: "Abstract_EN".to_string(),
                    text: "ortalama 900, en kısa 310, en uzun 1800 karakter".to_string(),
                },
                TextLengthRow {
                    column: "Title_TR".to_string(),
                    text: "ortalama 62.5, en kısa 20, en uzun 105 karakter".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_preview_limited_to_configured_rows() {
        let report = AnalysisReport {
            first_rows: (1..=8).map(full_record).collect(),
            ..AnalysisReport::default()
        };
        let view = AnalysisView::build(&report, messages(), 5, 50);
        assert_eq!(view.preview.len(), 5);
        assert_eq!(view.preview[4].page, "5");
    }

    #[test]
    fn test_long_title_truncated_with_full_text_kept() {
        let long = "Ç".repeat(60);
        let mut row = full_record(7);
        row.insert("Title_EN".to_string(), json!(long.clone()));
        let report = AnalysisReport {
            first_rows: vec![row],
            ..AnalysisReport::default()
        };

        let view = AnalysisView::build(&report, messages(), 5, 50);
        let cell = &view.preview[0].title_en;
        assert_eq!(cell.display, format!("{}...", "Ç".repeat(50)));
        assert_eq!(cell.full, long);
        assert_eq!(view.preview[0].status_label, "Tam");
    }

    #[test]
    fn test_empty_cells_use_placeholder() {
        let report = AnalysisReport {
            first_rows: vec![record(json!({"Title_TR": ""}))],
            ..AnalysisReport::default()
        };
        let row = &AnalysisView::build(&report, messages(), 5, 50).preview[0];
        assert_eq!(row.page, EMPTY_CELL);
        assert_eq!(row.year, EMPTY_CELL);
        assert_eq!(
            row.title_tr,
            Cell {
                display: EMPTY_CELL.to_string(),
                full: EMPTY_CELL.to_string()
            }
        );
        assert_eq!(row.status, Completeness::Incomplete);
        assert_eq!(row.status_label, "Eksik");
    }

    #[test]
    fn test_basic_stats_formatting() {
        let report = AnalysisReport {
            basic_stats: BasicStats {
                total_articles: 42,
                total_columns: 9,
                columns: Vec::new(),
                file_size: 1536,
            },
            ..AnalysisReport::default()
        };
        let view = AnalysisView::build(&report, messages(), 5, 50);
        assert_eq!(view.total_articles, "42");
        assert_eq!(view.total_columns, "9");
        assert_eq!(view.file_size, "1.5 KB");
        assert_eq!(view.total_missing, "0");
        assert!(view.language.is_none());
    }

    #[test]
    fn test_missing_details_only_when_flagged() {
        let details = vec![MissingDetail {
            column: "Keywords_EN".to_string(),
            count: 3,
            percentage: 12.5,
        }];
        let mut report = AnalysisReport {
            missing_values: MissingValues {
                total_missing: 3,
                has_missing: true,
                details: details.clone(),
            },
            ..AnalysisReport::default()
        };

        let view = AnalysisView::build(&report, messages(), 5, 50);
        assert!(view.has_missing_details());
        assert_eq!(
            view.missing_details,
            vec![MissingRow {
                column: "Keywords_EN".to_string(),
                text: "3 eksik değer (12.5%)".to_string(),
            }]
        );

        report.missing_values.has_missing = false;
        let view = AnalysisView::build(&report, messages(), 5, 50);
        assert!(!view.has_missing_details());
    }

    #[test]
    fn test_language_bars_clamped() {
        let report = AnalysisReport {
            language_stats: Some(LanguageStats {
                tr_completeness: 100.0,
                en_completeness: 66.67,
                ..LanguageStats::default()
            }),
            ..AnalysisReport::default()
        };
        let language = AnalysisView::build(&report, messages(), 5, 50)
            .language
            .unwrap();
        assert_eq!(language.tr_label, "100%");
        assert_eq!(language.en_label, "66.67%");
        assert_eq!(language.tr_width, 100.0);

        let over = language_view(&LanguageStats {
            tr_completeness: 140.0,
            en_completeness: -3.0,
            ..LanguageStats::default()
        });
        assert_eq!(over.tr_width, 100.0);
        assert_eq!(over.en_width, 0.0);
    }
}
