//! Backend wire format and endpoint paths
//!
//! Field names follow the JSON the extraction server emits. Everything except
//! `success` is optional on the wire, so all fields default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Multipart field carrying the PDF
pub const FILE_FIELD: &str = "pdfFile";
/// Multipart field carrying the publication year range
pub const YEAR_FIELD: &str = "year";

/// One extracted row of the CSV, keyed by column name
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Key for download, analyze and cleanup calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSession {
    pub temp_id: String,
    pub csv_filename: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProcessResponse {
    pub success: bool,
    pub temp_id: Option<String>,
    pub csv_filename: Option<String>,
    pub article_count: Option<u64>,
    pub error: Option<String>,
}

impl ProcessResponse {
    /// The session pair, present only on a complete success payload
    pub fn session(&self) -> Option<ExtractionSession> {
        match (&self.temp_id, &self.csv_filename) {
            (Some(temp_id), Some(csv_filename)) if self.success => Some(ExtractionSession {
                temp_id: temp_id.clone(),
                csv_filename: csv_filename.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub analysis: Option<AnalysisReport>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    pub basic_stats: BasicStats,
    pub missing_values: MissingValues,
    pub language_stats: Option<LanguageStats>,
    pub first_rows: Vec<Record>,
    pub year_distribution: Option<BTreeMap<String, u64>>,
    pub text_length_stats: Option<BTreeMap<String, TextLengthStats>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BasicStats {
    pub total_articles: u64,
    pub total_columns: u64,
    pub columns: Vec<String>,
    pub file_size: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissingValues {
    pub total_missing: u64,
    pub has_missing: bool,
    pub details: Vec<MissingDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissingDetail {
    pub column: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LanguageStats {
    pub tr_completeness: f64,
    pub en_completeness: f64,
    pub tr_titles_filled: u64,
    pub en_titles_filled: u64,
    pub tr_abstracts_filled: u64,
    pub en_abstracts_filled: u64,
    pub tr_keywords_filled: u64,
    pub en_keywords_filled: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextLengthStats {
    pub avg_length: f64,
    pub min_length: u64,
    pub max_length: u64,
}

/// Builds backend URLs from the configured base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn process(&self) -> String {
        format!("{}/process", self.base)
    }

    pub fn download(&self, session: &ExtractionSession) -> String {
        format!(
            "{}/download/{}/{}",
            self.base,
            urlencoding::encode(&session.temp_id),
            urlencoding::encode(&session.csv_filename)
        )
    }

    pub fn analyze(&self, session: &ExtractionSession) -> String {
        format!(
            "{}/analyze/{}/{}",
            self.base,
            urlencoding::encode(&session.temp_id),
            urlencoding::encode(&session.csv_filename)
        )
    }

    pub fn cleanup(&self, temp_id: &str) -> String {
        format!("{}/cleanup/{}", self.base, urlencoding::encode(temp_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> ExtractionSession {
        ExtractionSession {
            temp_id: "a1b2c3d4".to_string(),
            csv_filename: "cilt 12_extracted.csv".to_string(),
        }
    }

    #[test]
    fn test_endpoint_paths_same_origin() {
        let endpoints = Endpoints::new("");
        assert_eq!(endpoints.process(), "/process");
        assert_eq!(
            endpoints.download(&session()),
            "/download/a1b2c3d4/cilt%2012_extracted.csv"
        );
        assert_eq!(
            endpoints.analyze(&session()),
            "/analyze/a1b2c3d4/cilt%2012_extracted.csv"
        );
        assert_eq!(endpoints.cleanup("a1b2c3d4"), "/cleanup/a1b2c3d4");
    }

    #[test]
    fn test_trailing_slash_in_base_is_dropped() {
        let endpoints = Endpoints::new("https://liftup.example/api/");
        assert_eq!(endpoints.process(), "https://liftup.example/api/process");
    }

    #[test]
    fn test_process_success_payload() {
        let response: ProcessResponse = serde_json::from_str(
            r#"{"success": true, "article_count": 12, "csv_path": "/tmp/x.csv",
                "csv_filename": "x_extracted.csv", "temp_id": "a1b2c3d4"}"#,
        )
        .unwrap();
        assert_eq!(response.article_count, Some(12));
        assert_eq!(
            response.session(),
            Some(ExtractionSession {
                temp_id: "a1b2c3d4".to_string(),
                csv_filename: "x_extracted.csv".to_string(),
            })
        );
    }

    #[test]
    fn test_process_failure_has_no_session() {
        let response: ProcessResponse =
            serde_json::from_str(r#"{"success": false, "error": "Dosya seçilmedi"}"#).unwrap();
        assert_eq!(response.session(), None);
        assert_eq!(response.error.as_deref(), Some("Dosya seçilmedi"));
    }

    #[test]
    fn test_analysis_payload_with_optional_sections() {
        let response: AnalyzeResponse = serde_json::from_str(
            r#"{
                "success": true,
                "analysis": {
                    "basic_stats": {"total_articles": 2, "total_columns": 9,
                                    "columns": ["PageNumber", "Year"], "file_size": 2048},
                    "missing_values": {"has_missing": true, "total_missing": 1,
                                       "details": [{"column": "Abstract_EN", "count": 1, "percentage": 50.0}]},
                    "first_rows": [{"PageNumber": 3, "Year": "2021-2022", "Title_TR": "Başlık"}],
                    "year_distribution": {"2021-2022": 2},
                    "language_stats": {"tr_completeness": 100.0, "en_completeness": 66.67},
                    "text_length_stats": {"Title_TR": {"avg_length": 6.0, "min_length": 6, "max_length": 6}}
                }
            }"#,
        )
        .unwrap();
        let report = response.analysis.unwrap();
        assert_eq!(report.basic_stats.file_size, 2048);
        assert_eq!(report.missing_values.details[0].column, "Abstract_EN");
        assert_eq!(report.language_stats.unwrap().en_completeness, 66.67);
        assert_eq!(report.first_rows.len(), 1);
        assert_eq!(report.year_distribution.unwrap()["2021-2022"], 2);
    }
}
