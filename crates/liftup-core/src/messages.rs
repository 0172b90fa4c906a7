//! User-facing text
//!
//! The deployed tool speaks Turkish; an English table is kept alongside so
//! the page can be served to non-Turkish reviewers. Server-supplied error
//! messages never pass through here, they are shown verbatim.

use serde::Deserialize;

use crate::api::TextLengthStats;
use crate::error::{Action, ControllerError};
use crate::file::SelectionSource;
use crate::format::format_file_size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

/// Localized string table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub invalid_pdf: &'static str,
    pub dropped_non_pdf: &'static str,
    /// `{limit}` is replaced by the size limit, e.g. `50MB`
    pub file_too_large: &'static str,
    pub no_file_selected: &'static str,
    pub process_failed: &'static str,
    pub server_unreachable: &'static str,
    pub no_download_session: &'static str,
    pub no_analysis_session: &'static str,
    pub analysis_failed: &'static str,
    pub downloading: &'static str,
    pub analyzing: &'static str,
    pub articles_processed: &'static str,
    pub missing_values_suffix: &'static str,
    /// `{avg}`, `{min}` and `{max}` are replaced by character counts
    pub text_length: &'static str,
    pub complete: &'static str,
    pub incomplete: &'static str,
    pub progress: [&'static str; 6],
}

const TR: Messages = Messages {
    invalid_pdf: "Lütfen geçerli bir PDF dosyası seçin!",
    dropped_non_pdf: "Lütfen sadece PDF dosyası yükleyin!",
    file_too_large: "Dosya boyutu çok büyük! Maksimum {limit} yükleyebilirsiniz.",
    no_file_selected: "Lütfen bir PDF dosyası seçin!",
    process_failed: "Bir hata oluştu!",
    server_unreachable: "Sunucu hatası! Lütfen daha sonra tekrar deneyin.",
    no_download_session: "İndirme bilgileri bulunamadı!",
    no_analysis_session: "Analiz bilgileri bulunamadı!",
    analysis_failed: "Analiz sırasında bir hata oluştu!",
    downloading: "CSV dosyası indiriliyor...",
    analyzing: "Analiz yapılıyor...",
    articles_processed: "makale başarıyla işlendi!",
    missing_values_suffix: "eksik değer",
    text_length: "ortalama {avg}, en kısa {min}, en uzun {max} karakter",
    complete: "Tam",
    incomplete: "Eksik",
    progress: [
        "PDF dosyanız yükleniyor...",
        "Makaleler taranıyor...",
        "Başlıklar çıkarılıyor...",
        "Özetler işleniyor...",
        "Anahtar kelimeler belirleniyor...",
        "CSV dosyası oluşturuluyor...",
    ],
};

const EN: Messages = Messages {
    invalid_pdf: "Please select a valid PDF file!",
    dropped_non_pdf: "Please upload PDF files only!",
    file_too_large: "File is too large! You can upload at most {limit}.",
    no_file_selected: "Please select a PDF file!",
    process_failed: "Something went wrong!",
    server_unreachable: "Server error! Please try again later.",
    no_download_session: "Download information not found!",
    no_analysis_session: "Analysis information not found!",
    analysis_failed: "An error occurred during analysis!",
    downloading: "Downloading CSV file...",
    analyzing: "Analysing...",
    articles_processed: "articles processed successfully!",
    missing_values_suffix: "missing values",
    text_length: "average {avg}, shortest {min}, longest {max} characters",
    complete: "Complete",
    incomplete: "Incomplete",
    progress: [
        "Uploading your PDF...",
        "Scanning articles...",
        "Extracting titles...",
        "Processing abstracts...",
        "Identifying keywords...",
        "Building the CSV file...",
    ],
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Tr => &TR,
            Locale::En => &EN,
        }
    }

    /// Text shown to the user for a controller failure
    pub fn describe(&self, error: &ControllerError) -> String {
        match error {
            ControllerError::NotPdf { origin, .. } => match origin {
                SelectionSource::Browse => self.invalid_pdf.to_string(),
                SelectionSource::Drop => self.dropped_non_pdf.to_string(),
            },
            ControllerError::FileTooLarge { limit, .. } => self
                .file_too_large
                .replace("{limit}", &format_file_size(*limit).replace(' ', "")),
            ControllerError::NoFileSelected => self.no_file_selected.to_string(),
            ControllerError::NoDownloadSession => self.no_download_session.to_string(),
            ControllerError::NoAnalysisSession => self.no_analysis_session.to_string(),
            ControllerError::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ControllerError::Server { action, .. } => self.generic_failure(*action).to_string(),
            ControllerError::Transport { action, .. } => match action {
                Action::Analyze => self.analysis_failed.to_string(),
                _ => self.server_unreachable.to_string(),
            },
        }
    }

    /// Result panel headline, e.g. `42 makale başarıyla işlendi!`
    pub fn articles_processed(&self, count: u64) -> String {
        format!("{} {}", count, self.articles_processed)
    }

    /// One line of the text length summary
    pub fn text_length(&self, stats: &TextLengthStats) -> String {
        self.text_length
            .replace("{avg}", &stats.avg_length.to_string())
            .replace("{min}", &stats.min_length.to_string())
            .replace("{max}", &stats.max_length.to_string())
    }

    fn generic_failure(&self, action: Action) -> &'static str {
        match action {
            Action::Analyze => self.analysis_failed,
            Action::Process | Action::Cleanup => self.process_failed,
        }
    }
}
