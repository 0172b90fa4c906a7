//! Property-based tests for file selection and display formatting

use liftup_core::file::validate_candidate;
use liftup_core::{
    format_file_size, truncate_text, ControllerError, FileCandidate, SelectionSource,
    MAX_FILE_SIZE, PDF_MIME,
};
use proptest::prelude::*;

fn source() -> impl Strategy<Value = SelectionSource> {
    prop_oneof![Just(SelectionSource::Browse), Just(SelectionSource::Drop)]
}

fn non_pdf_mime() -> impl Strategy<Value = String> {
    "[a-z]{1,12}/[a-z0-9.+-]{1,20}".prop_filter("must not be application/pdf", |m| m != PDF_MIME)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn non_pdf_types_are_rejected(mime in non_pdf_mime(), size in 0u64..=MAX_FILE_SIZE, source in source()) {
        let candidate = FileCandidate { handle: (), name: "x".to_string(), size, mime };
        let result = validate_candidate(candidate, source, MAX_FILE_SIZE);
        let is_not_pdf = matches!(result, Err(ControllerError::NotPdf { .. }));
        prop_assert!(is_not_pdf);
    }

    #[test]
    fn oversized_pdfs_are_rejected(extra in 1u64..=10 * MAX_FILE_SIZE, source in source()) {
        let size = MAX_FILE_SIZE + extra;
        let candidate = FileCandidate { handle: (), name: "x.pdf".to_string(), size, mime: PDF_MIME.to_string() };
        let result = validate_candidate(candidate, source, MAX_FILE_SIZE);
        prop_assert_eq!(result.unwrap_err(), ControllerError::FileTooLarge { size, limit: MAX_FILE_SIZE });
    }

    #[test]
    fn pdfs_within_limit_are_accepted(size in 0u64..=MAX_FILE_SIZE, source in source()) {
        let candidate = FileCandidate { handle: (), name: "x.pdf".to_string(), size, mime: PDF_MIME.to_string() };
        let selected = validate_candidate(candidate, source, MAX_FILE_SIZE).unwrap();
        prop_assert_eq!(selected.size(), size);
    }

    #[test]
    fn size_label_has_number_and_known_unit(bytes in 1u64..u64::MAX / 2) {
        let label = format_file_size(bytes);
        let (number, unit) = label.split_once(' ').unwrap();
        prop_assert!(["Bytes", "KB", "MB", "GB"].contains(&unit));
        let value: f64 = number.parse().unwrap();
        prop_assert!(value > 0.0);
        if unit != "GB" {
            prop_assert!(value <= 1024.0);
        }
    }

    #[test]
    fn truncation_bounds_length(text in "\\PC{0,120}", max in 1usize..80) {
        let truncated = truncate_text(&text, max);
        let len = text.chars().count();
        if len <= max {
            prop_assert_eq!(truncated, text);
        } else {
            prop_assert_eq!(truncated.chars().count(), max + 3);
            prop_assert!(truncated.ends_with("..."));
            let prefix: String = text.chars().take(max).collect();
            prop_assert!(truncated.starts_with(&prefix));
        }
    }
}
