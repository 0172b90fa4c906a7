//! File selection and validation
//!
//! Only the browser-reported MIME type and size are inspected; the bytes are
//! never read on the client.

use crate::error::ControllerError;

/// The only accepted MIME type
pub const PDF_MIME: &str = "application/pdf";

/// Upload limit enforced before submission (50 MiB, inclusive)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// How the user picked the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    /// Click-to-browse through the hidden file input
    Browse,
    /// Dropped onto the upload area
    Drop,
}

/// A file offered by the user, not yet validated.
///
/// `F` is the platform handle (`web_sys::File` in the browser).
#[derive(Debug, Clone, PartialEq)]
pub struct FileCandidate<F> {
    pub handle: F,
    pub name: String,
    pub size: u64,
    pub mime: String,
}

/// A validated PDF waiting to be submitted
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile<F> {
    handle: F,
    name: String,
    size: u64,
}

impl<F> SelectedFile<F> {
    pub fn handle(&self) -> &F {
        &self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Check type and size of a candidate.
///
/// Type is checked first, so a large non-PDF reports the type problem.
pub fn validate_candidate<F>(
    candidate: FileCandidate<F>,
    source: SelectionSource,
    max_size: u64,
) -> Result<SelectedFile<F>, ControllerError> {
    if candidate.mime != PDF_MIME {
        return Err(ControllerError::NotPdf {
            mime: candidate.mime,
            origin: source,
        });
    }

    if candidate.size > max_size {
        return Err(ControllerError::FileTooLarge {
            size: candidate.size,
            limit: max_size,
        });
    }

    Ok(SelectedFile {
        handle: candidate.handle,
        name: candidate.name,
        size: candidate.size,
    })
}
