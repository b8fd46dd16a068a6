//! Error types for the beamer2mdx library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Beamer2MdxError`] — **Fatal**: the lecture (and by default the whole
//!   batch) cannot proceed: missing source folder, missing PDF, extractor
//!   failure, a deck with no slides. Returned as `Err(Beamer2MdxError)`
//!   from the top-level `convert*` functions.
//!
//! * [`LectureError`] — **Recorded**: a single lecture failed while the run
//!   was configured with `fail_fast = false`. Stored inside
//!   [`crate::output::ConversionReport`] so callers can inspect which
//!   lectures were skipped instead of losing the whole batch.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the beamer2mdx library.
#[derive(Debug, Error)]
pub enum Beamer2MdxError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The lecture source root does not exist.
    #[error("Source folder '{path}' not found.")]
    SourceDirNotFound { path: PathBuf },

    /// A file handed to the extractor does not exist.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// A lecture folder exists but its `<id>.pdf` is missing.
    #[error("Missing PDF for {lecture_id}: {path}")]
    MissingPdf { lecture_id: String, path: PathBuf },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The external extractor could not be started.
    #[error("Failed to spawn '{program}': {source}\nIs poppler-utils installed?")]
    ExtractorSpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external extractor ran but exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    ExtractorFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The extractor wrote bytes that are not valid UTF-8.
    #[error("Extracted text for '{path}' is not valid UTF-8")]
    ExtractorOutputNotUtf8 { path: PathBuf },

    /// Extraction succeeded but no slide could be parsed from the text.
    #[error("No slides parsed for {lecture_id}")]
    NoSlides { lecture_id: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Removing, creating or copying into the image folder failed.
    #[error("Failed to copy lecture images at '{path}': {source}")]
    ImageCopyFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output document.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Beamer2MdxError {
    /// Lecture identifier carried by the error, when it names one.
    pub fn lecture_id(&self) -> Option<&str> {
        match self {
            Beamer2MdxError::MissingPdf { lecture_id, .. }
            | Beamer2MdxError::NoSlides { lecture_id } => Some(lecture_id),
            _ => None,
        }
    }
}

/// A per-lecture failure recorded when `fail_fast` is disabled.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
#[error("{lecture_id}: {message}")]
pub struct LectureError {
    pub lecture_id: String,
    pub message: String,
}

impl LectureError {
    pub fn new(lecture_id: impl Into<String>, error: &Beamer2MdxError) -> Self {
        Self {
            lecture_id: lecture_id.into(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_pdf_display() {
        let e = Beamer2MdxError::MissingPdf {
            lecture_id: "L4".into(),
            path: PathBuf::from("docs/Lectures/L4/L4.pdf"),
        };
        let msg = e.to_string();
        assert!(msg.contains("L4"), "got: {msg}");
        assert!(msg.contains("L4.pdf"), "got: {msg}");
    }

    #[test]
    fn extractor_failed_display() {
        let e = Beamer2MdxError::ExtractorFailed {
            program: "pdftotext".into(),
            status: "exit status: 1".into(),
            stderr: "Syntax Error".into(),
        };
        assert!(e.to_string().contains("pdftotext"));
        assert!(e.to_string().contains("Syntax Error"));
    }

    #[test]
    fn lecture_id_is_exposed() {
        let e = Beamer2MdxError::NoSlides {
            lecture_id: "L7".into(),
        };
        assert_eq!(e.lecture_id(), Some("L7"));
        assert_eq!(Beamer2MdxError::Internal("x".into()).lecture_id(), None);
    }

    #[test]
    fn lecture_error_wraps_message() {
        let fatal = Beamer2MdxError::NoSlides {
            lecture_id: "L2".into(),
        };
        let recorded = LectureError::new("L2", &fatal);
        assert_eq!(recorded.lecture_id, "L2");
        assert!(recorded.to_string().starts_with("L2: "));
    }
}
