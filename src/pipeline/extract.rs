//! Text extraction: run an external PDF-to-text tool and capture stdout.
//!
//! The slide parser relies entirely on the extractor's page layout: pages
//! separated by form feeds (`\x0c`), one text line per visual line. Poppler's
//! `pdftotext` does exactly that when asked to write to `-` (stdout).
//!
//! The [`TextExtractor`] trait is the seam for swapping the backend, e.g. an
//! in-memory fixture in tests.

use crate::error::Beamer2MdxError;
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Produces raw page text (form-feed separated) for a PDF.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, pdf_path: &Path) -> Result<String, Beamer2MdxError>;
}

/// Runs `<program> [extra_args...] <pdf> -` and returns its stdout.
///
/// The child is awaited without a timeout; a hung extractor hangs the run.
#[derive(Debug, Clone)]
pub struct PdfToText {
    program: String,
    extra_args: Vec<String>,
}

impl Default for PdfToText {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

impl PdfToText {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Arguments placed before the PDF path, e.g. `-enc UTF-8`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.extra_args
    }
}

#[async_trait]
impl TextExtractor for PdfToText {
    async fn extract(&self, pdf_path: &Path) -> Result<String, Beamer2MdxError> {
        if !pdf_path.exists() {
            return Err(Beamer2MdxError::FileNotFound {
                path: pdf_path.to_path_buf(),
            });
        }

        debug!("Running {} on {}", self.program, pdf_path.display());
        let output = Command::new(&self.program)
            .args(&self.extra_args)
            .arg(pdf_path)
            .arg("-")
            .output()
            .await
            .map_err(|e| Beamer2MdxError::ExtractorSpawnFailed {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(Beamer2MdxError::ExtractorFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| Beamer2MdxError::ExtractorOutputNotUtf8 {
            path: pdf_path.to_path_buf(),
        })
    }
}
